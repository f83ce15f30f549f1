//! Slug derivation from page titles.

/// Derives a URL slug from a page title.
///
/// Lowercases ASCII letters, keeps digits, and collapses every other run
/// of characters into a single hyphen. Leading and trailing hyphens are
/// stripped. An empty or fully non-alphanumeric title yields `"page"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "page".to_string()
    } else {
        slug
    }
}
