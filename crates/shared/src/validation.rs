//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a page slug.
const MAX_SLUG_LENGTH: usize = 255;

/// Maximum length of a page title.
const MAX_TITLE_LENGTH: usize = 255;

/// Validates that a slug is non-empty, within length limits, and contains
/// only lowercase letters, digits, and hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        let mut err = ValidationError::new("slug_length");
        err.message = Some("Slug must be between 1 and 255 characters".into());
        return Err(err);
    }

    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        let mut err = ValidationError::new("slug_charset");
        err.message = Some("Slug may only contain lowercase letters, digits, and hyphens".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a page title is non-empty and within length limits.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() || title.len() > MAX_TITLE_LENGTH {
        let mut err = ValidationError::new("title_length");
        err.message = Some("Title must be between 1 and 255 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates an email address for the contact form.
///
/// Intentionally minimal: one `@` with non-empty local part and a domain
/// containing a dot. Full RFC validation is the mail server's problem.
pub fn validate_email_address(address: &str) -> Result<(), ValidationError> {
    let parts: Vec<&str> = address.splitn(2, '@').collect();
    let ok = parts.len() == 2
        && !parts[0].is_empty()
        && parts[1].contains('.')
        && !parts[1].starts_with('.')
        && !parts[1].ends_with('.');

    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_format");
        err.message = Some("Invalid email address".into());
        Err(err)
    }
}
