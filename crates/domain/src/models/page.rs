//! Page tree model and content variants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::blocks::GalleryBlock;

/// Formatted (markup-bearing) text content, rendered by the serving layer.
///
/// Empty content is valid everywhere a rich text field appears.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub String);

impl RichText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for RichText {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RichText {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Page type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Home,
    About,
    Gallery,
    Contact,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::About => "about",
            PageKind::Gallery => "gallery",
            PageKind::Contact => "contact",
        }
    }
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific page payload.
///
/// The three menu references on `Home` are weak references by page id:
/// optional, and nulled by the persistence layer when the target page is
/// deleted. They are *hinted* to point at pages of the matching kind but
/// the data layer does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageContent {
    Home {
        #[serde(default)]
        body: RichText,
        #[serde(default)]
        about_page: Option<i64>,
        #[serde(default)]
        gallery_page: Option<i64>,
        #[serde(default)]
        contact_page: Option<i64>,
    },
    About {
        #[serde(default)]
        intro: RichText,
    },
    Gallery {
        #[serde(default)]
        gallery_images: Vec<GalleryBlock>,
    },
    Contact {
        #[serde(default)]
        body: RichText,
    },
}

impl PageContent {
    /// The type tag of this payload.
    pub fn kind(&self) -> PageKind {
        match self {
            PageContent::Home { .. } => PageKind::Home,
            PageContent::About { .. } => PageKind::About,
            PageContent::Gallery { .. } => PageKind::Gallery,
            PageContent::Contact { .. } => PageKind::Contact,
        }
    }

    /// Empty payload for a given kind, used when creating bare pages.
    pub fn empty(kind: PageKind) -> Self {
        match kind {
            PageKind::Home => PageContent::Home {
                body: RichText::default(),
                about_page: None,
                gallery_page: None,
                contact_page: None,
            },
            PageKind::About => PageContent::About {
                intro: RichText::default(),
            },
            PageKind::Gallery => PageContent::Gallery {
                gallery_images: Vec::new(),
            },
            PageKind::Contact => PageContent::Contact {
                body: RichText::default(),
            },
        }
    }
}

/// A page in the content tree.
///
/// Tree position, slug, title, and publishing state are shared by every
/// page; `content` selects the variant payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub slug: String,
    pub title: String,
    /// Distance from the tree root (roots have depth 0).
    pub depth: i32,
    /// Sort order among siblings.
    pub position: i32,
    pub live: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub content: PageContent,
}

impl Page {
    pub fn kind(&self) -> PageKind {
        self.content.kind()
    }
}

/// Input for creating a page.
#[derive(Debug, Clone)]
pub struct NewPage {
    pub parent_id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub content: PageContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_kind_as_str() {
        assert_eq!(PageKind::Home.as_str(), "home");
        assert_eq!(PageKind::Gallery.to_string(), "gallery");
    }

    #[test]
    fn test_content_kind() {
        let content = PageContent::About {
            intro: RichText::from("<p>Hi</p>"),
        };
        assert_eq!(content.kind(), PageKind::About);
    }

    #[test]
    fn test_empty_content_per_kind() {
        match PageContent::empty(PageKind::Gallery) {
            PageContent::Gallery { gallery_images } => assert!(gallery_images.is_empty()),
            other => panic!("unexpected content: {:?}", other),
        }
        match PageContent::empty(PageKind::Home) {
            PageContent::Home {
                body,
                about_page,
                gallery_page,
                contact_page,
            } => {
                assert!(body.is_empty());
                assert!(about_page.is_none());
                assert!(gallery_page.is_none());
                assert!(contact_page.is_none());
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn test_content_serde_tagging() {
        let content = PageContent::Home {
            body: RichText::from("<p>Welcome</p>"),
            about_page: Some(2),
            gallery_page: None,
            contact_page: None,
        };
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "home");
        assert_eq!(json["body"], "<p>Welcome</p>");
        assert_eq!(json["about_page"], 2);

        let back: PageContent = serde_json::from_value(json).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn test_content_deserialize_defaults() {
        // A bare tag is enough; every payload field is optional.
        let content: PageContent = serde_json::from_str(r#"{"type":"contact"}"#).unwrap();
        match content {
            PageContent::Contact { body } => assert!(body.is_empty()),
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn test_rich_text_transparent_serde() {
        let rt = RichText::from("<em>x</em>");
        assert_eq!(serde_json::to_string(&rt).unwrap(), r#""<em>x</em>""#);
    }
}
