//! Page entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{GalleryBlock, Page, PageContent, PageKind, RichText};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database representation of the page kind tag, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
pub enum PageKindDb {
    Home,
    About,
    Gallery,
    Contact,
}

impl From<PageKindDb> for PageKind {
    fn from(db_kind: PageKindDb) -> Self {
        match db_kind {
            PageKindDb::Home => PageKind::Home,
            PageKindDb::About => PageKind::About,
            PageKindDb::Gallery => PageKind::Gallery,
            PageKindDb::Contact => PageKind::Contact,
        }
    }
}

impl From<PageKind> for PageKindDb {
    fn from(kind: PageKind) -> Self {
        match kind {
            PageKind::Home => PageKindDb::Home,
            PageKind::About => PageKindDb::About,
            PageKind::Gallery => PageKindDb::Gallery,
            PageKind::Contact => PageKindDb::Contact,
        }
    }
}

/// Database row mapping for the pages table.
#[derive(Debug, Clone, FromRow)]
pub struct PageEntity {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub depth: i32,
    pub position: i32,
    pub kind: PageKindDb,
    pub body: Option<String>,
    pub gallery_images: Option<Json<Vec<GalleryBlock>>>,
    pub about_page_id: Option<i64>,
    pub gallery_page_id: Option<i64>,
    pub contact_page_id: Option<i64>,
    pub live: bool,
    pub first_published_at: Option<DateTime<Utc>>,
    pub last_published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PageEntity> for Page {
    fn from(entity: PageEntity) -> Self {
        let content = match entity.kind {
            PageKindDb::Home => PageContent::Home {
                body: RichText(entity.body.unwrap_or_default()),
                about_page: entity.about_page_id,
                gallery_page: entity.gallery_page_id,
                contact_page: entity.contact_page_id,
            },
            PageKindDb::About => PageContent::About {
                intro: RichText(entity.body.unwrap_or_default()),
            },
            PageKindDb::Gallery => PageContent::Gallery {
                gallery_images: entity.gallery_images.map(|j| j.0).unwrap_or_default(),
            },
            PageKindDb::Contact => PageContent::Contact {
                body: RichText(entity.body.unwrap_or_default()),
            },
        };

        Self {
            id: entity.id,
            parent_id: entity.parent_id,
            slug: entity.slug,
            title: entity.title,
            depth: entity.depth,
            position: entity.position,
            live: entity.live,
            first_published_at: entity.first_published_at,
            last_published_at: entity.last_published_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            content,
        }
    }
}

/// Payload column values for a content variant, ready to bind.
#[derive(Debug, Clone)]
pub struct ContentColumns {
    pub kind: PageKindDb,
    pub body: Option<String>,
    pub gallery_images: Option<Json<Vec<GalleryBlock>>>,
    pub about_page_id: Option<i64>,
    pub gallery_page_id: Option<i64>,
    pub contact_page_id: Option<i64>,
}

impl From<&PageContent> for ContentColumns {
    fn from(content: &PageContent) -> Self {
        match content {
            PageContent::Home {
                body,
                about_page,
                gallery_page,
                contact_page,
            } => Self {
                kind: PageKindDb::Home,
                body: Some(body.0.clone()),
                gallery_images: None,
                about_page_id: *about_page,
                gallery_page_id: *gallery_page,
                contact_page_id: *contact_page,
            },
            PageContent::About { intro } => Self {
                kind: PageKindDb::About,
                body: Some(intro.0.clone()),
                gallery_images: None,
                about_page_id: None,
                gallery_page_id: None,
                contact_page_id: None,
            },
            PageContent::Gallery { gallery_images } => Self {
                kind: PageKindDb::Gallery,
                body: None,
                // An empty list is stored as `[]`, not NULL, so it
                // round-trips as an empty sequence.
                gallery_images: Some(Json(gallery_images.clone())),
                about_page_id: None,
                gallery_page_id: None,
                contact_page_id: None,
            },
            PageContent::Contact { body } => Self {
                kind: PageKindDb::Contact,
                body: Some(body.0.clone()),
                gallery_images: None,
                about_page_id: None,
                gallery_page_id: None,
                contact_page_id: None,
            },
        }
    }
}

/// One resolved menu target on a home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLink {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub live: bool,
}

/// Home page row joined with its three menu targets.
#[derive(Debug, Clone, FromRow)]
pub struct HomeMenuEntity {
    pub id: i64,
    pub about_id: Option<i64>,
    pub about_slug: Option<String>,
    pub about_title: Option<String>,
    pub about_live: Option<bool>,
    pub gallery_id: Option<i64>,
    pub gallery_slug: Option<String>,
    pub gallery_title: Option<String>,
    pub gallery_live: Option<bool>,
    pub contact_id: Option<i64>,
    pub contact_slug: Option<String>,
    pub contact_title: Option<String>,
    pub contact_live: Option<bool>,
}

impl HomeMenuEntity {
    /// The three menu entries in fixed order (About, Gallery, Contact).
    pub fn links(&self) -> [Option<MenuLink>; 3] {
        fn link(
            id: Option<i64>,
            slug: &Option<String>,
            title: &Option<String>,
            live: Option<bool>,
        ) -> Option<MenuLink> {
            Some(MenuLink {
                id: id?,
                slug: slug.clone()?,
                title: title.clone()?,
                live: live?,
            })
        }

        [
            link(self.about_id, &self.about_slug, &self.about_title, self.about_live),
            link(
                self.gallery_id,
                &self.gallery_slug,
                &self.gallery_title,
                self.gallery_live,
            ),
            link(
                self.contact_id,
                &self.contact_slug,
                &self.contact_title,
                self.contact_live,
            ),
        ]
    }
}
