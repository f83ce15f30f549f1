//! Page repository for database operations.

use domain::models::{NewPage, PageContent, PageKind};
use sqlx::SqlitePool;

use crate::entities::{ContentColumns, HomeMenuEntity, PageEntity, PageKindDb};
use crate::metrics::QueryTimer;

const PAGE_COLUMNS: &str = "id, parent_id, slug, title, depth, position, kind, body, \
     gallery_images, about_page_id, gallery_page_id, contact_page_id, live, \
     first_published_at, last_published_at, created_at, updated_at";

/// Repository for page-tree database operations.
#[derive(Clone)]
pub struct PageRepository {
    pool: SqlitePool,
}

impl PageRepository {
    /// Creates a new PageRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a page under an optional parent.
    ///
    /// Depth and sibling position are computed inside a transaction so
    /// concurrent creates under the same parent stay consistent.
    pub async fn create_page(&self, new: &NewPage) -> Result<PageEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_page");
        let cols = ContentColumns::from(&new.content);
        let now = chrono::Utc::now();

        let mut tx = self.pool.begin().await?;

        let depth: i32 = match new.parent_id {
            Some(parent_id) => {
                let parent_depth: i32 =
                    sqlx::query_scalar("SELECT depth FROM pages WHERE id = ?")
                        .bind(parent_id)
                        .fetch_one(&mut *tx)
                        .await?;
                parent_depth + 1
            }
            None => 0,
        };

        let position: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM pages WHERE parent_id IS ?",
        )
        .bind(new.parent_id)
        .fetch_one(&mut *tx)
        .await?;

        let page = sqlx::query_as::<_, PageEntity>(&format!(
            r#"
            INSERT INTO pages (
                parent_id, slug, title, depth, position, kind, body, gallery_images,
                about_page_id, gallery_page_id, contact_page_id, live, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
            RETURNING {PAGE_COLUMNS}
            "#
        ))
        .bind(new.parent_id)
        .bind(&new.slug)
        .bind(&new.title)
        .bind(depth)
        .bind(position)
        .bind(cols.kind)
        .bind(&cols.body)
        .bind(&cols.gallery_images)
        .bind(cols.about_page_id)
        .bind(cols.gallery_page_id)
        .bind(cols.contact_page_id)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(page)
    }

    /// Find a page by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<PageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_page_by_id");
        let result = sqlx::query_as::<_, PageEntity>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Root pages, ordered by position.
    pub async fn list_roots(&self) -> Result<Vec<PageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_root_pages");
        let result = sqlx::query_as::<_, PageEntity>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE parent_id IS NULL ORDER BY position"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Direct children of a page, ordered by position.
    pub async fn find_children(&self, parent_id: i64) -> Result<Vec<PageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_page_children");
        let result = sqlx::query_as::<_, PageEntity>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE parent_id = ? ORDER BY position"
        ))
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All pages of a given kind, ordered by tree position.
    pub async fn list_by_kind(&self, kind: PageKind) -> Result<Vec<PageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_pages_by_kind");
        let kind_db: PageKindDb = kind.into();
        let result = sqlx::query_as::<_, PageEntity>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE kind = ? ORDER BY depth, position"
        ))
        .bind(kind_db)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a child of `parent_id` (or a root when `None`) by slug.
    pub async fn find_child_by_slug(
        &self,
        parent_id: Option<i64>,
        slug: &str,
    ) -> Result<Option<PageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_page_by_slug");
        let result = sqlx::query_as::<_, PageEntity>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE parent_id IS ? AND slug = ?"
        ))
        .bind(parent_id)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update title and/or slug.
    pub async fn rename_page(
        &self,
        id: i64,
        title: Option<&str>,
        slug: Option<&str>,
    ) -> Result<PageEntity, sqlx::Error> {
        let timer = QueryTimer::new("rename_page");
        let result = sqlx::query_as::<_, PageEntity>(&format!(
            r#"
            UPDATE pages
            SET title = COALESCE(?2, title),
                slug = COALESCE(?3, slug),
                updated_at = ?4
            WHERE id = ?1
            RETURNING {PAGE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(title)
        .bind(slug)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace the variant payload of a page.
    ///
    /// The payload variant must match the stored kind; a page never
    /// changes kind after creation.
    pub async fn update_content(
        &self,
        id: i64,
        content: &PageContent,
    ) -> Result<PageEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_page_content");

        let stored_kind: PageKindDb = sqlx::query_scalar("SELECT kind FROM pages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        let cols = ContentColumns::from(content);
        if cols.kind != stored_kind {
            return Err(sqlx::Error::Protocol(format!(
                "content kind {} does not match stored page kind",
                content.kind()
            )));
        }

        let result = sqlx::query_as::<_, PageEntity>(&format!(
            r#"
            UPDATE pages
            SET body = ?2,
                gallery_images = ?3,
                about_page_id = ?4,
                gallery_page_id = ?5,
                contact_page_id = ?6,
                updated_at = ?7
            WHERE id = ?1
            RETURNING {PAGE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&cols.body)
        .bind(&cols.gallery_images)
        .bind(cols.about_page_id)
        .bind(cols.gallery_page_id)
        .bind(cols.contact_page_id)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await;

        timer.record();
        result
    }

    /// Mark a page live, stamping the published timestamps.
    pub async fn publish(&self, id: i64) -> Result<PageEntity, sqlx::Error> {
        let timer = QueryTimer::new("publish_page");
        let result = sqlx::query_as::<_, PageEntity>(&format!(
            r#"
            UPDATE pages
            SET live = 1,
                first_published_at = COALESCE(first_published_at, ?2),
                last_published_at = ?2,
                updated_at = ?2
            WHERE id = ?1
            RETURNING {PAGE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Take a page offline. Published timestamps are kept.
    pub async fn unpublish(&self, id: i64) -> Result<PageEntity, sqlx::Error> {
        let timer = QueryTimer::new("unpublish_page");
        let result = sqlx::query_as::<_, PageEntity>(&format!(
            r#"
            UPDATE pages
            SET live = 0, updated_at = ?2
            WHERE id = ?1
            RETURNING {PAGE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a page and its subtree.
    ///
    /// Children go with the parent; menu references elsewhere in the
    /// tree are nulled by the foreign-key action, never cascaded.
    pub async fn delete_page(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_page");
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Resolve the three menu targets of a home page in one query.
    ///
    /// Returns `None` when `id` is not a home page.
    pub async fn resolve_home_menu(
        &self,
        id: i64,
    ) -> Result<Option<HomeMenuEntity>, sqlx::Error> {
        let timer = QueryTimer::new("resolve_home_menu");
        let result = sqlx::query_as::<_, HomeMenuEntity>(
            r#"
            SELECT
                p.id,
                a.id AS about_id, a.slug AS about_slug, a.title AS about_title, a.live AS about_live,
                g.id AS gallery_id, g.slug AS gallery_slug, g.title AS gallery_title, g.live AS gallery_live,
                c.id AS contact_id, c.slug AS contact_slug, c.title AS contact_title, c.live AS contact_live
            FROM pages p
            LEFT JOIN pages a ON a.id = p.about_page_id
            LEFT JOIN pages g ON g.id = p.gallery_page_id
            LEFT JOIN pages c ON c.id = p.contact_page_id
            WHERE p.id = ? AND p.kind = 'home'
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
