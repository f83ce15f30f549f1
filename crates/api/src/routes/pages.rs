//! Page tree endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{content_panels, FieldPanel, NewPage, Page, PageContent, PageKind};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_page_published;
use persistence::entities::MenuLink;

/// Query parameters for listing pages.
#[derive(Debug, Deserialize)]
pub struct ListPagesQuery {
    /// Restrict to one page kind.
    pub kind: Option<PageKind>,
    /// Restrict to children of this page. Ignored when `kind` is set.
    pub parent_id: Option<i64>,
}

/// Request body for creating a page.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePageRequest {
    pub parent_id: Option<i64>,
    #[validate(custom(function = "shared::validation::validate_title"))]
    pub title: String,
    /// Defaults to a slug derived from the title.
    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: Option<String>,
    pub content: PageContent,
}

/// Request body for renaming a page.
#[derive(Debug, Deserialize, Validate)]
pub struct RenamePageRequest {
    #[validate(custom(function = "shared::validation::validate_title"))]
    pub title: Option<String>,
    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: Option<String>,
}

/// One entry of the resolved home page menu.
#[derive(Debug, Serialize)]
pub struct MenuLinkResponse {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub live: bool,
}

impl From<MenuLink> for MenuLinkResponse {
    fn from(link: MenuLink) -> Self {
        Self {
            id: link.id,
            slug: link.slug,
            title: link.title,
            live: link.live,
        }
    }
}

/// The resolved navigation menu of a home page.
#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub about: Option<MenuLinkResponse>,
    pub gallery: Option<MenuLinkResponse>,
    pub contact: Option<MenuLinkResponse>,
}

/// List pages, filtered by kind or parent.
///
/// With no filter, returns the root pages.
pub async fn list_pages(
    State(state): State<AppState>,
    Query(query): Query<ListPagesQuery>,
) -> Result<Json<Vec<Page>>, ApiError> {
    let entities = match (query.kind, query.parent_id) {
        (Some(kind), _) => state.pages.list_by_kind(kind).await?,
        (None, Some(parent_id)) => state.pages.find_children(parent_id).await?,
        (None, None) => state.pages.list_roots().await?,
    };
    Ok(Json(entities.into_iter().map(Page::from).collect()))
}

/// Create a page.
///
/// The slug defaults to a sanitized form of the title. New pages start
/// unpublished.
pub async fn create_page(
    State(state): State<AppState>,
    Json(payload): Json<CreatePageRequest>,
) -> Result<(StatusCode, Json<Page>), ApiError> {
    payload.validate()?;

    let slug = payload
        .slug
        .unwrap_or_else(|| shared::slug::slugify(&payload.title));

    warn_on_menu_kind_mismatch(&state, &payload.content).await;

    let new = NewPage {
        parent_id: payload.parent_id,
        slug,
        title: payload.title,
        content: payload.content,
    };
    let entity = state.pages.create_page(&new).await?;
    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// Fetch one page by id.
pub async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Page>, ApiError> {
    let entity = state
        .pages
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Page {} not found", id)))?;
    Ok(Json(entity.into()))
}

/// List the direct children of a page, in sibling order.
pub async fn get_children(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Page>>, ApiError> {
    if state.pages.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Page {} not found", id)));
    }
    let entities = state.pages.find_children(id).await?;
    Ok(Json(entities.into_iter().map(Page::from).collect()))
}

/// Update title and/or slug of a page.
pub async fn rename_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RenamePageRequest>,
) -> Result<Json<Page>, ApiError> {
    payload.validate()?;
    if payload.title.is_none() && payload.slug.is_none() {
        return Err(ApiError::Validation(
            "At least one of title or slug is required".into(),
        ));
    }

    let entity = state
        .pages
        .rename_page(id, payload.title.as_deref(), payload.slug.as_deref())
        .await?;
    Ok(Json(entity.into()))
}

/// Replace the variant payload of a page.
///
/// The payload variant must match the page's kind; pages never change
/// kind after creation.
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(content): Json<PageContent>,
) -> Result<Json<Page>, ApiError> {
    warn_on_menu_kind_mismatch(&state, &content).await;
    let entity = state.pages.update_content(id, &content).await?;
    Ok(Json(entity.into()))
}

/// Publish a page.
pub async fn publish_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Page>, ApiError> {
    let entity = state.pages.publish(id).await?;
    let kind: PageKind = entity.kind.into();
    record_page_published(kind.as_str());
    Ok(Json(entity.into()))
}

/// Take a page offline.
pub async fn unpublish_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Page>, ApiError> {
    let entity = state.pages.unpublish(id).await?;
    Ok(Json(entity.into()))
}

/// Delete a page and its subtree.
///
/// Menu references to deleted pages elsewhere in the tree are cleared,
/// not cascaded.
pub async fn delete_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let deleted = state.pages.delete_page(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("Page {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve the navigation menu of a home page.
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MenuResponse>, ApiError> {
    let menu = state
        .pages
        .resolve_home_menu(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Home page {} not found", id)))?;

    let [about, gallery, contact] = menu.links();
    Ok(Json(MenuResponse {
        about: about.map(Into::into),
        gallery: gallery.map(Into::into),
        contact: contact.map(Into::into),
    }))
}

/// The editor field list for a page kind, in display order.
pub async fn get_panels(Path(kind): Path<PageKind>) -> Json<Vec<FieldPanel>> {
    Json(content_panels(kind))
}

/// Log a warning for every home menu reference that does not point at a
/// page of the hinted kind. The references are stored regardless; the
/// hint drives chooser UIs only.
async fn warn_on_menu_kind_mismatch(state: &AppState, content: &PageContent) {
    let PageContent::Home {
        about_page,
        gallery_page,
        contact_page,
        ..
    } = content
    else {
        return;
    };

    let hints = [
        ("about_page", *about_page, PageKind::About),
        ("gallery_page", *gallery_page, PageKind::Gallery),
        ("contact_page", *contact_page, PageKind::Contact),
    ];

    for (field, target, expected) in hints {
        let Some(target_id) = target else { continue };
        match state.pages.find_by_id(target_id).await {
            Ok(Some(entity)) => {
                let kind: PageKind = entity.kind.into();
                if kind != expected {
                    tracing::warn!(
                        field = field,
                        target_id = target_id,
                        target_kind = %kind,
                        expected_kind = %expected,
                        "Menu reference points at a page of an unexpected kind"
                    );
                }
            }
            Ok(None) => {
                tracing::warn!(
                    field = field,
                    target_id = target_id,
                    "Menu reference points at a missing page"
                );
            }
            Err(err) => {
                tracing::warn!(
                    field = field,
                    target_id = target_id,
                    error = %err,
                    "Could not check menu reference target"
                );
            }
        }
    }
}
