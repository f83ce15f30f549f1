use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    allowed_hosts_middleware, metrics_handler, metrics_middleware, security_headers_middleware,
    trace_id,
};
use crate::routes::{contact, health, pages};
use crate::services::{EmailError, EmailService};
use persistence::repositories::PageRepository;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub pages: PageRepository,
    pub email: EmailService,
}

pub fn create_app(config: Config, pool: SqlitePool) -> Result<Router, EmailError> {
    let config = Arc::new(config);
    let email = EmailService::new(config.email.clone())?;

    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        pages: PageRepository::new(pool),
        email,
    };

    // Public routes (no page-tree state beyond the pool)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Versioned API routes
    let api_routes = Router::new()
        .route("/api/v1/pages", get(pages::list_pages))
        .route("/api/v1/pages", post(pages::create_page))
        .route("/api/v1/pages/:id", get(pages::get_page))
        .route("/api/v1/pages/:id", patch(pages::rename_page))
        .route("/api/v1/pages/:id", delete(pages::delete_page))
        .route("/api/v1/pages/:id/content", put(pages::update_content))
        .route("/api/v1/pages/:id/publish", post(pages::publish_page))
        .route("/api/v1/pages/:id/unpublish", post(pages::unpublish_page))
        .route("/api/v1/pages/:id/children", get(pages::get_children))
        .route("/api/v1/pages/:id/menu", get(pages::get_menu))
        .route("/api/v1/panels/:kind", get(pages::get_panels))
        .route("/api/v1/contact", post(contact::submit_contact));

    let static_url = config.static_files.static_url.trim_end_matches('/');
    let media_url = config.static_files.media_url.trim_end_matches('/');

    let router = Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Collected static assets and editor-uploaded media
        .nest_service(static_url, ServeDir::new(&config.static_files.static_root))
        .nest_service(media_url, ServeDir::new(&config.static_files.media_root))
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            config.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        // Host validation runs first; a rejected host never reaches a handler
        .layer(middleware::from_fn_with_state(
            config.clone(),
            allowed_hosts_middleware,
        ))
        .with_state(state);

    Ok(router)
}
