use anyhow::Result;
use portfolio_api::{app, config, middleware};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration; this also merges the local .env secrets file
    // into the environment (missing file is fine).
    let base_dir = std::env::current_dir()?;
    let config = config::Config::load(base_dir)?;

    // Initialize logging and metrics
    middleware::logging::init_logging(&config.logging);
    middleware::metrics::init_metrics();

    info!("Starting portfolio backend v{}", env!("CARGO_PKG_VERSION"));
    if !config.debug {
        info!("Production security settings active (HSTS, HTTPS redirect, secure cookies)");
    } else {
        warn!("Debug mode enabled; production security settings are inactive");
    }

    // Create database pool
    let pool = persistence::db::create_pool(&config.database).await?;

    // Run migrations before the schema is touched by any request
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/migrations").run(&pool).await?;
    info!("Migrations completed");

    // Build application
    let app = app::create_app(config.clone(), pool)?;

    // Start server
    let addr = config.server.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
