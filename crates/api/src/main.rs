use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use persistence::repositories::{PgCatalogSource, SubscriptionPlanRepository};
use plan_console_api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    middleware::init_metrics().context("Failed to install Prometheus recorder")?;

    info!("Starting Plan Console API v{}", env!("CARGO_PKG_VERSION"));

    let jwt = config
        .auth
        .jwt_config()
        .context("Invalid admin token configuration")?;

    let pool = persistence::db::create_pool(&config.database.pool_config()).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    let state = app::AppState {
        config: Arc::new(config.clone()),
        jwt: Arc::new(jwt),
        catalog_source: Arc::new(PgCatalogSource::new(
            pool.clone(),
            config.catalog.system_config_id.clone(),
        )),
        plans: Arc::new(SubscriptionPlanRepository::new(pool.clone())),
        pool: Some(pool),
    };

    let app = app::create_app(state);

    let addr = config.socket_addr().context("Invalid server address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
