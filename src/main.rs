use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use repairbook::config::AppConfig;
use repairbook::models::BookingCatalog;
use repairbook::routes;
use repairbook::services::notify::LogNotifier;
use repairbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let catalog = match config.catalog_path.as_deref() {
        Some(path) => {
            tracing::info!("loading catalog from {path}");
            BookingCatalog::from_path(path)?
        }
        None => {
            tracing::info!("using built-in catalog");
            BookingCatalog::default()
        }
    };
    tracing::info!(
        appliances = catalog.appliances.len(),
        technicians = catalog.technicians.len(),
        slots = catalog.slots.len(),
        "catalog ready"
    );

    let state = Arc::new(AppState::new(config.clone(), catalog, Box::new(LogNotifier)));
    let app = routes::app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
