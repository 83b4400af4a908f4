//! InventoryPro Metrics Server
//!
//! Stateless HTTP front for the derived-metrics rules in `shared`: stock
//! status, cashflow aggregation, order pricing, sales margins and search.
//! Clients post the records they hold and get the computed figures back.

use axum::{routing::get, Router};
use shared::PricingConfig;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use error::AppError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Checked once at startup from `config.pricing`
    pub pricing: PricingConfig,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let pricing = config
            .pricing
            .to_pricing()
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        Ok(Self {
            config: Arc::new(config),
            pricing,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventorypro_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting InventoryPro Metrics Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        "Pricing: tax rate {}, shipping fee {} {}",
        config.pricing.tax_rate,
        config.pricing.shipping_fee,
        config.currency.code.code()
    );

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));

    // Create application state
    let state = AppState::new(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "InventoryPro Metrics API v1.0"
}
