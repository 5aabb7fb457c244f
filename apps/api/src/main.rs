use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portfolio_api::config::Config;
use portfolio_api::db::{create_pool, ensure_schema};
use portfolio_api::mailer::SmtpRelay;
use portfolio_api::projects::store::PgProjectStore;
use portfolio_api::routes::build_router;
use portfolio_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    // Mail relay; account settings are checked per request
    let missing = config.mail.missing();
    if missing.is_empty() {
        info!(
            "Mail relay configured: {}:{}",
            config.mail.smtp_host, config.mail.smtp_port
        );
    } else {
        warn!(
            "Contact endpoint will refuse submissions, missing: {}",
            missing.join(", ")
        );
    }
    let mailer = Arc::new(SmtpRelay::new(
        config.mail.smtp_host.clone(),
        config.mail.smtp_port,
    ));

    let state = AppState {
        projects: Arc::new(PgProjectStore::new(db)),
        mailer,
        mail: config.mail.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.cors_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS for the configured front-end origins.
fn build_cors(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    info!("CORS allowed origins: {}", origins.len());
    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
