// explain-service-rs/src/main.rs
// Main entry point for the code explainer gateway.
// Loads configuration from the environment, builds the pipeline once,
// and serves the HTTP surface.

use std::env;
use std::net::SocketAddr;

use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use explain_service::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pipeline = provider_sdk::pipeline_from_env()?;

    if !pipeline.has_credential() {
        // Startup still succeeds; the pipeline reports MissingCredential
        // per request so the operator sees an actionable error body.
        tracing::warn!(
            "{} is not set; explain requests will fail until it is configured",
            pipeline.provider().credential_env()
        );
    }

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(
        "explain-service listening on {} (provider: {})",
        addr,
        pipeline.provider()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(AppState::new(pipeline))).await?;

    Ok(())
}
