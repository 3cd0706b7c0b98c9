// src/main.rs
mod config;
mod error;
mod signature;
mod types;
mod webhook;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, SECRET_VAR};
use webhook::{TracingSink, WebhookReceiver, WEBHOOK_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    if config.secret.is_none() {
        warn!("{SECRET_VAR} is not set; deliveries will be rejected with 500");
    }

    let receiver = Arc::new(WebhookReceiver::new(&config, Arc::new(TracingSink)));
    let app = webhook::router(receiver);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!("Listening on http://{}{WEBHOOK_PATH}", config.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
