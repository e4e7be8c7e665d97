//! Costwatch Server
//!
//! Run with: cargo run -- '<thresholds-json>'
//!
//! Arguments:
//! - thresholds: JSON array of thresholds, e.g. '[100, [200, "notify.sh"]]'
//!   (falls back to COSTWATCH_THRESHOLDS)
//!
//! Environment variables:
//! - COSTWATCH_HOST: Bind address (default: 0.0.0.0)
//! - COSTWATCH_PORT: Port number (default: 8080)
//! - COSTWATCH_THRESHOLDS: Threshold JSON when no argument is given
//! - RUST_LOG: Log level (default: info)

use costwatch::api::{run_server, ServerConfig};
use costwatch::thresholds::ThresholdTable;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "costwatch=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Threshold configuration: first CLI argument, or COSTWATCH_THRESHOLDS
    let raw_thresholds = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("COSTWATCH_THRESHOLDS").ok())
    {
        Some(raw) => raw,
        None => {
            tracing::error!(
                "No threshold configuration: pass a JSON array argument or set COSTWATCH_THRESHOLDS"
            );
            return Err("missing threshold configuration".into());
        }
    };

    // Invalid configuration is fatal: fail before binding the socket
    let table = match ThresholdTable::from_json(&raw_thresholds) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("Invalid threshold configuration: {}", e);
            return Err(e.into());
        }
    };

    let host = std::env::var("COSTWATCH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("COSTWATCH_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let config = ServerConfig { host, port };

    tracing::info!("Costwatch configuration:");
    tracing::info!("  Host: {}:{}", config.host, config.port);
    tracing::info!("  Thresholds: {}", table.len());
    for entry in table.entries() {
        if entry.action.is_empty() {
            tracing::info!("    - {} (no action)", entry.threshold);
        } else {
            tracing::info!("    - {} -> {}", entry.threshold, entry.action);
        }
    }

    run_server(config, table).await
}
