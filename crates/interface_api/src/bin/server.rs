//! Claim Triage - API Server Binary
//!
//! This binary starts the HTTP API server and the claim lifecycle worker.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin triage-api
//!
//! # Run with environment variables
//! TRIAGE_HOST=0.0.0.0 TRIAGE_PORT=8081 TRIAGE_DATA_DIR=./data cargo run --bin triage-api
//! ```
//!
//! # Environment Variables
//!
//! * `TRIAGE_HOST` - Server host (default: 0.0.0.0)
//! * `TRIAGE_PORT` - Server port (default: 8081)
//! * `TRIAGE_DATA_DIR` - Claim database and submissions directory (default: ./data)
//! * `TRIAGE_REFERENCE_DIR` - Labeled reference examples directory (default: ./reference)
//! * `TRIAGE_POLL_INTERVAL_SECS` - Worker polling interval (default: 2)
//! * `TRIAGE_IMAGING_URL` - Imaging inference service base URL
//! * `TRIAGE_TEXT_CLASSIFIER_URL` - Text-classification service base URL
//! * `TRIAGE_TEXT_CLASSIFIER_MODEL` - Model name for the text classifier
//! * `TRIAGE_AGENT_TIMEOUT_SECS` - Timeout for collaborator calls (default: 60)
//! * `TRIAGE_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app_worker::ClaimLifecycleWorker;
use infra_agents::AgentServices;
use infra_store::ClaimStore;
use interface_api::{config::ApiConfig, create_router};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, opens the claim store, connects
/// the collaborator services, spawns the lifecycle worker, and starts the
/// HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - The claim store cannot be opened
/// - A collaborator service handle cannot be constructed
/// - The server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Claim Triage API Server"
    );

    // Open the claim store
    let store = Arc::new(ClaimStore::open(&config.data_dir)?);

    // Construct the collaborator service handles up front; a broken handle
    // fails the boot instead of every later pipeline invocation
    let services = AgentServices::connect(&config.agent_services())?;

    // Spawn the claim lifecycle worker
    let worker = ClaimLifecycleWorker::new(
        store.clone(),
        Arc::new(services.imaging),
        Arc::new(services.text_classifier),
        services.reference,
        config.poll_interval(),
    );
    tokio::spawn(worker.run());

    // Create the API router
    let app = create_router(store, config.clone());

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to default values if environment variables are not set.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| {
        // Fall back to individual env vars or defaults
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("TRIAGE_HOST").unwrap_or(defaults.host),
            port: std::env::var("TRIAGE_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: std::env::var("TRIAGE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            reference_dir: std::env::var("TRIAGE_REFERENCE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.reference_dir),
            poll_interval_secs: std::env::var("TRIAGE_POLL_INTERVAL_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.poll_interval_secs),
            imaging_url: std::env::var("TRIAGE_IMAGING_URL").unwrap_or(defaults.imaging_url),
            text_classifier_url: std::env::var("TRIAGE_TEXT_CLASSIFIER_URL")
                .unwrap_or(defaults.text_classifier_url),
            text_classifier_model: std::env::var("TRIAGE_TEXT_CLASSIFIER_MODEL")
                .unwrap_or(defaults.text_classifier_model),
            agent_timeout_secs: std::env::var("TRIAGE_AGENT_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.agent_timeout_secs),
            log_level: std::env::var("TRIAGE_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
