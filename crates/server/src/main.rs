use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chatstream_core::{
    create_generator, load_config, load_config_from_env, validate_config, Config, LogFormat,
    Script, SessionOrchestrator,
};
use chatstream_server::{api::create_router, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = match load() {
        Ok(config) => config,
        Err(e) => {
            // Logging format is unknown until the config loads
            init_logging(LogFormat::Text);
            return Err(e);
        }
    };

    init_logging(config.logging.format);
    info!("Starting chatstream v{}", VERSION);

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;
    info!("Configuration loaded successfully");

    // Background generator
    let generator =
        create_generator(&config.generator).context("Failed to create artifact generator")?;

    let script = Script::image_reply(Duration::from_millis(config.stream.step_delay_ms));
    script.validate().context("Invalid session script")?;

    let orchestrator = SessionOrchestrator::new(generator, script)
        .with_job_timeout(config.job.timeout_ms.map(Duration::from_millis));
    info!(
        generator = orchestrator.generator_name(),
        steps = orchestrator.script().steps().len(),
        total_pause_ms = orchestrator.script().total_pause().as_millis() as u64,
        job_timeout_ms = ?config.job.timeout_ms,
        "Session orchestrator ready"
    );

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, Arc::new(orchestrator)));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    Ok(())
}

/// Load configuration from `CHATSTREAM_CONFIG` (default `config.toml`).
/// Without a config file, defaults plus environment overrides are used.
fn load() -> Result<Config> {
    let config_path = std::env::var("CHATSTREAM_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    if config_path.exists() {
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))
    } else {
        load_config_from_env().context("Failed to load config from environment")
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
