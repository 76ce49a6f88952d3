//! Cormorant desktop shim entry point.

mod app;
mod browser;
mod config;
#[cfg(windows)]
mod tray_thread;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting Cormorant desktop shim"
    );

    let nolaunch = std::env::args()
        .skip(1)
        .any(|arg| arg == cormorant_startup::command::NOLAUNCH_FLAG);

    // Load configuration.
    let config = config::Config::load()?;
    tracing::info!(port = config.http_port, "configuration loaded");

    // Build and run the tokio runtime.
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(config, nolaunch))?;

    tracing::info!("desktop shim shut down cleanly");
    Ok(())
}
