//! sercond - Serial Console Command Daemon
//!
//! Reads newline-terminated command lines, dispatches them through a
//! command registry, tracks usage statistics, and writes human-readable
//! responses. Hardware outputs and platform facts sit behind injected
//! traits; the shipped wiring simulates a board and talks over
//! stdin/stdout.

mod config;
mod console;
mod device;
mod error;
mod handlers;
mod reply;
mod stats;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::console::Console;
use crate::device::{SimulatedBoard, SimulatedOutput};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load_or_default(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        started = %chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        on_unknown = ?config.console.on_unknown,
        "Starting sercond"
    );

    let output = Arc::new(SimulatedOutput::new());
    let board = Arc::new(SimulatedBoard::default());

    let console = Console::new(config, output, board);
    console.run(tokio::io::stdin(), tokio::io::stdout()).await
}
