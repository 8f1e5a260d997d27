pub mod auth;
pub mod client;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod db;
pub mod error;
pub mod migrations;
pub mod state;
pub mod store;
pub mod types;

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::Output;
use crate::config::AppConfig;
use crate::state::AppState;

/// Initialize structured logging with tracing.
/// Respects RUST_LOG env var; defaults to `info` level for logwatch_lib.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("logwatch_lib=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Startup sequence: config, token store, session restore, then one command.
pub fn run_with_args(args: &[String]) -> Result<Output, String> {
    let config = AppConfig::from_env()?;
    debug!(backend = %config.backend_base, store = ?config.token_store, "Loaded config");

    let state = AppState::from_config(&config)?;

    // A broken store must not block commands that work without a session.
    if let Err(e) = state.auth.initialize_from_storage() {
        warn!(error = %e, "Could not restore session from storage");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {}", e))?;
    runtime.block_on(commands::dispatch(&state, args))
}

pub fn run() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run_with_args(&args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
