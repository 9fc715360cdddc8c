//! File-backed tracing setup. The terminal belongs to the UI, so log
//! records go to a file in the system temp directory instead of stderr.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_FILE_NAME: &str = "allergen-lookup-tui.log";

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Installs the global subscriber. Level comes from `RUST_LOG`, defaulting
/// to `info`. Failure leaves the app running without logs.
pub fn init() {
    let path = log_path();
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => info!(path = %path.display(), "logging initialised"),
        Err(e) => warn!(error = %e, "tracing init failed"),
    }
}
