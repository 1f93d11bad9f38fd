//! Tracing subscriber setup.
//!
//! Diagnostics go to a log file, never to the terminal: the interactive
//! menu owns stdout, and the scripted mode's prompts share it with the
//! user.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

/// Default log location in the system temp dir.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("hypermark.log")
}

/// Initialize the global subscriber writing to `log_file_path`.
///
/// Filtering follows `RUST_LOG` with an INFO default. Returns false if
/// the log file could not be created or a subscriber was already set;
/// logging is best-effort and never blocks startup.
pub fn init_global(log_file_path: &Path) -> bool {
    let log_file = match File::create(log_file_path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    fmt()
        .with_env_filter(env_filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .is_ok()
}
