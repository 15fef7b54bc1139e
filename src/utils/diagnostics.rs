//! Process-wide `tracing` subscriber setup.
//!
//! The filter comes from `VIBE_LOG` (same syntax as `RUST_LOG`) and defaults
//! to `warn`. The full-screen chat must never write to the terminal it draws
//! on, so it either logs to a file or discards output.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "VIBE_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

impl LogTarget {
    /// An explicit file wins; otherwise the terminal UI discards and
    /// everything else uses stderr.
    pub fn select(debug_log: Option<PathBuf>, interactive: bool) -> Self {
        match debug_log {
            Some(path) => LogTarget::File(path),
            None if interactive => LogTarget::Discard,
            None => LogTarget::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_tracing(target: &LogTarget) -> Result<(), Box<dyn std::error::Error>> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());
    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::Discard => builder.with_writer(std::io::sink).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
