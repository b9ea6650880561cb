//! Structured logging.
//!
//! Filtering follows `RUST_LOG` and defaults to `warn`:
//! - `RUST_LOG=debug` - selection, edit and paste transitions
//! - `RUST_LOG=gridedit_core::clipboard=debug` - module-level filtering
//!
//! The interactive editor owns the terminal, so logs go to a daily-rotated
//! `gridedit.log` in the data directory (or `--log-file <DIR>`). Export mode
//! also logs to stderr.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn default_log_dir() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridedit")?;
    Some(proj.data_dir().join("logs"))
}

/// Initialize the tracing subscriber.
pub fn init(log_dir: Option<PathBuf>, console: bool) {
    let file_layer = match log_dir.or_else(default_log_dir) {
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(dir, "gridedit.log");
                Some(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true)
                        .with_filter(env_filter()),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not initialize file logging in {}: {}",
                    dir.display(),
                    e
                );
                None
            }
        },
        None => None,
    };

    let console_layer = console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(env_filter())
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();
}
