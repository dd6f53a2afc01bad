//! Logging setup: stderr for warnings, a daily rolling file for everything.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "APDESK_LOG";

const LOG_FILE_PREFIX: &str = "apdesk.log";

/// Picks the filter directive: environment first, then the configured level.
fn filter_directive(from_env: Option<String>, configured: &str) -> String {
    from_env
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init(logs_dir: &Path, configured_level: &str) -> Result<WorkerGuard> {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), configured_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(LevelFilter::WARN),
        )
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
