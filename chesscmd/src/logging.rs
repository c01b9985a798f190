//! Tracing setup: a daily rolling file when a log directory is configured,
//! stderr otherwise. `RUST_LOG` overrides the default `info` filter.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// File name prefix; the appender adds the date.
pub const LOG_FILE_PREFIX: &str = "chesscmd";

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines reach the file.
pub fn init(log_dir: Option<&Path>) -> std::io::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter)
            .init();
        return Ok(None);
    };

    prepare_log_dir(dir)?;
    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    Ok(Some(guard))
}

pub fn prepare_log_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_log_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("logs").join("chesscmd");
        prepare_log_dir(&dir).unwrap();
        assert!(dir.is_dir());
        // Idempotent
        prepare_log_dir(&dir).unwrap();
    }

    #[test]
    fn rejects_file_in_the_way() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("taken");
        std::fs::write(&file, b"").unwrap();
        assert!(prepare_log_dir(&file.join("logs")).is_err());
    }
}
