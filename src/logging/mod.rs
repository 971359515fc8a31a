//! Tracing subscriber initialization.
//!
//! Logs go to a file so they never interleave with the report on stdout.
//! Follow them with `tail -f` in a separate terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Split a log path into the directory to create and the file name.
///
/// A bare file name logs into the current directory.
fn split_log_path(log_path: &Path) -> Result<(&Path, &str), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    Ok((directory, file_name))
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects RUST_LOG, defaults to "info" level. Creates the log directory
/// if it doesn't exist.
///
/// # Errors
/// - `InvalidPath` if `log_path` has no file name
/// - `DirectoryCreation` if the directory cannot be created
/// - `SubscriberAlreadySet` if a global subscriber is already installed
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn split_log_path_separates_directory_and_file() {
        let path = Path::new("/var/tmp/waterfall/run.log");
        let (directory, file_name) = split_log_path(path).unwrap();
        assert_eq!(directory, Path::new("/var/tmp/waterfall"));
        assert_eq!(file_name, "run.log");
    }

    #[test]
    fn split_log_path_bare_name_uses_current_directory() {
        let (directory, file_name) = split_log_path(Path::new("waterfall.log")).unwrap();
        assert_eq!(directory, Path::new("."));
        assert_eq!(file_name, "waterfall.log");
    }

    #[test]
    fn split_log_path_rejects_path_without_file_name() {
        let result = split_log_path(Path::new("/"));
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory_if_missing() {
        let test_dir = std::env::temp_dir().join("waterfall_test_logs_create");
        let log_file = test_dir.join("test.log");
        let _ = fs::remove_dir_all(&test_dir);

        // Subscriber may already be set by another test; the directory is
        // created either way
        let _ = init(&log_file);

        assert!(
            test_dir.exists(),
            "Log directory should be created: {:?}",
            test_dir
        );

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let test_dir = std::env::temp_dir().join("waterfall_test_logs_twice");
        let log_file = test_dir.join("test.log");

        let _ = init(&log_file);
        let second = init(&log_file);

        assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));

        let _ = fs::remove_dir_all(&test_dir);
    }
}
