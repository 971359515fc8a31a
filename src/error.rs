//! Error types for the waterfall layout crate.
//!
//! Errors are plain `thiserror` enums that compose through `?` and `From`:
//!
//! - [`LayoutError`] - a layout pass failed. The engine is left empty.
//!   - [`ConfigurationError`] - the layout parameters cannot be laid out.
//! - [`AppError`] - top-level error of the demo binary, wrapping layout,
//!   configuration, logging and output failures.
//!
//! Lookup misses are not errors: `placement_for_index` returns `None`
//! for indices outside the last prepared range.

use crate::config::ConfigError;
use crate::layout::types::ItemIndex;
use crate::logging::LoggingError;
use thiserror::Error;

/// Layout parameters that cannot produce a layout.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigurationError {
    /// Fewer than one column requested.
    #[error("column count must be at least 1 (got {0})")]
    ColumnCount(usize),

    /// Content width is negative or not finite.
    #[error("content width must be finite and >= 0 (got {0})")]
    ContentWidth(f64),

    /// Cell padding is negative or not finite.
    #[error("cell padding must be finite and >= 0 (got {0})")]
    CellPadding(f64),
}

/// Failure of a layout pass.
///
/// Every variant is fatal to the `prepare` call that produced it and leaves
/// the engine without placements. Retrying is up to the caller once the
/// triggering condition has been fixed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The layout parameters were rejected before any height was requested.
    #[error("invalid layout parameters: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The height provider returned a height that is not a finite value > 0.
    #[error("height provider returned {height} for item {index}; heights must be finite and > 0")]
    Height {
        /// Item whose height was rejected.
        index: ItemIndex,
        /// The rejected height.
        height: f64,
    },

    /// The engine was used again while one of its layout passes was running,
    /// typically from inside the height provider.
    #[error("layout engine was re-entered during a layout pass")]
    Reentrancy,
}

/// Top-level error of the demo binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// The layout pass failed.
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    /// The report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InvalidHeightSource;

    #[test]
    fn configuration_error_converts_into_layout_error() {
        let err: LayoutError = ConfigurationError::ColumnCount(0).into();
        assert_eq!(
            err,
            LayoutError::Configuration(ConfigurationError::ColumnCount(0))
        );
    }

    #[test]
    fn height_error_message_names_the_index() {
        let err = LayoutError::Height {
            index: ItemIndex::new(17),
            height: -3.0,
        };
        let message = err.to_string();
        assert!(message.contains("#17"), "got: {message}");
        assert!(message.contains("-3"), "got: {message}");
    }

    #[test]
    fn column_count_message_includes_value() {
        let err = ConfigurationError::ColumnCount(0);
        assert_eq!(err.to_string(), "column count must be at least 1 (got 0)");
    }

    #[test]
    fn layout_error_converts_into_app_error() {
        let app: AppError = LayoutError::Reentrancy.into();
        assert!(matches!(app, AppError::Layout(LayoutError::Reentrancy)));
        assert!(app.to_string().starts_with("Layout failed"));
    }

    #[test]
    fn config_error_converts_into_app_error() {
        let app: AppError = ConfigError::HeightSource(InvalidHeightSource::EmptyCycle).into();
        assert!(matches!(app, AppError::Config(_)));
    }
}
