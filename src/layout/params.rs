//! Layout parameters for invalidation tracking.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Parameters that shape a waterfall layout.
///
/// Fixed for the duration of one layout pass. Any change invalidates every
/// cached placement.
///
/// # Equality Semantics
/// Two LayoutParameters are equal if they would produce identical layouts
/// for the same items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParameters {
    /// Number of columns. Must be >= 1.
    pub column_count: usize,
    /// Inset applied to every side of each item's frame.
    pub cell_padding: f64,
    /// Total width shared evenly by the columns.
    pub content_width: f64,
}

impl LayoutParameters {
    /// Create new layout parameters.
    pub fn new(column_count: usize, cell_padding: f64, content_width: f64) -> Self {
        Self {
            column_count,
            cell_padding,
            content_width,
        }
    }

    /// Check that a layout can be computed with these parameters.
    ///
    /// # Errors
    /// - `ColumnCount` if `column_count < 1`
    /// - `ContentWidth` if `content_width` is negative, NaN or infinite
    /// - `CellPadding` if `cell_padding` is negative, NaN or infinite
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.column_count < 1 {
            return Err(ConfigurationError::ColumnCount(self.column_count));
        }
        if !(self.content_width.is_finite() && self.content_width >= 0.0) {
            return Err(ConfigurationError::ContentWidth(self.content_width));
        }
        if !(self.cell_padding.is_finite() && self.cell_padding >= 0.0) {
            return Err(ConfigurationError::CellPadding(self.cell_padding));
        }
        Ok(())
    }

    /// Width of a single column, unpadded.
    ///
    /// Only meaningful once [`validate`](Self::validate) has succeeded.
    pub fn column_width(&self) -> f64 {
        self.content_width / self.column_count as f64
    }
}
