//! Placement information for laid-out items

use super::types::{ColumnIndex, ItemIndex, Rect};
use serde::Serialize;

/// Where one item ended up after a layout pass.
///
/// Computed from the item's height, the column it was assigned to and the
/// layout parameters. Stored in the engine's cache in item index order.
///
/// # Invariants
/// - `frame` is the column slot inset by the cell padding on every side
/// - frames in the same column are ordered by index and never overlap
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemPlacement {
    index: ItemIndex,
    column: ColumnIndex,
    frame: Rect,
}

impl ItemPlacement {
    /// Create new placement. Called by the engine during a layout pass.
    pub(crate) fn new(index: ItemIndex, column: ColumnIndex, frame: Rect) -> Self {
        Self {
            index,
            column,
            frame,
        }
    }

    /// Index of the placed item.
    pub fn index(&self) -> ItemIndex {
        self.index
    }

    /// Column the item was assigned to.
    pub fn column(&self) -> ColumnIndex {
        self.column
    }

    /// Padded frame in content coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }
}
