//! Waterfall layout engine

use super::{
    column::{shortest_column, ColumnMembers, ColumnState},
    params::LayoutParameters,
    placement::ItemPlacement,
    types::{ColumnIndex, ItemIndex, Rect, Size},
};
use crate::error::{ConfigurationError, LayoutError};
use tracing::{debug, trace, warn};

/// Balanced multi-column layout for items of variable height.
///
/// Each item goes to the currently shortest column, so column heights stay
/// as even as the item heights allow. The engine is pull-based: the host
/// hands it an item count and a height provider, and queries the result.
///
/// # Lifecycle
/// - Starts **empty**.
/// - `prepare` runs a full layout pass and makes it **prepared**. Further
///   `prepare` calls are no-ops until `invalidate`.
/// - `invalidate` (or `set_parameters` with different values) drops every
///   placement. The engine cannot see changes to the host's items, so the
///   host calls `invalidate` whenever item count or heights change.
/// - A failed pass leaves the engine empty.
///
/// # Queries
/// `placement_for_index` is O(1). `placements_intersecting` uses per-column
/// binary search on the cached frames.
#[derive(Debug, Clone)]
pub struct WaterfallLayout {
    params: LayoutParameters,
    /// Placements in item index order; position == item index.
    placements: Vec<ItemPlacement>,
    /// Cache positions grouped by column.
    members: ColumnMembers,
    /// Tallest column (unpadded) of the last successful pass.
    content_height: f64,
    prepared: bool,
}

/// Result of a completed pass, installed into the engine in one step.
struct LayoutPass {
    placements: Vec<ItemPlacement>,
    members: ColumnMembers,
    content_height: f64,
}

impl WaterfallLayout {
    /// Create an empty engine. No layout is computed until `prepare`.
    pub fn new(params: LayoutParameters) -> Self {
        Self {
            params,
            placements: Vec::new(),
            members: ColumnMembers::default(),
            content_height: 0.0,
            prepared: false,
        }
    }

    /// Current layout parameters.
    pub fn parameters(&self) -> LayoutParameters {
        self.params
    }

    /// Replace the layout parameters.
    ///
    /// Invalidates the layout when the new parameters differ from the
    /// current ones. Returns whether it did.
    pub fn set_parameters(&mut self, params: LayoutParameters) -> bool {
        if self.params == params {
            return false;
        }
        debug!(old = ?self.params, new = ?params, "layout parameters changed");
        self.params = params;
        self.invalidate();
        true
    }

    /// Whether a layout pass has succeeded since the last invalidation.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Number of placed items.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Check if no items are placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Run a layout pass for `item_count` items.
    ///
    /// Does nothing if the engine is already prepared. `height_provider` is
    /// called exactly once per index, in ascending order, and must return a
    /// finite height > 0.
    ///
    /// # Errors
    /// - `Configuration` if the parameters are invalid; no height is requested
    /// - `Height` for the first item with an unusable height
    ///
    /// On error the engine stays empty.
    pub fn prepare<F>(&mut self, item_count: usize, height_provider: F) -> Result<(), LayoutError>
    where
        F: Fn(ItemIndex) -> f64,
    {
        if self.prepared {
            trace!("layout already prepared, skipping pass");
            return Ok(());
        }

        if let Err(err) = self.params.validate() {
            warn!(error = %err, params = ?self.params, "rejecting layout pass");
            return Err(err.into());
        }

        let pass = compute_layout(&self.params, item_count, height_provider).inspect_err(|err| {
            warn!(error = %err, item_count, "layout pass failed");
        })?;

        self.placements = pass.placements;
        self.members = pass.members;
        self.content_height = pass.content_height;
        self.prepared = true;

        debug!(
            item_count,
            columns = self.params.column_count,
            content_height = self.content_height,
            "layout pass complete"
        );
        Ok(())
    }

    /// Drop every placement and reset the content height.
    ///
    /// Safe to call in any state, any number of times.
    pub fn invalidate(&mut self) {
        if self.prepared {
            debug!(placements = self.placements.len(), "layout invalidated");
        }
        self.placements.clear();
        self.members = ColumnMembers::default();
        self.content_height = 0.0;
        self.prepared = false;
    }

    /// Size of the scrollable content: the content width and the height of
    /// the tallest column. Height is 0 until a pass succeeds.
    pub fn content_extent(&self) -> Size {
        Size::new(self.params.content_width, self.content_height)
    }

    /// All placements, in item index order.
    pub fn placements(&self) -> &[ItemPlacement] {
        &self.placements
    }

    /// Placement of the item at `index`.
    ///
    /// Returns `None` if `index` is outside the last prepared item range,
    /// including when nothing is prepared.
    pub fn placement_for_index(&self, index: ItemIndex) -> Option<&ItemPlacement> {
        self.placements.get(index.get())
    }

    /// Placements whose frames intersect `query`, in item index order.
    ///
    /// Frames that only touch `query` along an edge, and frames with no
    /// area, are not returned.
    pub fn placements_intersecting(&self, query: Rect) -> Vec<ItemPlacement> {
        let hits: Vec<ItemPlacement> = self
            .members
            .intersecting(&self.placements, &query)
            .into_iter()
            .map(|position| self.placements[position])
            .collect();

        trace!(?query, hits = hits.len(), "visibility query");
        hits
    }

    /// Placements assigned to `column`, in item index order.
    pub fn column_placements(&self, column: ColumnIndex) -> impl Iterator<Item = &ItemPlacement> {
        self.members
            .members(column)
            .iter()
            .map(move |&position| &self.placements[position])
    }
}

/// Place `item_count` items. Callers validate `params` first; a pass with
/// no columns still fails rather than placing nothing.
fn compute_layout<F>(
    params: &LayoutParameters,
    item_count: usize,
    height_provider: F,
) -> Result<LayoutPass, LayoutError>
where
    F: Fn(ItemIndex) -> f64,
{
    let column_width = params.column_width();
    let mut columns: Vec<ColumnState> = (0..params.column_count)
        .map(|c| ColumnState::new(ColumnIndex::new(c), c as f64 * column_width))
        .collect();
    let mut members = ColumnMembers::with_columns(params.column_count);
    let mut placements = Vec::with_capacity(item_count);

    for position in 0..item_count {
        let index = ItemIndex::new(position);

        let height = height_provider(index);
        if !(height.is_finite() && height > 0.0) {
            return Err(LayoutError::Height { index, height });
        }

        let target = shortest_column(&columns)
            .ok_or(ConfigurationError::ColumnCount(params.column_count))?;
        let column = &mut columns[target];

        let slot = Rect::new(column.x_offset(), column.current_y(), column_width, height);
        let placement = ItemPlacement::new(index, column.index(), slot.inset(params.cell_padding));
        trace!(%index, column = target, frame = ?placement.frame(), "placed item");

        members.push(column.index(), position, placement.frame().bottom());
        placements.push(placement);
        // Padding is a visual inset only; the column grows by the full height
        column.advance(height);
    }

    let content_height = columns
        .iter()
        .map(ColumnState::current_y)
        .fold(0.0, f64::max);

    Ok(LayoutPass {
        placements,
        members,
        content_height,
    })
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
