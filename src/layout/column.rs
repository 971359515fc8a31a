//! Per-column bookkeeping for layout passes and spatial queries.
//!
//! # Complexity
//!
//! - `shortest_column`: O(columns)
//! - `ColumnMembers::push`: O(1) amortized
//! - `ColumnMembers::intersecting`: O(columns · log n + k log k) for k hits

use super::placement::ItemPlacement;
use super::types::{ColumnIndex, Rect};

/// Running state of one column while a layout pass is in progress.
///
/// Discarded when the pass ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ColumnState {
    index: ColumnIndex,
    x_offset: f64,
    current_y: f64,
}

impl ColumnState {
    /// Empty column at the given horizontal offset.
    pub(crate) fn new(index: ColumnIndex, x_offset: f64) -> Self {
        Self {
            index,
            x_offset,
            current_y: 0.0,
        }
    }

    pub(crate) fn index(&self) -> ColumnIndex {
        self.index
    }

    pub(crate) fn x_offset(&self) -> f64 {
        self.x_offset
    }

    /// Bottom of the last item stacked in this column (unpadded).
    pub(crate) fn current_y(&self) -> f64 {
        self.current_y
    }

    /// Stack an item of `height` (unpadded) onto this column.
    pub(crate) fn advance(&mut self, height: f64) {
        self.current_y += height;
    }
}

/// Position of the column with the smallest `current_y`.
///
/// Ties go to the lowest column index. Returns `None` for an empty slice.
pub(crate) fn shortest_column(columns: &[ColumnState]) -> Option<usize> {
    // min_by keeps the first of equal elements
    columns
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.current_y.total_cmp(&b.current_y))
        .map(|(position, _)| position)
}

/// Cache positions grouped by column, each group in ascending index order.
///
/// Frame tops within a column are non-decreasing in index order: each slot
/// starts where the previous one ended, and adding the padding keeps that
/// order under rounding. Frame bottoms are not, since `(y + pad) + (h - 2pad)`
/// rounds per item and a tiny height can land one ulp below its predecessor.
/// Queries therefore search the running maximum of the bottoms, which is
/// monotone by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ColumnMembers {
    columns: Vec<ColumnRun>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ColumnRun {
    positions: Vec<usize>,
    /// `max_bottoms[k]` is the largest frame bottom among `positions[..=k]`.
    max_bottoms: Vec<f64>,
}

impl ColumnMembers {
    /// Empty groups for `count` columns.
    pub(crate) fn with_columns(count: usize) -> Self {
        Self {
            columns: vec![ColumnRun::default(); count],
        }
    }

    /// Record that cache position `position`, whose frame ends at
    /// `frame_bottom`, was placed in `column`.
    pub(crate) fn push(&mut self, column: ColumnIndex, position: usize, frame_bottom: f64) {
        if let Some(run) = self.columns.get_mut(column.get()) {
            let reach = run
                .max_bottoms
                .last()
                .map_or(frame_bottom, |&previous| previous.max(frame_bottom));
            run.positions.push(position);
            run.max_bottoms.push(reach);
        }
    }

    /// Cache positions assigned to `column`, ascending.
    pub(crate) fn members(&self, column: ColumnIndex) -> &[usize] {
        self.columns
            .get(column.get())
            .map(|run| run.positions.as_slice())
            .unwrap_or(&[])
    }

    /// Cache positions whose frames intersect `query`, ascending.
    pub(crate) fn intersecting(&self, placements: &[ItemPlacement], query: &Rect) -> Vec<usize> {
        let mut hits = Vec::new();
        if query.is_empty() {
            return hits;
        }

        for run in &self.columns {
            // Everything before `start` ends at or above the query top
            let start = run.max_bottoms.partition_point(|&bottom| bottom <= query.y);
            // Everything from `end` on starts at or below the query bottom
            let end = run
                .positions
                .partition_point(|&p| placements[p].frame().y < query.bottom());

            if start < end {
                hits.extend(
                    run.positions[start..end]
                        .iter()
                        .copied()
                        .filter(|&p| placements[p].frame().intersects(query)),
                );
            }
        }

        hits.sort_unstable();
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::ItemIndex;

    fn columns_at(heights: &[f64]) -> Vec<ColumnState> {
        heights
            .iter()
            .enumerate()
            .map(|(i, &h)| {
                let mut column = ColumnState::new(ColumnIndex::new(i), i as f64 * 100.0);
                column.advance(h);
                column
            })
            .collect()
    }

    #[test]
    fn new_column_starts_at_zero() {
        let column = ColumnState::new(ColumnIndex::new(2), 200.0);
        assert_eq!(column.index(), ColumnIndex::new(2));
        assert_eq!(column.x_offset(), 200.0);
        assert_eq!(column.current_y(), 0.0);
    }

    #[test]
    fn advance_accumulates_height() {
        let mut column = ColumnState::new(ColumnIndex::new(0), 0.0);
        column.advance(100.0);
        column.advance(30.5);
        assert_eq!(column.current_y(), 130.5);
    }

    #[test]
    fn shortest_column_picks_minimum() {
        assert_eq!(shortest_column(&columns_at(&[100.0, 50.0, 75.0])), Some(1));
    }

    #[test]
    fn shortest_column_breaks_ties_by_lowest_index() {
        assert_eq!(shortest_column(&columns_at(&[0.0, 0.0, 0.0])), Some(0));
        assert_eq!(shortest_column(&columns_at(&[90.0, 40.0, 40.0])), Some(1));
    }

    #[test]
    fn shortest_column_of_nothing_is_none() {
        assert_eq!(shortest_column(&[]), None);
    }

    #[test]
    fn push_ignores_unknown_column() {
        let mut members = ColumnMembers::with_columns(1);
        members.push(ColumnIndex::new(3), 0, 10.0);
        assert_eq!(members, ColumnMembers::with_columns(1));
    }

    #[test]
    fn intersecting_finds_overlapping_run_per_column() {
        // One column, four stacked 10-high items at y = 0, 10, 20, 30
        let placements: Vec<ItemPlacement> = (0..4)
            .map(|i| {
                ItemPlacement::new(
                    ItemIndex::new(i),
                    ColumnIndex::new(0),
                    Rect::new(0.0, i as f64 * 10.0, 50.0, 10.0),
                )
            })
            .collect();
        let mut members = ColumnMembers::with_columns(1);
        for (position, placement) in placements.iter().enumerate() {
            members.push(ColumnIndex::new(0), position, placement.frame().bottom());
        }

        let query = Rect::new(0.0, 15.0, 50.0, 10.0);
        assert_eq!(members.intersecting(&placements, &query), vec![1, 2]);

        // Touching at y = 20 only
        let touching = Rect::new(0.0, 10.0, 50.0, 10.0);
        assert_eq!(members.intersecting(&placements, &touching), vec![1]);

        assert_eq!(members.members(ColumnIndex::new(0)), &[0, 1, 2, 3]);
        assert!(members.members(ColumnIndex::new(1)).is_empty());
    }

    #[test]
    fn intersecting_tolerates_bottom_that_steps_back() {
        // Frame bottoms 10, 9.5, 9.5, 9.5, 30: an early frame reaches further
        // down than the ones right after it
        let frames = [
            Rect::new(0.0, 0.0, 50.0, 10.0),
            Rect::new(0.0, 9.0, 50.0, 0.5),
            Rect::new(0.0, 9.0, 50.0, 0.5),
            Rect::new(0.0, 9.0, 50.0, 0.5),
            Rect::new(0.0, 20.0, 50.0, 10.0),
        ];
        let placements: Vec<ItemPlacement> = frames
            .iter()
            .enumerate()
            .map(|(i, &frame)| ItemPlacement::new(ItemIndex::new(i), ColumnIndex::new(0), frame))
            .collect();
        let mut members = ColumnMembers::with_columns(1);
        for (position, placement) in placements.iter().enumerate() {
            members.push(ColumnIndex::new(0), position, placement.frame().bottom());
        }

        let query = Rect::new(0.0, 9.75, 50.0, 15.0);
        assert_eq!(members.intersecting(&placements, &query), vec![0, 4]);
    }

    #[test]
    fn push_tracks_running_maximum_bottom() {
        let mut members = ColumnMembers::with_columns(1);
        members.push(ColumnIndex::new(0), 0, 10.0);
        members.push(ColumnIndex::new(0), 1, 9.5);
        members.push(ColumnIndex::new(0), 2, 12.0);

        assert_eq!(members.columns[0].max_bottoms, vec![10.0, 10.0, 12.0]);
    }
}
