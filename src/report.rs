//! Layout report printed by the demo binary.

use crate::layout::{ItemIndex, ItemPlacement, LayoutParameters, Rect, Size, WaterfallLayout};
use serde::Serialize;
use std::fmt;

/// Result of looking up one item by index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexLookup {
    /// Requested index.
    pub index: ItemIndex,
    /// Placement, or `None` if the index was not laid out.
    pub placement: Option<ItemPlacement>,
}

/// Snapshot of a prepared layout as seen through one viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    /// Parameters the layout was computed with.
    pub parameters: LayoutParameters,
    /// Number of items laid out.
    pub item_count: usize,
    /// Scrollable content size.
    pub content_size: Size,
    /// Query rectangle.
    pub viewport: Rect,
    /// Placements intersecting the viewport, by index.
    pub visible: Vec<ItemPlacement>,
    /// Explicit index lookups, in request order.
    pub lookups: Vec<IndexLookup>,
}

impl LayoutReport {
    /// Query `layout` for `viewport` and each of `lookups`.
    pub fn build(layout: &WaterfallLayout, viewport: Rect, lookups: &[ItemIndex]) -> Self {
        Self {
            parameters: layout.parameters(),
            item_count: layout.len(),
            content_size: layout.content_extent(),
            viewport,
            visible: layout.placements_intersecting(viewport),
            lookups: lookups
                .iter()
                .map(|&index| IndexLookup {
                    index,
                    placement: layout.placement_for_index(index).copied(),
                })
                .collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn write_placement(f: &mut fmt::Formatter<'_>, placement: &ItemPlacement) -> fmt::Result {
    let frame = placement.frame();
    writeln!(
        f,
        "  {:<6} col {}  x={} y={} w={} h={}",
        placement.index().to_string(),
        placement.column().get(),
        frame.x,
        frame.y,
        frame.width,
        frame.height
    )
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = &self.parameters;
        writeln!(
            f,
            "layout: {} columns, padding {}, width {}",
            params.column_count, params.cell_padding, params.content_width
        )?;
        writeln!(
            f,
            "items: {}, content {} x {}",
            self.item_count, self.content_size.width, self.content_size.height
        )?;
        writeln!(
            f,
            "viewport: x={} y={} w={} h={} ({} visible)",
            self.viewport.x,
            self.viewport.y,
            self.viewport.width,
            self.viewport.height,
            self.visible.len()
        )?;
        for placement in &self.visible {
            write_placement(f, placement)?;
        }

        if !self.lookups.is_empty() {
            writeln!(f, "lookup:")?;
            for lookup in &self.lookups {
                match &lookup.placement {
                    Some(placement) => write_placement(f, placement)?,
                    None => writeln!(f, "  {:<6} not found", lookup.index.to_string())?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worked_example() -> WaterfallLayout {
        let heights = [100.0, 130.0, 160.0, 100.0];
        let mut layout = WaterfallLayout::new(LayoutParameters::new(2, 0.0, 200.0));
        layout.prepare(heights.len(), |i| heights[i.get()]).unwrap();
        layout
    }

    #[test]
    fn build_collects_visible_and_lookups() {
        let layout = worked_example();

        let report = LayoutReport::build(
            &layout,
            Rect::new(0.0, 0.0, 200.0, 120.0),
            &[ItemIndex::new(3), ItemIndex::new(9)],
        );

        assert_eq!(report.item_count, 4);
        assert_eq!(report.content_size, Size::new(200.0, 260.0));
        let visible: Vec<usize> = report.visible.iter().map(|p| p.index().get()).collect();
        assert_eq!(visible, vec![0, 1, 2]);
        assert_eq!(report.lookups.len(), 2);
        assert!(report.lookups[0].placement.is_some());
        assert_eq!(report.lookups[1].placement, None);
    }

    #[test]
    fn text_report_snapshot() {
        let layout = worked_example();

        let report = LayoutReport::build(
            &layout,
            Rect::new(0.0, 120.0, 200.0, 20.0),
            &[ItemIndex::new(2), ItemIndex::new(9)],
        );

        insta::assert_snapshot!(report.to_string(), @r"
layout: 2 columns, padding 0, width 200
items: 4, content 200 x 260
viewport: x=0 y=120 w=200 h=20 (3 visible)
  #1     col 1  x=100 y=0 w=100 h=130
  #2     col 0  x=0 y=100 w=100 h=160
  #3     col 1  x=100 y=130 w=100 h=100
lookup:
  #2     col 0  x=0 y=100 w=100 h=160
  #9     not found
");
    }

    #[test]
    fn json_report_has_expected_shape() {
        let layout = worked_example();
        let report = LayoutReport::build(&layout, Rect::new(0.0, 0.0, 200.0, 50.0), &[]);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["parameters"]["column_count"], 2);
        assert_eq!(json["content_size"]["height"], 260.0);
        assert_eq!(json["visible"].as_array().unwrap().len(), 2);
        assert_eq!(json["visible"][1]["index"], 1);
        assert_eq!(json["visible"][1]["column"], 1);
        assert_eq!(json["visible"][1]["frame"]["x"], 100.0);
        assert!(json["lookups"].as_array().unwrap().is_empty());
    }
}
