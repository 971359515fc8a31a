//! Layout layer - waterfall placement and viewport queries
//!
//! Places a sequence of variable-height items into balanced columns and
//! answers visibility queries for a scrolling viewport.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes and geometry (ItemIndex, ColumnIndex, Rect, Size)
//! - `params`: LayoutParameters - column count, padding, content width
//! - `placement`: ItemPlacement - where one item ended up
//! - `column`: per-column pass state and the column index used by queries
//! - `engine`: WaterfallLayout - prepare / query / invalidate
//! - `shared`: SharedLayout - shared handle that rejects reentrant use

mod column;
pub mod engine;
pub mod params;
pub mod placement;
pub mod shared;
pub mod types;

pub use engine::WaterfallLayout;
pub use params::LayoutParameters;
pub use placement::ItemPlacement;
pub use shared::SharedLayout;
pub use types::{ColumnIndex, ItemIndex, ParseRectError, Rect, Size};
