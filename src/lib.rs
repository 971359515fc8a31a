//! Waterfall (masonry) layout engine.
//!
//! Assigns a sequence of variable-height items to balanced columns, computes
//! each item's frame, and answers viewport visibility queries for a
//! scrolling host.
//!
//! The engine lives in [`layout`]; the remaining modules support the demo
//! driver binary (config, logging, height sources, reports).

pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod report;
pub mod source;

pub use error::{AppError, ConfigurationError, LayoutError};
pub use layout::{
    ItemIndex, ItemPlacement, LayoutParameters, Rect, SharedLayout, Size, WaterfallLayout,
};
