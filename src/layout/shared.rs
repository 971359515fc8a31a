//! Shared-ownership handle with reentrancy detection.
//!
//! A `&mut WaterfallLayout` cannot be reached from inside its own height
//! provider, so plain use is reentrancy-free by construction. Hosts that keep
//! the engine behind shared ownership (a scroll container and its data source
//! both holding it, say) use [`SharedLayout`] instead. Every call borrows the
//! engine; a call made while a layout pass holds the engine fails with
//! [`LayoutError::Reentrancy`], and the pass it interrupted is discarded.

use super::{
    engine::WaterfallLayout,
    params::LayoutParameters,
    placement::ItemPlacement,
    types::{ItemIndex, Rect, Size},
};
use crate::error::LayoutError;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;
use tracing::warn;

/// Cloneable handle to one [`WaterfallLayout`].
///
/// Clones share the same engine. Not `Send`: one handle family per layout
/// context, on one thread.
#[derive(Debug, Clone)]
pub struct SharedLayout {
    engine: Rc<RefCell<WaterfallLayout>>,
    /// Set when a call hit the engine while a pass was running.
    reentered: Rc<Cell<bool>>,
}

impl SharedLayout {
    /// Create a handle to a new, empty engine.
    pub fn new(params: LayoutParameters) -> Self {
        Self {
            engine: Rc::new(RefCell::new(WaterfallLayout::new(params))),
            reentered: Rc::new(Cell::new(false)),
        }
    }

    fn reentrancy(&self) -> LayoutError {
        warn!("layout engine re-entered during a layout pass");
        self.reentered.set(true);
        LayoutError::Reentrancy
    }

    fn engine(&self) -> Result<Ref<'_, WaterfallLayout>, LayoutError> {
        self.engine.try_borrow().map_err(|_| self.reentrancy())
    }

    fn engine_mut(&self) -> Result<RefMut<'_, WaterfallLayout>, LayoutError> {
        self.engine.try_borrow_mut().map_err(|_| self.reentrancy())
    }

    /// See [`WaterfallLayout::prepare`].
    ///
    /// # Errors
    /// In addition to the engine's errors, returns `Reentrancy` if this call
    /// was made from inside a running pass, or if the height provider used
    /// any handle to this engine. In the latter case the pass is discarded.
    pub fn prepare<F>(&self, item_count: usize, height_provider: F) -> Result<(), LayoutError>
    where
        F: Fn(ItemIndex) -> f64,
    {
        let mut engine = self.engine_mut()?;
        self.reentered.set(false);

        let result = engine.prepare(item_count, height_provider);

        if self.reentered.replace(false) {
            engine.invalidate();
            return Err(LayoutError::Reentrancy);
        }
        result
    }

    /// See [`WaterfallLayout::invalidate`].
    pub fn invalidate(&self) -> Result<(), LayoutError> {
        self.engine_mut()?.invalidate();
        Ok(())
    }

    /// See [`WaterfallLayout::set_parameters`].
    pub fn set_parameters(&self, params: LayoutParameters) -> Result<bool, LayoutError> {
        Ok(self.engine_mut()?.set_parameters(params))
    }

    /// See [`WaterfallLayout::is_prepared`].
    pub fn is_prepared(&self) -> Result<bool, LayoutError> {
        Ok(self.engine()?.is_prepared())
    }

    /// See [`WaterfallLayout::content_extent`].
    pub fn content_extent(&self) -> Result<Size, LayoutError> {
        Ok(self.engine()?.content_extent())
    }

    /// See [`WaterfallLayout::placements_intersecting`].
    pub fn placements_intersecting(&self, query: Rect) -> Result<Vec<ItemPlacement>, LayoutError> {
        Ok(self.engine()?.placements_intersecting(query))
    }

    /// See [`WaterfallLayout::placement_for_index`].
    pub fn placement_for_index(
        &self,
        index: ItemIndex,
    ) -> Result<Option<ItemPlacement>, LayoutError> {
        Ok(self.engine()?.placement_for_index(index).copied())
    }
}
