//! Item height sources for the demo driver.
//!
//! The engine only sees a height provider closure. These sources produce
//! cheap, deterministic heights so the binary can lay out a believable feed
//! without real content to measure:
//! - `Fixed`: every item the same height
//! - `Cycle`: an explicit list of heights, repeated
//! - `Formula`: `base + (index * step) % modulus`

use crate::layout::ItemIndex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A height source that cannot produce heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidHeightSource {
    /// `Cycle` with no heights.
    #[error("cycle height source needs at least one height")]
    EmptyCycle,
    /// `Formula` with a modulus of 0.
    #[error("formula height source needs a modulus >= 1")]
    ZeroModulus,
}

/// Deterministic per-item heights.
///
/// In TOML:
/// ```toml
/// [heights]
/// kind = "formula"
/// base = 80.0
/// step = 37
/// modulus = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeightSource {
    /// Same height for every item.
    Fixed {
        /// Height of each item.
        height: f64,
    },
    /// Heights taken from the list by `index % heights.len()`.
    Cycle {
        /// Heights to cycle through.
        heights: Vec<f64>,
    },
    /// `base + (index * step) % modulus`.
    Formula {
        /// Minimum height.
        base: f64,
        /// Multiplier applied to the item index.
        step: u64,
        /// Spread of heights above `base`.
        modulus: u64,
    },
}

impl Default for HeightSource {
    fn default() -> Self {
        Self::Formula {
            base: 80.0,
            step: 37,
            modulus: 120,
        }
    }
}

impl HeightSource {
    /// Check that the source can produce a height for every index.
    ///
    /// Individual heights are not checked here; the layout engine reports
    /// unusable heights together with the offending index.
    pub fn validate(&self) -> Result<(), InvalidHeightSource> {
        match self {
            Self::Fixed { .. } => Ok(()),
            Self::Cycle { heights } if heights.is_empty() => Err(InvalidHeightSource::EmptyCycle),
            Self::Cycle { .. } => Ok(()),
            Self::Formula { modulus: 0, .. } => Err(InvalidHeightSource::ZeroModulus),
            Self::Formula { .. } => Ok(()),
        }
    }

    /// Height of the item at `index`.
    ///
    /// Sources that fail [`validate`](Self::validate) yield 0.0 (or `base`
    /// for a zero modulus) rather than panicking.
    pub fn height_at(&self, index: ItemIndex) -> f64 {
        match self {
            Self::Fixed { height } => *height,
            Self::Cycle { heights } => index
                .get()
                .checked_rem(heights.len())
                .and_then(|i| heights.get(i))
                .copied()
                .unwrap_or(0.0),
            Self::Formula {
                base,
                step,
                modulus,
            } => {
                let spread = (index.get() as u64)
                    .wrapping_mul(*step)
                    .checked_rem(*modulus)
                    .unwrap_or(0);
                base + spread as f64
            }
        }
    }
}
