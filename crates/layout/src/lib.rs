//! Grid wrap layout: positions gallery columns and items so the grid appears
//! infinite on both axes.
//!
//! # Invariants
//! - Placements are recomputed from scratch each frame; no incremental state.
//! - Every column x lies in `[-col_bound, wrap_size_x - col_bound)` and every
//!   item y in `[-item_bound, wrap_size_y - item_bound)`.
//! - Bounds are re-measured on every resize and are always positive.

mod config;
mod grid;

pub use config::{LayoutConfig, LayoutError};
pub use grid::{GridLayout, MIN_BOUND, Placement};
