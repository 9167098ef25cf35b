//! Shared types and scalar helpers used across the gallery crates.
//!
//! All positions are in screen pixels with a top-left origin unless a type
//! says otherwise.

mod math;
mod types;

pub use math::{lerp, map_range, wrap};
pub use types::{Rect, Viewport};
