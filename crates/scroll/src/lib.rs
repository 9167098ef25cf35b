//! Scroll state: the single record every other part of the gallery reads.
//!
//! # Invariants
//! - `current` only moves inside [`ScrollState::step`], once per frame.
//! - Input handlers only write `target` and the drag snapshot `position`.
//! - `target` is never clamped; the grid wrap hides any overflow.

mod config;
mod state;

pub use config::{ScrollConfig, ScrollConfigError};
pub use state::{STRENGTH_FACTOR, ScrollState};
