//! Scene: ties scroll state, grid layout and planes together and drives them
//! once per display refresh.
//!
//! # Invariants
//! - Each frame runs in a fixed order: step scroll, re-wrap the grid, sync
//!   every plane, then the backend draws.
//! - The scroll record is owned by the caller and passed in per frame.
//! - A stopped [`FrameLoop`] never yields another frame.

mod frame_loop;
mod gallery;
mod inspector;

pub use frame_loop::{FrameLoop, FrameTick, FrameTimer, LoopState, MAX_FRAME_DT};
pub use gallery::{FrameStats, Gallery};
pub use inspector::{GalleryInspector, GallerySummary, PlaneInfo};
