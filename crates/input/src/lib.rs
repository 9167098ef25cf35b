//! Input routing: raw wheel and pointer events mapped onto the scroll target.
//!
//! # Invariants
//! - The router only writes `target` and the drag snapshot, never `current`.
//! - Mouse and touch share one pointer model; the embedding decides which
//!   platform events become [`InputEvent`]s.

pub mod event;
pub mod router;
pub mod wheel;

pub use event::InputEvent;
pub use router::InputRouter;
pub use wheel::{LINE_HEIGHT, PAGE_HEIGHT, WheelDelta};
