//! Rendering model: everything a backend needs to draw the gallery, without
//! any GPU types.
//!
//! # Invariants
//! - One world unit at the camera's focal distance is one screen pixel, so
//!   planes are sized directly in pixels.
//! - Planes mirror their item's screen rect exactly every frame.
//! - Renderers read planes and scroll state; they never mutate them.

mod camera;
mod hover;
mod plane;
mod renderer;

pub use camera::{CAMERA_DISTANCE, PerspectiveCamera};
pub use hover::{HOVER_DURATION, HoverPhase, HoverTween, ease_out_cubic};
pub use plane::{
    PARALLAX_IN, PARALLAX_OUT, PLANE_Z, Plane, PlaneUniforms, parallax_for,
};
pub use renderer::{DebugTextRenderer, FrameView, Renderer};
