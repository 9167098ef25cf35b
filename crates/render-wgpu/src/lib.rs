//! wgpu render backend for the gallery.
//!
//! Draws one textured, subdivided quad per plane through a perspective camera
//! whose focal plane is pixel-aligned with the window.
//!
//! # Invariants
//! - Renderer never mutates scroll or plane state.
//! - Each frame is a single submission: one clear and one draw per plane.
//! - The surface is cleared to transparent.

mod gpu;
mod shaders;

pub use gpu::{PLANE_SEGMENTS, WgpuRenderer};
