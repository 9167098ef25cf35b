//! Gallery assets: the YAML manifest describing a gallery and the decoded
//! images that back each plane.
//!
//! The renderer consumes [`ImageData`] by index; it never touches paths.

mod error;
mod image_data;
mod manifest;

pub use error::AssetError;
pub use image_data::{ImageData, Texels, fit_within, load_images};
pub use manifest::{GalleryManifest, IMAGE_EXTENSIONS, WindowConfig};
