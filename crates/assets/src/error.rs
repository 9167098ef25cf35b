use std::path::PathBuf;

use infinigrid_layout::LayoutError;
use infinigrid_scroll::ScrollConfigError;

/// Errors from loading a gallery.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("manifest parse error: {0}")]
    Manifest(#[from] serde_yaml::Error),
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("gallery has no images")]
    Empty,
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("invalid scroll settings: {0}")]
    Scroll(#[from] ScrollConfigError),
}
