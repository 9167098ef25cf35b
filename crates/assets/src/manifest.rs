use std::path::{Path, PathBuf};

use infinigrid_layout::LayoutConfig;
use infinigrid_scroll::ScrollConfig;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// File extensions picked up when building a gallery from a directory.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Initial window size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Everything needed to open a gallery: the images and how to lay them out.
///
/// Every section is optional in YAML and falls back to its default. Relative
/// image paths resolve against the manifest's directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryManifest {
    pub title: String,
    pub window: WindowConfig,
    pub images: Vec<PathBuf>,
    pub layout: LayoutConfig,
    pub scroll: ScrollConfig,
}

impl Default for GalleryManifest {
    fn default() -> Self {
        Self {
            title: "infinigrid".into(),
            window: WindowConfig::default(),
            images: Vec::new(),
            layout: LayoutConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

impl GalleryManifest {
    /// Parse a manifest from YAML text without resolving paths.
    pub fn parse(yaml: &str) -> Result<Self, AssetError> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        Ok(manifest)
    }

    /// Load and validate a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest = Self::parse(&text)?;

        let base = path.parent().unwrap_or(Path::new("."));
        for image in &mut manifest.images {
            if image.is_relative() {
                *image = base.join(&*image);
            }
        }

        manifest.validate()?;
        tracing::info!(
            manifest = %path.display(),
            images = manifest.images.len(),
            "gallery manifest loaded"
        );
        Ok(manifest)
    }

    /// Build a default manifest from every image file in `dir`, sorted by name.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let io_err = |source| AssetError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut images = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && has_image_extension(&path) {
                images.push(path);
            }
        }
        images.sort();

        let manifest = Self {
            images,
            ..Self::default()
        };
        manifest.validate()?;
        tracing::info!(dir = %dir.display(), images = manifest.images.len(), "gallery directory scanned");
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), AssetError> {
        if self.images.is_empty() {
            return Err(AssetError::Empty);
        }
        self.layout.validate()?;
        self.scroll.validate()?;
        Ok(())
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
