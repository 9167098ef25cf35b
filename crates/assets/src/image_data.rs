use std::borrow::Cow;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};

use crate::error::AssetError;

/// A decoded image in tightly packed RGBA8.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub path: PathBuf,
    /// Native size, the equivalent of an image's natural width/height.
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    /// True when decoding failed and this is a stand-in pixel.
    pub placeholder: bool,
}

impl ImageData {
    /// Decode an image file.
    pub fn decode(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            rgba: rgba.into_raw(),
            placeholder: false,
        })
    }

    /// A 1x1 neutral grey pixel standing in for an image that failed to load.
    pub fn placeholder(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: 1,
            height: 1,
            rgba: vec![128, 128, 128, 255],
            placeholder: true,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixels for a texture no larger than `max_dimension` on either side.
    ///
    /// Oversized images are resampled with the aspect kept; `width`/`height`
    /// on `self` stay native, since cover-fit only needs the ratio.
    pub fn texels(&self, max_dimension: u32) -> Texels<'_> {
        let (width, height) = fit_within(self.size(), max_dimension);
        if (width, height) == self.size() {
            return Texels {
                width,
                height,
                rgba: Cow::Borrowed(&self.rgba),
            };
        }

        let Some(src) = image::RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
        else {
            tracing::warn!(path = %self.path.display(), "pixel buffer does not match image size");
            let grey = Self::placeholder(self.path.clone());
            return Texels {
                width: grey.width,
                height: grey.height,
                rgba: Cow::Owned(grey.rgba),
            };
        };
        let resized = imageops::resize(&src, width, height, FilterType::Triangle);
        tracing::debug!(
            path = %self.path.display(),
            native_width = self.width,
            native_height = self.height,
            width,
            height,
            "image downscaled for upload"
        );
        Texels {
            width,
            height,
            rgba: Cow::Owned(resized.into_raw()),
        }
    }
}

/// Texture-ready RGBA8 pixels, borrowed when no resampling was needed.
#[derive(Debug, Clone)]
pub struct Texels<'a> {
    pub width: u32,
    pub height: u32,
    pub rgba: Cow<'a, [u8]>,
}

/// Largest size with the same aspect that fits in a `max` x `max` square.
///
/// Never upscales and never returns a zero side.
pub fn fit_within(size: (u32, u32), max: u32) -> (u32, u32) {
    let max = max.max(1);
    let (width, height) = (size.0.max(1), size.1.max(1));
    if width <= max && height <= max {
        return (width, height);
    }
    let scale = f64::from(max) / f64::from(width.max(height));
    let fit = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max);
    (fit(width), fit(height))
}

/// Decode every image, substituting a placeholder for any that fail.
///
/// A broken file never aborts the gallery; it is logged and keeps its slot
/// so the grid shape is unchanged.
pub fn load_images(paths: &[PathBuf]) -> Vec<ImageData> {
    paths
        .iter()
        .map(|path| match ImageData::decode(path) {
            Ok(img) => {
                tracing::debug!(path = %path.display(), width = img.width, height = img.height, "image decoded");
                img
            }
            Err(e) => {
                tracing::warn!("{e}; using placeholder");
                ImageData::placeholder(path.clone())
            }
        })
        .collect()
}
