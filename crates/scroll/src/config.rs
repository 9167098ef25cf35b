use serde::{Deserialize, Serialize};

/// Tunables for the scroll easing and input gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Fraction of the remaining distance covered per frame.
    pub ease: f32,
    /// Multiplier applied to wheel and drag deltas.
    pub scale: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            ease: 0.05,
            scale: 3.0,
        }
    }
}

/// Errors from validating a [`ScrollConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScrollConfigError {
    #[error("ease must be in (0, 1], got {0}")]
    EaseOutOfRange(f32),
    #[error("scale must be finite, got {0}")]
    NonFiniteScale(f32),
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<(), ScrollConfigError> {
        if self.ease.is_nan() || self.ease <= 0.0 || self.ease > 1.0 {
            return Err(ScrollConfigError::EaseOutOfRange(self.ease));
        }
        if !self.scale.is_finite() {
            return Err(ScrollConfigError::NonFiniteScale(self.scale));
        }
        Ok(())
    }
}
