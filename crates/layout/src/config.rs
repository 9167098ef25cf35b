use serde::{Deserialize, Serialize};

/// Grid shape and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of columns items are distributed across.
    pub columns: usize,
    /// How many columns fit across the viewport; drives the column width.
    pub visible_columns: f32,
    /// Gap between columns and between items, in pixels.
    pub gap: f32,
    /// Item height as a multiple of the column width.
    pub item_aspect: f32,
    /// Extra vertical offset per column index, producing a brick pattern.
    pub stagger: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 4,
            visible_columns: 3.5,
            gap: 50.0,
            item_aspect: 1.3,
            stagger: 100.0,
        }
    }
}

/// Errors from validating a [`LayoutConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout needs at least one column")]
    NoColumns,
    #[error("visible_columns must be positive, got {0}")]
    InvalidVisibleColumns(f32),
    #[error("gap must be a non-negative number, got {0}")]
    InvalidGap(f32),
    #[error("item_aspect must be positive, got {0}")]
    InvalidItemAspect(f32),
    #[error("stagger must be finite, got {0}")]
    InvalidStagger(f32),
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.columns == 0 {
            return Err(LayoutError::NoColumns);
        }
        if !positive(self.visible_columns) {
            return Err(LayoutError::InvalidVisibleColumns(self.visible_columns));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(LayoutError::InvalidGap(self.gap));
        }
        if !positive(self.item_aspect) {
            return Err(LayoutError::InvalidItemAspect(self.item_aspect));
        }
        if !self.stagger.is_finite() {
            return Err(LayoutError::InvalidStagger(self.stagger));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.columns, 4);
        assert_eq!(config.gap, 50.0);
        assert_eq!(config.stagger, 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let base = LayoutConfig::default();
        let cases = [
            (LayoutConfig { columns: 0, ..base }, LayoutError::NoColumns),
            (
                LayoutConfig {
                    visible_columns: 0.0,
                    ..base
                },
                LayoutError::InvalidVisibleColumns(0.0),
            ),
            (
                LayoutConfig { gap: -1.0, ..base },
                LayoutError::InvalidGap(-1.0),
            ),
            (
                LayoutConfig {
                    item_aspect: -2.0,
                    ..base
                },
                LayoutError::InvalidItemAspect(-2.0),
            ),
            (
                LayoutConfig {
                    stagger: f32::INFINITY,
                    ..base
                },
                LayoutError::InvalidStagger(f32::INFINITY),
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn zero_gap_is_allowed() {
        let config = LayoutConfig {
            gap: 0.0,
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
