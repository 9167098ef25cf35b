use glam::DVec2;
use infinigrid_common::{Rect, Viewport, wrap};

use crate::config::{LayoutConfig, LayoutError};

/// Smallest bound the wrap math will use, in pixels.
///
/// Zero-sized columns or items would make the wrap range empty; measured
/// bounds below this are clamped up to it.
pub const MIN_BOUND: f32 = 1.0;

/// Where one gallery item sits on screen this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Index of the item in gallery order.
    pub item: usize,
    pub column: usize,
    /// Position of the item within its column.
    pub row: usize,
    pub rect: Rect,
}

/// Wrap-around grid of columns, each holding a vertical strip of items.
///
/// Items are assigned round-robin: item `k` lives in column `k % columns` at
/// row `k / columns`. Measurements derive from the viewport and are redone
/// on [`resize`](Self::resize).
#[derive(Debug, Clone)]
pub struct GridLayout {
    config: LayoutConfig,
    viewport: Viewport,
    columns: Vec<Vec<usize>>,
    item_count: usize,
    column_width: f32,
    item_height: f32,
    col_bound: f32,
    item_bound: f32,
    wrap_size_x: f32,
}

impl GridLayout {
    /// Build a layout for `item_count` items measured against `viewport`.
    pub fn new(
        config: LayoutConfig,
        item_count: usize,
        viewport: Viewport,
    ) -> Result<Self, LayoutError> {
        config.validate()?;

        let mut columns = vec![Vec::new(); config.columns];
        for item in 0..item_count {
            columns[item % config.columns].push(item);
        }

        let mut layout = Self {
            config,
            viewport,
            columns,
            item_count,
            column_width: 0.0,
            item_height: 0.0,
            col_bound: MIN_BOUND,
            item_bound: MIN_BOUND,
            wrap_size_x: MIN_BOUND,
        };
        layout.measure();
        Ok(layout)
    }

    /// Re-measure every bound against a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.measure();
        tracing::debug!(
            column_width = self.column_width,
            item_height = self.item_height,
            col_bound = self.col_bound,
            wrap_size_x = self.wrap_size_x,
            "grid re-measured"
        );
    }

    fn measure(&mut self) {
        let gap = self.config.gap;
        // Whole pixels, like an element's client size.
        self.column_width = (self.viewport.width / self.config.visible_columns - gap)
            .max(0.0)
            .round();
        self.item_height = (self.column_width * self.config.item_aspect).round();
        self.col_bound = clamp_bound("column", self.column_width + gap);
        self.item_bound = clamp_bound("item", self.item_height + gap);
        self.wrap_size_x = self.col_bound * self.columns.len() as f32;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Item indices in the given column, top to bottom.
    pub fn column_items(&self, column: usize) -> &[usize] {
        self.columns.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    /// Horizontal pitch between columns.
    pub fn col_bound(&self) -> f32 {
        self.col_bound
    }

    /// Vertical pitch between items in a column.
    pub fn item_bound(&self) -> f32 {
        self.item_bound
    }

    /// Width of one full horizontal period of the grid.
    pub fn wrap_size_x(&self) -> f32 {
        self.wrap_size_x
    }

    /// Height of one full vertical period of a column.
    pub fn wrap_size_y(&self, column: usize) -> f32 {
        self.item_bound * self.column_items(column).len() as f32
    }

    /// Wrapped x of a column for a horizontal scroll offset.
    ///
    /// The offset is wrapped in `f64` and only the on-screen result is
    /// narrowed, so whole-pixel truncation holds at any scroll distance.
    pub fn column_x(&self, column: usize, scroll_x: f64) -> f32 {
        let col_bound = f64::from(self.col_bound);
        let unwrapped = (column as f64 * col_bound + scroll_x).trunc();
        wrap(-col_bound, f64::from(self.wrap_size_x) - col_bound, unwrapped) as f32
    }

    /// Wrapped y of an item for a vertical scroll offset.
    ///
    /// Each column adds `column * stagger` to the offset before wrapping.
    pub fn item_y(&self, column: usize, row: usize, scroll_y: f64) -> f32 {
        let item_bound = f64::from(self.item_bound);
        let column_scroll = scroll_y + column as f64 * f64::from(self.config.stagger);
        let unwrapped = (row as f64 * item_bound + column_scroll).trunc();
        let wrap_size = f64::from(self.wrap_size_y(column));
        wrap(-item_bound, wrap_size - item_bound, unwrapped) as f32
    }

    /// On-screen rects for every item, ordered by item index.
    pub fn placements(&self, scroll: DVec2) -> Vec<Placement> {
        let mut out = vec![
            Placement {
                item: 0,
                column: 0,
                row: 0,
                rect: Rect::default(),
            };
            self.item_count
        ];
        for (column, items) in self.columns.iter().enumerate() {
            let x = self.column_x(column, scroll.x);
            for (row, &item) in items.iter().enumerate() {
                let y = self.item_y(column, row, scroll.y);
                out[item] = Placement {
                    item,
                    column,
                    row,
                    rect: Rect::new(x, y, self.column_width, self.item_height),
                };
            }
        }
        out
    }
}

fn clamp_bound(kind: &str, bound: f32) -> f32 {
    if bound >= MIN_BOUND {
        return bound;
    }
    tracing::warn!(kind, bound, "degenerate grid bound, clamping to {MIN_BOUND}px");
    MIN_BOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn layout(items: usize) -> GridLayout {
        GridLayout::new(LayoutConfig::default(), items, Viewport::new(1400.0, 800.0)).unwrap()
    }

    #[test]
    fn measures_from_viewport() {
        let grid = layout(12);
        assert_eq!(grid.column_width(), 350.0);
        assert_eq!(grid.item_height(), 455.0);
        assert_eq!(grid.col_bound(), 400.0);
        assert_eq!(grid.item_bound(), 505.0);
        assert_eq!(grid.wrap_size_x(), 1600.0);
        assert_eq!(grid.wrap_size_y(0), 1515.0);
    }

    #[test]
    fn round_robin_distribution() {
        let grid = layout(10);
        assert_eq!(grid.column_items(0), &[0, 4, 8]);
        assert_eq!(grid.column_items(1), &[1, 5, 9]);
        assert_eq!(grid.column_items(2), &[2, 6]);
        assert_eq!(grid.column_items(3), &[3, 7]);
        assert!(grid.column_items(9).is_empty());
    }

    #[test]
    fn columns_wrap_at_rest() {
        let grid = layout(8);
        assert_eq!(grid.column_x(0, 0.0), 0.0);
        assert_eq!(grid.column_x(1, 0.0), 400.0);
        assert_eq!(grid.column_x(2, 0.0), 800.0);
        // 1200 is the top of the range, so the last column re-enters on the left.
        assert_eq!(grid.column_x(3, 0.0), -400.0);
    }

    #[test]
    fn columns_follow_scroll_and_truncate() {
        let grid = layout(8);
        assert_eq!(grid.column_x(0, -15.7), -15.0);
        assert_eq!(grid.column_x(0, -420.0), 1180.0);
    }

    #[test]
    fn far_offsets_keep_pixel_precision() {
        let grid = layout(8);
        // 1e9 is a whole number of 1600 px periods.
        assert_eq!(grid.column_x(0, 1.0e9 + 400.0), 400.0);
        assert_eq!(grid.column_x(0, -1.0e9 - 15.7), -15.0);
        // Column 0 holds items 0 and 4, a 1010 px period.
        assert_eq!(grid.item_y(0, 0, 1.01e9 + 30.0), 30.0);
    }

    #[test]
    fn items_are_staggered_per_column() {
        let grid = layout(8);
        assert_eq!(grid.item_y(0, 0, 0.0), 0.0);
        assert_eq!(grid.item_y(1, 0, 0.0), 100.0);
        assert_eq!(grid.item_y(2, 0, 0.0), 200.0);
    }

    #[test]
    fn placements_match_item_order() {
        let grid = layout(9);
        let placements = grid.placements(DVec2::new(-15.0, 30.0));
        assert_eq!(placements.len(), 9);
        for (i, p) in placements.iter().enumerate() {
            assert_eq!(p.item, i);
            assert_eq!(p.column, i % 4);
            assert_eq!(p.row, i / 4);
            assert_eq!(p.rect.width, 350.0);
            assert_eq!(p.rect.height, 455.0);
        }
        assert_eq!(placements[0].rect.left, -15.0);
        assert_eq!(placements[0].rect.top, 30.0);
    }

    #[test]
    fn resize_recomputes_bounds() {
        let mut grid = layout(8);
        let before = (grid.col_bound(), grid.wrap_size_x(), grid.item_bound());

        grid.resize(Viewport::new(700.0, 500.0));
        assert_eq!(grid.column_width(), 150.0);
        assert_eq!(grid.col_bound(), 200.0);
        assert_eq!(grid.wrap_size_x(), 800.0);
        assert_eq!(grid.item_bound(), 245.0);
        assert_ne!(before, (grid.col_bound(), grid.wrap_size_x(), grid.item_bound()));

        for p in grid.placements(DVec2::new(-1234.0, 987.0)) {
            assert!(p.rect.left >= -grid.col_bound());
            assert!(p.rect.left < grid.wrap_size_x() - grid.col_bound());
        }
    }

    #[test]
    fn zero_size_bounds_are_clamped() {
        let config = LayoutConfig {
            gap: 0.0,
            ..LayoutConfig::default()
        };
        let grid = GridLayout::new(config, 4, Viewport::new(0.0, 0.0)).unwrap();
        assert_eq!(grid.column_width(), 0.0);
        assert_eq!(grid.col_bound(), MIN_BOUND);
        assert_eq!(grid.item_bound(), MIN_BOUND);
        for p in grid.placements(DVec2::new(37.0, -12.0)) {
            assert!(p.rect.left.is_finite());
            assert!(p.rect.top.is_finite());
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = LayoutConfig {
            columns: 0,
            ..LayoutConfig::default()
        };
        let err = GridLayout::new(config, 3, Viewport::default()).unwrap_err();
        assert_eq!(err, LayoutError::NoColumns);
    }

    #[test]
    fn empty_gallery_has_no_placements() {
        let grid = layout(0);
        assert!(grid.placements(DVec2::new(100.0, 100.0)).is_empty());
    }

    proptest! {
        #[test]
        fn every_position_stays_in_wrap_range(
            sx in -1.0e9f64..1.0e9,
            sy in -1.0e9f64..1.0e9,
            width in 200.0f32..4000.0,
            items in 1usize..40,
        ) {
            let grid = GridLayout::new(
                LayoutConfig::default(),
                items,
                Viewport::new(width, 900.0),
            ).unwrap();
            for p in grid.placements(DVec2::new(sx, sy)) {
                let col_bound = grid.col_bound();
                let item_bound = grid.item_bound();
                prop_assert!(p.rect.left >= -col_bound);
                prop_assert!(p.rect.left < grid.wrap_size_x() - col_bound);
                prop_assert!(p.rect.top >= -item_bound);
                prop_assert!(p.rect.top < grid.wrap_size_y(p.column) - item_bound);
            }
        }
    }
}
