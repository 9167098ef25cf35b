use serde::Serialize;

use crate::gallery::Gallery;
use infinigrid_scroll::ScrollState;

/// Scroll gap below which the gallery counts as at rest.
const SETTLED_EPSILON: f64 = 0.01;

/// Gallery inspector for developer tooling.
///
/// Read-only queries for the HUD and the headless CLI.
pub struct GalleryInspector;

impl GalleryInspector {
    /// Produce a summary of the gallery after `frame` frames.
    pub fn summary(gallery: &Gallery, scroll: &ScrollState, frame: u64) -> GallerySummary {
        let layout = gallery.layout();
        let viewport = gallery.viewport();
        GallerySummary {
            frame,
            current: scroll.current().to_array(),
            target: scroll.target().to_array(),
            speed: scroll.speed().to_array(),
            settled: scroll.is_settled(SETTLED_EPSILON),
            planes: gallery.planes().len(),
            visible: gallery
                .planes()
                .iter()
                .filter(|p| p.rect().intersects(&viewport))
                .count(),
            hovered: gallery.hovered(),
            col_bound: layout.col_bound(),
            item_bound: layout.item_bound(),
            wrap_size_x: layout.wrap_size_x(),
        }
    }

    /// Details of a single plane, `None` if the index is out of range.
    pub fn inspect_plane(gallery: &Gallery, index: usize) -> Option<PlaneInfo> {
        gallery.planes().get(index).map(|plane| {
            let r = plane.rect();
            let u = plane.uniforms();
            PlaneInfo {
                index,
                rect: [r.left, r.top, r.width, r.height],
                parallax: u.parallax.to_array(),
                strength: u.strength.to_array(),
                hover: u.hover,
            }
        })
    }
}

/// Summary of gallery state for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GallerySummary {
    pub frame: u64,
    pub current: [f64; 2],
    pub target: [f64; 2],
    pub speed: [f64; 2],
    pub settled: bool,
    pub planes: usize,
    pub visible: usize,
    pub hovered: Option<usize>,
    pub col_bound: f32,
    pub item_bound: f32,
    pub wrap_size_x: f32,
}

impl std::fmt::Display for GallerySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Gallery: frame={} scroll=({:.1}, {:.1}) target=({:.1}, {:.1}) planes={} visible={} settled={}",
            self.frame,
            self.current[0],
            self.current[1],
            self.target[0],
            self.target[1],
            self.planes,
            self.visible,
            self.settled
        )
    }
}

/// Detailed info about a single plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaneInfo {
    pub index: usize,
    /// `[left, top, width, height]` in screen pixels.
    pub rect: [f32; 4],
    pub parallax: [f32; 2],
    pub strength: [f32; 2],
    pub hover: f32,
}

impl std::fmt::Display for PlaneInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Plane [{}] rect=({:.0}, {:.0}, {:.0}x{:.0}) hover={:.2}",
            self.index, self.rect[0], self.rect[1], self.rect[2], self.rect[3], self.hover
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use infinigrid_common::Viewport;
    use infinigrid_layout::LayoutConfig;
    use std::time::Duration;

    fn gallery(scroll: &ScrollState) -> Gallery {
        Gallery::new(
            LayoutConfig::default(),
            &[(640, 480); 8],
            Viewport::new(1400.0, 800.0),
            scroll,
        )
        .unwrap()
    }

    #[test]
    fn summary_at_rest() {
        let scroll = ScrollState::default();
        let g = gallery(&scroll);
        let summary = GalleryInspector::summary(&g, &scroll, 0);
        assert_eq!(summary.frame, 0);
        assert_eq!(summary.planes, 8);
        assert!(summary.settled);
        assert_eq!(summary.hovered, None);
        assert_eq!(summary.col_bound, 400.0);
        assert_eq!(summary.item_bound, 505.0);
        assert_eq!(summary.wrap_size_x, 1600.0);
    }

    #[test]
    fn summary_while_scrolling() {
        let mut scroll = ScrollState::default();
        let mut g = gallery(&scroll);
        scroll.nudge(Vec2::new(0.0, 50.0));
        g.frame(&mut scroll, Duration::from_millis(16));

        let summary = GalleryInspector::summary(&g, &scroll, 1);
        assert!(!summary.settled);
        assert_eq!(summary.target, [0.0, -150.0]);
        assert!(summary.current[1] < 0.0);
    }

    #[test]
    fn settles_after_a_long_scroll() {
        let mut scroll = ScrollState::default();
        let mut g = gallery(&scroll);
        scroll.nudge(Vec2::new(0.0, -333_332.3));
        for _ in 0..2000 {
            g.frame(&mut scroll, Duration::from_millis(16));
        }

        let summary = GalleryInspector::summary(&g, &scroll, 2000);
        assert!(summary.settled);
        assert!(summary.speed[1].abs() < 0.01);
        assert!(summary.current[1] > 999_000.0);
    }

    #[test]
    fn inspect_plane_found_and_missing() {
        let scroll = ScrollState::default();
        let g = gallery(&scroll);
        let info = GalleryInspector::inspect_plane(&g, 1).unwrap();
        assert_eq!(info.index, 1);
        assert_eq!(info.rect, [400.0, 100.0, 350.0, 455.0]);
        assert!(GalleryInspector::inspect_plane(&g, 99).is_none());
    }

    #[test]
    fn summary_display() {
        let scroll = ScrollState::default();
        let g = gallery(&scroll);
        let s = format!("{}", GalleryInspector::summary(&g, &scroll, 3));
        assert!(s.contains("frame=3"));
        assert!(s.contains("planes=8"));
    }
}
