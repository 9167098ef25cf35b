use infinigrid_scroll::ScrollState;

use crate::camera::PerspectiveCamera;
use crate::plane::Plane;

/// Everything a renderer may read for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub frame: u64,
    pub camera: &'a PerspectiveCamera,
    pub scroll: &'a ScrollState,
    pub planes: &'a [Plane],
}

/// Renderer-agnostic interface.
///
/// A renderer reads a [`FrameView`] and produces output. It never mutates
/// scroll or plane state; those are owned by the frame driver.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, view: &FrameView<'_>) -> Self::Output;
}

/// Produces a human-readable dump of a frame.
///
/// Used by the headless CLI and in tests where no GPU is available.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Only list planes whose rect overlaps the viewport.
    pub visible_only: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_only(mut self, visible_only: bool) -> Self {
        self.visible_only = visible_only;
        self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, view: &FrameView<'_>) -> String {
        let mut out = String::new();
        let s = view.scroll;
        out.push_str(&format!("=== Frame {} ===\n", view.frame));
        out.push_str(&format!(
            "Scroll: current=({:.2}, {:.2}) target=({:.2}, {:.2}) speed=({:.2}, {:.2})\n",
            s.current().x,
            s.current().y,
            s.target().x,
            s.target().y,
            s.speed().x,
            s.speed().y
        ));
        out.push_str(&format!(
            "Camera: fov={:.2} aspect={:.3} z={:.0}\n",
            view.camera.fov_degrees(),
            view.camera.aspect,
            view.camera.position.z
        ));
        out.push_str(&format!("Planes: {}\n", view.planes.len()));

        for plane in view.planes {
            if self.visible_only && !on_screen(view.camera, plane) {
                continue;
            }
            let r = plane.rect();
            let u = plane.uniforms();
            out.push_str(&format!(
                "  [{:>3}] rect=({:.0}, {:.0}, {:.0}x{:.0}) parallax=({:.4}, {:.4}) strength=({:.2}, {:.2}) hover={:.2}\n",
                plane.index(),
                r.left,
                r.top,
                r.width,
                r.height,
                u.parallax.x,
                u.parallax.y,
                u.strength.x,
                u.strength.y,
                u.hover
            ));
        }

        out
    }
}

fn on_screen(camera: &PerspectiveCamera, plane: &Plane) -> bool {
    let p = plane.position();
    let half = plane.scale() * 0.5;
    let vp = camera.view_projection();
    let a = vp.project_point3(p - half);
    let b = vp.project_point3(p + half);
    a.x.min(b.x) < 1.0 && a.x.max(b.x) > -1.0 && a.y.min(b.y) < 1.0 && a.y.max(b.y) > -1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use infinigrid_common::{Rect, Viewport};

    fn planes(vp: Viewport) -> Vec<Plane> {
        vec![
            Plane::new(0, (100, 100), Rect::new(10.0, 10.0, 100.0, 120.0), vp),
            Plane::new(1, (100, 100), Rect::new(-500.0, 10.0, 100.0, 120.0), vp),
        ]
    }

    #[test]
    fn lists_frame_scroll_and_planes() {
        let vp = Viewport::new(800.0, 600.0);
        let camera = PerspectiveCamera::new(vp);
        let mut scroll = ScrollState::default();
        scroll.nudge(Vec2::new(100.0, 0.0));
        scroll.step();
        let planes = planes(vp);

        let out = DebugTextRenderer::new().render(&FrameView {
            frame: 7,
            camera: &camera,
            scroll: &scroll,
            planes: &planes,
        });

        assert!(out.contains("=== Frame 7 ==="));
        assert!(out.contains("target=(-300.00, 0.00)"));
        assert!(out.contains("Planes: 2"));
        assert!(out.contains("[  0]"));
        assert!(out.contains("[  1]"));
        assert_eq!(out.lines().count(), 6);
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn visible_only_skips_off_screen_planes() {
        let vp = Viewport::new(800.0, 600.0);
        let camera = PerspectiveCamera::new(vp);
        let scroll = ScrollState::default();
        let planes = planes(vp);

        let out = DebugTextRenderer::new().visible_only(true).render(&FrameView {
            frame: 0,
            camera: &camera,
            scroll: &scroll,
            planes: &planes,
        });

        assert!(out.contains("[  0]"));
        assert!(!out.contains("[  1]"));
    }
}
