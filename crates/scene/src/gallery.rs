use std::time::Duration;

use glam::Vec2;
use infinigrid_common::Viewport;
use infinigrid_layout::{GridLayout, LayoutConfig, LayoutError};
use infinigrid_render::{FrameView, PerspectiveCamera, Plane};
use infinigrid_scroll::ScrollState;

/// What happened during one [`Gallery::frame`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    /// Planes overlapping the viewport after this frame's wrap.
    pub visible: usize,
    /// Plane under the pointer, if any.
    pub hovered: Option<usize>,
    /// Planes whose hover state flipped this frame.
    pub hover_changes: usize,
}

/// The gallery scene: grid layout, one plane per image, and the camera.
pub struct Gallery {
    layout: GridLayout,
    camera: PerspectiveCamera,
    planes: Vec<Plane>,
    viewport: Viewport,
    pointer: Option<Vec2>,
    hovered: Option<usize>,
}

impl Gallery {
    /// Lay out one plane per entry of `image_sizes` (native pixel sizes).
    pub fn new(
        config: LayoutConfig,
        image_sizes: &[(u32, u32)],
        viewport: Viewport,
        scroll: &ScrollState,
    ) -> Result<Self, LayoutError> {
        let layout = GridLayout::new(config, image_sizes.len(), viewport)?;
        let planes = layout
            .placements(scroll.current())
            .into_iter()
            .zip(image_sizes)
            .map(|(placement, &size)| Plane::new(placement.item, size, placement.rect, viewport))
            .collect::<Vec<_>>();

        tracing::info!(
            planes = planes.len(),
            columns = layout.column_count(),
            col_bound = layout.col_bound(),
            item_bound = layout.item_bound(),
            "gallery created"
        );

        Ok(Self {
            layout,
            camera: PerspectiveCamera::new(viewport),
            planes,
            viewport,
            pointer: None,
            hovered: None,
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// React to a viewport change: grid bounds, camera and plane viewport
    /// uniforms are all refreshed before the next frame.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.layout.resize(viewport);
        self.camera.resize(viewport);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            fov = self.camera.fov_degrees(),
            "gallery resized"
        );
    }

    /// Last known pointer position in screen pixels, `None` when it left the window.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    /// Run one frame: step scroll, re-wrap the grid, sync every plane.
    pub fn frame(&mut self, scroll: &mut ScrollState, dt: Duration) -> FrameStats {
        let _span = tracing::info_span!("gallery_frame").entered();

        scroll.step();
        let placements = self.layout.placements(scroll.current());

        for (plane, placement) in self.planes.iter_mut().zip(&placements) {
            plane.update(placement.rect, self.viewport, scroll);
        }

        let hovered = self
            .pointer
            .and_then(|p| self.planes.iter().find(|plane| plane.contains(p)))
            .map(Plane::index);

        let mut stats = FrameStats {
            hovered,
            ..FrameStats::default()
        };
        for plane in &mut self.planes {
            if plane.set_hovered(hovered == Some(plane.index())) {
                stats.hover_changes += 1;
            }
            plane.tick_hover(dt);
            if plane.rect().intersects(&self.viewport) {
                stats.visible += 1;
            }
        }
        self.hovered = hovered;

        tracing::trace!(
            current = ?scroll.current(),
            speed = ?scroll.speed(),
            visible = stats.visible,
            "frame"
        );
        stats
    }

    /// Borrow a read-only view for a renderer.
    pub fn view<'a>(&'a self, frame: u64, scroll: &'a ScrollState) -> FrameView<'a> {
        FrameView {
            frame,
            camera: &self.camera,
            scroll,
            planes: &self.planes,
        }
    }
}
