use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use glam::{DVec2, Vec2};
use infinigrid_assets::{GalleryManifest, load_images};
use infinigrid_common::Viewport;
use infinigrid_input::{InputEvent, InputRouter, WheelDelta};
use infinigrid_layout::GridLayout;
use infinigrid_render::{DebugTextRenderer, Renderer};
use infinigrid_scene::{FrameLoop, Gallery, GalleryInspector, GallerySummary, PlaneInfo};
use infinigrid_scroll::ScrollState;
use serde_json::json;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Simulated refresh interval.
const FRAME_DT: Duration = Duration::from_micros(16_667);

#[derive(Parser)]
#[command(name = "infinigrid-cli", about = "Headless tool for the infinigrid gallery")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the gallery comes from. Without a manifest, defaults are used with
/// `--items` same-sized images.
#[derive(Args, Clone)]
struct GalleryArgs {
    /// Gallery manifest (YAML); supplies layout, scroll and images
    #[arg(long)]
    manifest: Option<PathBuf>,
    /// Number of items when no manifest is given
    #[arg(long, default_value = "12")]
    items: usize,
    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    width: f32,
    /// Viewport height in pixels
    #[arg(long, default_value = "720")]
    height: f32,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default gallery settings
    Info {
        /// Show the settings of this manifest instead of the defaults
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Print grid bounds and item placements for a scroll offset
    Layout {
        #[command(flatten)]
        gallery: GalleryArgs,
        /// Horizontal scroll offset
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        scroll_x: f64,
        /// Vertical scroll offset
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        scroll_y: f64,
    },
    /// Replay scripted wheel/drag input and print the final frame
    Simulate {
        #[command(flatten)]
        gallery: GalleryArgs,
        /// Frames to run after the input
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Wheel delta x in pixels, applied before the first frame
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        wheel_x: f32,
        /// Wheel delta y in pixels, applied before the first frame
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        wheel_y: f32,
        /// Drag distance x in pixels, from the viewport centre
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        drag_x: f32,
        /// Drag distance y in pixels, from the viewport centre
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        drag_y: f32,
        /// Only list planes that are on screen
        #[arg(long)]
        visible_only: bool,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn load_manifest(path: Option<&PathBuf>) -> anyhow::Result<GalleryManifest> {
    match path {
        Some(path) => GalleryManifest::load(path)
            .with_context(|| format!("loading manifest {}", path.display())),
        None => Ok(GalleryManifest::default()),
    }
}

/// Scroll state and gallery built from the command line.
fn build_gallery(args: &GalleryArgs) -> anyhow::Result<(ScrollState, Gallery)> {
    let manifest = load_manifest(args.manifest.as_ref())?;
    let sizes = if args.manifest.is_some() {
        load_images(&manifest.images)
            .iter()
            .map(|img| img.size())
            .collect::<Vec<_>>()
    } else {
        vec![(1200, 1600); args.items]
    };

    let viewport = Viewport::new(args.width, args.height);
    let scroll = ScrollState::new(manifest.scroll);
    let gallery = Gallery::new(manifest.layout, &sizes, viewport, &scroll)?;
    Ok((scroll, gallery))
}

/// Scripted input for a simulation.
struct Script {
    wheel: Vec2,
    drag: Vec2,
    frames: u64,
}

/// Run `script` against the gallery and return the frame count reached.
fn simulate(script: &Script, scroll: &mut ScrollState, gallery: &mut Gallery) -> u64 {
    let mut router = InputRouter::new();

    if script.wheel != Vec2::ZERO {
        router.handle(InputEvent::Wheel(WheelDelta::Pixels(script.wheel)), scroll);
    }
    if script.drag != Vec2::ZERO {
        let start = gallery.viewport().center();
        router.handle(InputEvent::PointerDown(start), scroll);
        router.handle(InputEvent::PointerMove(start + script.drag), scroll);
        router.handle(InputEvent::PointerUp, scroll);
    }
    tracing::debug!(scroll_target = ?scroll.target(), "input applied");

    let mut frame_loop = FrameLoop::new();
    let t0 = Instant::now();
    for i in 0..script.frames {
        let now = t0 + FRAME_DT * i as u32;
        let Some(tick) = frame_loop.tick(now) else {
            break;
        };
        let stats = gallery.frame(scroll, tick.dt);
        tracing::trace!(frame = tick.index, visible = stats.visible, "simulated frame");
    }
    frame_loop.stop();
    frame_loop.frames()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info { manifest } => {
            let manifest = load_manifest(manifest.as_ref())?;
            let l = &manifest.layout;
            println!("infinigrid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("title: {}", manifest.title);
            println!(
                "window: {}x{}",
                manifest.window.width, manifest.window.height
            );
            println!("images: {}", manifest.images.len());
            println!(
                "layout: columns={} visible_columns={} gap={} item_aspect={} stagger={}",
                l.columns, l.visible_columns, l.gap, l.item_aspect, l.stagger
            );
            println!(
                "scroll: ease={} scale={}",
                manifest.scroll.ease, manifest.scroll.scale
            );
        }
        Commands::Layout {
            gallery,
            scroll_x,
            scroll_y,
        } => {
            let manifest = load_manifest(gallery.manifest.as_ref())?;
            let items = if gallery.manifest.is_some() {
                manifest.images.len()
            } else {
                gallery.items
            };
            let viewport = Viewport::new(gallery.width, gallery.height);
            let grid = GridLayout::new(manifest.layout, items, viewport)?;

            println!(
                "Viewport: {}x{}  Scroll: ({scroll_x}, {scroll_y})",
                viewport.width, viewport.height
            );
            println!(
                "Column: width={} bound={}  Item: height={} bound={}  Wrap x={}",
                grid.column_width(),
                grid.col_bound(),
                grid.item_height(),
                grid.item_bound(),
                grid.wrap_size_x()
            );
            for p in grid.placements(DVec2::new(scroll_x, scroll_y)) {
                let on_screen = if p.rect.intersects(&viewport) { "*" } else { " " };
                println!(
                    "{on_screen} [{:>3}] col={} row={} rect=({}, {}, {}x{})",
                    p.item, p.column, p.row, p.rect.left, p.rect.top, p.rect.width, p.rect.height
                );
            }
        }
        Commands::Simulate {
            gallery,
            frames,
            wheel_x,
            wheel_y,
            drag_x,
            drag_y,
            visible_only,
            json,
        } => {
            let (mut scroll, mut g) = build_gallery(&gallery)?;
            let script = Script {
                wheel: Vec2::new(wheel_x, wheel_y),
                drag: Vec2::new(drag_x, drag_y),
                frames,
            };
            let ran = simulate(&script, &mut scroll, &mut g);

            if json {
                let summary: GallerySummary = GalleryInspector::summary(&g, &scroll, ran);
                let viewport = g.viewport();
                let planes = g
                    .planes()
                    .iter()
                    .filter(|p| !visible_only || p.rect().intersects(&viewport))
                    .filter_map(|p| GalleryInspector::inspect_plane(&g, p.index()))
                    .collect::<Vec<PlaneInfo>>();
                let out = json!({ "summary": summary, "planes": planes });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let text = DebugTextRenderer::new()
                    .visible_only(visible_only)
                    .render(&g.view(ran, &scroll));
                print!("{text}");
                println!("{}", GalleryInspector::summary(&g, &scroll, ran));
            }
        }
    }

    Ok(())
}
