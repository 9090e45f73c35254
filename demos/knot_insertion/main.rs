//! Knot-insertion animation demo.
//!
//! Builds a clamped quadratic B-spline, inserts one knot at the
//! mid-parameter, and writes one SVG frame per animation step showing the
//! two inserted control points sliding onto the original middle point.
//!
//! Usage:
//! ```text
//! cargo run --example knot_insertion                  # 100 frames into ./frames
//! cargo run --example knot_insertion -- 1000          # one full cycle
//! cargo run --example knot_insertion -- 1000 /tmp/out
//! ```

use std::fs;
use std::path::Path;

use knotvis::error::RenderError;
use knotvis::render::FrameRenderer;
use knotvis::scene::InsertionScene;
use knotvis::tessellation::TessellationParams;
use knotvis::KnotvisError;
use tracing::info;

fn main() -> Result<(), KnotvisError> {
    // Default: WARN for everything, INFO for the demo and the library.
    // Override with the RUST_LOG env var.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("knot_insertion=info".parse().unwrap_or_default())
        .add_directive("knotvis=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let frames: usize = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(100);
    let out_dir = args.next().unwrap_or_else(|| "frames".to_string());

    let mut scene = InsertionScene::new()?;
    let renderer = FrameRenderer::new(TessellationParams::default());

    fs::create_dir_all(&out_dir).map_err(RenderError::from)?;
    for frame in 0..frames {
        scene.update()?;
        let svg = renderer.render(&scene)?;
        let path = Path::new(&out_dir).join(format!("frame_{frame:04}.svg"));
        fs::write(path, svg).map_err(RenderError::from)?;
        scene.advance();
    }

    info!("wrote {frames} frames to {out_dir}");
    Ok(())
}
