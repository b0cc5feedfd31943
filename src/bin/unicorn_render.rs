//! unicorn-render: render a ball-and-bone scene to PNG.
//!
//! Reads a YAML scene config (see `RenderConfig`), renders one frame and
//! writes it as PNG.
//!
//! Run: `unicorn-render --config scene.yaml --output frame.png`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use unicorn_raster::config::{RenderConfig, RenderMode};
use unicorn_raster::debug;
use unicorn_raster::framebuffer::Framebuffer;
use unicorn_raster::output::PngEncoder;
use unicorn_raster::scene::{Figure, Scene};
use unicorn_raster::time_scope;
use unicorn_raster::tracer::{
    draw_tracer, DirectionalLightTracer, PointLightTracer, Tracer, WrappingTracer,
};

/// Render a ball-and-bone scene to PNG
#[derive(Parser, Debug)]
#[command(name = "unicorn-render")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "CPU-only ball-and-bone renderer", long_about = None)]
struct Cli {
    /// Config file path (defaults to the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "unicorn.png")]
    output: PathBuf,

    /// Override raster width
    #[arg(long)]
    width: Option<u32>,

    /// Override raster height
    #[arg(long)]
    height: Option<u32>,

    /// Override render mode (traced or flat)
    #[arg(short, long)]
    mode: Option<RenderMode>,

    /// Enable debug logging to stderr
    #[arg(long)]
    debug: bool,

    /// Trace rows in parallel (requires --features parallel)
    #[arg(long)]
    parallel: bool,
}

fn load_config(cli: &Cli) -> Result<RenderConfig> {
    let mut config = match (&cli.config, RenderConfig::default_path()) {
        (Some(path), _) => RenderConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        (None, Some(path)) => RenderConfig::load_or_default(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        (None, None) => RenderConfig::default(),
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn render_traced(
    config: &RenderConfig,
    scene: &Scene,
    figure: &Figure,
    fb: &mut Framebuffer,
    parallel: bool,
) -> Result<()> {
    time_scope!("unicorn_render", "traced frame");

    let light = DirectionalLightTracer::new(config.lighting.directional);
    let root: Box<dyn WrappingTracer> = figure
        .compose(scene, Some(Box::new(light)), Vec::new())
        .context("failed to build tracer tree")?;

    let root: Box<dyn Tracer> = if config.lighting.point_lights.is_empty() {
        Box::new(root)
    } else {
        let mut lit = PointLightTracer::new(Box::new(root));
        for light in &config.lighting.point_lights {
            lit.add_light(light.position, light.half_life);
        }
        Box::new(lit)
    };
    log::debug!("tracer bounds {:?}", root.bounds());

    if parallel {
        draw_parallel(&*root, fb);
    } else {
        let mut rows = 0usize;
        draw_tracer(&*root, fb, |_| rows += 1);
        log::debug!("traced {rows} rows");
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn draw_parallel(tracer: &dyn Tracer, fb: &mut Framebuffer) {
    unicorn_raster::tracer::draw_tracer_parallel(tracer, fb);
}

#[cfg(not(feature = "parallel"))]
fn draw_parallel(tracer: &dyn Tracer, fb: &mut Framebuffer) {
    log::warn!("built without the parallel feature, tracing serially");
    draw_tracer(tracer, fb, |_| {});
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    debug::init(cli.debug);

    let config = load_config(&cli)?;
    log::info!(
        "rendering {}x{} ({:?})",
        config.width,
        config.height,
        config.mode
    );

    let (mut scene, figure) = config.build_scene();
    let view = config.world_view();
    figure
        .project(&mut scene, &view)
        .context("failed to project scene")?;

    let mut fb = Framebuffer::new(config.width, config.height)?;
    fb.clear(config.background_color().to_rgba());

    let start = Instant::now();
    match config.mode {
        RenderMode::Traced => render_traced(&config, &scene, &figure, &mut fb, cli.parallel)?,
        RenderMode::Flat => figure
            .draw_flat(&scene, &mut fb, config.shading)
            .context("flat render failed")?,
    }
    log::info!("frame rendered in {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

    if let Some((min, max, mean)) = fb.luminance_stats() {
        log::debug!("luminance min {min:.3} max {max:.3} mean {mean:.3}");
    }

    PngEncoder::write_to_file(&fb, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    println!("{}", cli.output.display());
    Ok(())
}
