use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser};
use tilewipe::{
    BlendMode, FrameIndex, FrameRenderer as _, Progress, RenderConfig, RenderScheduler,
    TileTransition, Timeline,
};

/// Render the tile transition as a PNG sequence.
#[derive(Parser, Debug)]
#[command(name = "tilewipe", version)]
struct Cli {
    /// Frames per second.
    fps: Option<f64>,

    /// Output width in pixels.
    width: Option<u32>,

    /// Output height in pixels.
    height: Option<u32>,

    /// JSON config file; positional arguments and flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames rendered concurrently.
    #[arg(long)]
    workers: Option<usize>,

    /// Output directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// File name prefix for every frame.
    #[arg(long)]
    prefix: Option<String>,

    /// Blend mode for each tile.
    #[arg(long)]
    blend: Option<BlendMode>,

    /// Render only this frame (0-based).
    #[arg(long)]
    frame: Option<u64>,

    /// Print the run plan as JSON and exit without rendering.
    #[arg(long)]
    print_plan: bool,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(serde::Serialize)]
struct Plan {
    fps: f64,
    width: u32,
    height: u32,
    duration_secs: f64,
    frame_count: u64,
    workers: usize,
    out_dir: PathBuf,
}

impl Plan {
    fn new(cfg: &RenderConfig, timeline: &Timeline) -> Self {
        Self {
            fps: timeline.fps().as_f64(),
            width: timeline.canvas().width,
            height: timeline.canvas().height,
            duration_secs: timeline.duration(),
            frame_count: timeline.frame_count(),
            workers: cfg.workers,
            out_dir: cfg.out_dir.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = load_config(&cli)?;
    cfg.validate().context("invalid configuration")?;

    let renderer = TileTransition::new(cfg.transition_opts());
    let timeline = renderer.timeline(cfg.fps()?, cfg.canvas()?)?;
    let plan = Plan::new(&cfg, &timeline);
    tracing::info!(
        fps = plan.fps,
        width = plan.width,
        height = plan.height,
        duration = plan.duration_secs,
        frames = plan.frame_count,
        "render plan"
    );
    if cli.print_plan {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let scheduler = RenderScheduler::new(cfg.workers)?;
    let sink = cfg.sink();

    if let Some(frame) = cli.frame {
        let idx = FrameIndex(frame);
        scheduler
            .render_single(&timeline, &renderer, &sink, idx)
            .with_context(|| format!("render frame {frame}"))?;
        eprintln!("wrote {}", sink.path_for(idx).display());
        return Ok(());
    }

    let stats = scheduler
        .run_with_progress(&timeline, &renderer, &sink, log_progress)
        .with_context(|| format!("render into '{}'", sink.dir().display()))?;
    eprintln!(
        "wrote {} frames to {}",
        stats.frames_rendered,
        sink.dir().display()
    );
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<RenderConfig> {
    let mut cfg = match &cli.config {
        Some(path) => RenderConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(fps) = cli.fps {
        cfg.fps = fps;
    }
    if let Some(width) = cli.width {
        cfg.width = width;
    }
    if let Some(height) = cli.height {
        cfg.height = height;
    }
    if let Some(workers) = cli.workers {
        cfg.workers = workers;
    }
    if let Some(dir) = &cli.out_dir {
        cfg.out_dir = dir.clone();
    }
    if let Some(prefix) = &cli.prefix {
        cfg.file_prefix = prefix.clone();
    }
    if let Some(blend) = cli.blend {
        cfg.blend = blend;
    }
    Ok(cfg)
}

// Logs at every tenth of the run, plus every frame at debug.
fn log_progress(p: Progress) {
    tracing::debug!(done = p.done, total = p.total, "frame done");
    let tenth = |n: u64| n * 10 / p.total.max(1);
    if p.done == p.total || tenth(p.done) != tenth(p.done - 1) {
        tracing::info!(done = p.done, total = p.total, "progress");
    }
}
