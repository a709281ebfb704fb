use anyhow::Result;
use clap::Parser;
use panel_scroll::{Generator, Reporter, ScrollConfig, init, platform};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "panel-scroll")]
#[command(about = "Render a horizontally scrolling video from frame_*_panel_*.png images", long_about = None)]
struct Cli {
    /// Directory holding frame_<NNN>_panel_<M>.png files
    images_dir: PathBuf,

    /// Where to write the video
    #[arg(default_value = "output/scroll.mp4")]
    output: PathBuf,

    /// JSON file with scroll settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    seconds_per_panel: Option<f64>,

    /// Gap between panels in pixels
    #[arg(long)]
    spacer: Option<u32>,

    #[arg(long)]
    panel_width: Option<u32>,

    #[arg(long)]
    fps: Option<u32>,

    /// Open the output folder when done
    #[arg(long)]
    reveal: bool,
}

impl Cli {
    async fn resolve_config(&self) -> Result<ScrollConfig> {
        let mut cfg = match &self.config {
            Some(path) => ScrollConfig::load(path).await?,
            None => ScrollConfig::default(),
        };
        if let Some(v) = self.seconds_per_panel {
            cfg.seconds_per_panel = v;
        }
        if let Some(v) = self.spacer {
            cfg.spacer_width = v;
        }
        if let Some(v) = self.panel_width {
            cfg.panel_width = v;
        }
        if let Some(v) = self.fps {
            cfg.fps = v;
        }
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let cfg = match cli.resolve_config().await {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::error!("{:#}", err);
            std::process::exit(1);
        }
    };

    if !init::check_ffmpeg(&cfg.ffmpeg_path).await {
        tracing::warn!(
            "FFmpeg not found at '{}'. Please install FFmpeg.",
            cfg.ffmpeg_path.display()
        );
    }

    let generator = Generator::new(cfg, Reporter::new());
    match generator.run(&cli.images_dir, &cli.output).await {
        Ok(report) => {
            tracing::info!(
                panels = report.panel_count,
                strip_width = report.strip_width,
                duration_secs = report.duration_secs,
                "Done: {}",
                report.output.display()
            );
            if cli.reveal {
                platform::reveal_in_folder(&report.output);
            }
            Ok(())
        }
        Err(err) => {
            tracing::error!("Video generation failed: {}", err.chain());
            std::process::exit(1);
        }
    }
}
