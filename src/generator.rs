use crate::config::ScrollConfig;
use crate::error::{ScrollError, ScrollResult};
use crate::ffmpeg;
use crate::init::ensure_parent_dir;
use crate::panel::load_panels;
use crate::scroll::ScrollPlan;
use crate::strip::{Strip, StripLayout, write_strip};
use crate::Reporter;
use image::Rgb;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::fs;

const STRIP_FILE: &str = "strip.png";

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ScrollReport {
    pub output: PathBuf,
    pub panel_count: usize,
    pub strip_width: u32,
    pub strip_height: u32,
    pub scroll_distance: u32,
    pub duration_secs: f64,
}

/// Turns a directory of panels into one horizontally scrolling video.
pub struct Generator {
    cfg: ScrollConfig,
    reporter: Reporter,
}

impl Generator {
    pub fn new(cfg: ScrollConfig, reporter: Reporter) -> Self {
        Self { cfg, reporter }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.cfg
    }

    fn layout(&self) -> StripLayout {
        StripLayout {
            panel_width: self.cfg.panel_width,
            panel_height: self.cfg.panel_height,
            spacer_width: self.cfg.spacer_width,
            background: Rgb(self.cfg.background),
        }
    }

    pub async fn run(&self, images_dir: &Path, output: &Path) -> ScrollResult<ScrollReport> {
        let log = &self.reporter;
        self.cfg.validate()?;

        log.info(format!("Loading panels from {}", images_dir.display()));
        let panels = load_panels(images_dir)?;
        if panels.is_empty() {
            return Err(ScrollError::NoPanels {
                dir: images_dir.to_path_buf(),
            });
        }
        log.ok(format!("Loaded {} panels", panels.len()));

        // removed on drop, whichever way this function returns
        let work = tempfile::Builder::new().prefix("panel-scroll-").tempdir()?;

        log.info(format!(
            "Joining panels (spacer: {}px)...",
            self.cfg.spacer_width
        ));
        let strip_path = work.path().join(STRIP_FILE);
        let strip = compose_blocking(panels, self.layout(), strip_path).await?;
        log.ok(format!(
            "Strip saved: {}x{} ({} panels, {} spacers)",
            strip.width,
            strip.height,
            strip.panel_count,
            strip.panel_count.saturating_sub(1)
        ));

        let plan = ScrollPlan::new(strip.width, strip.height, &self.cfg)?;
        log.info(format!(
            "Rendering scroll: {} panels, {:.1}s, {}px travel",
            plan.panel_count, plan.duration_secs, plan.scroll_distance
        ));

        let staged = work.path().join(staged_name(output));
        if !ffmpeg::ffmpeg_render_scroll(&self.cfg, &plan, &strip.path, &staged).await? {
            return Err(ScrollError::Other(anyhow::anyhow!(
                "ffmpeg reported success but wrote no file at {}",
                staged.display()
            )));
        }

        ensure_parent_dir(output).await?;
        move_file(&staged, output).await?;
        log.ok(format!("Video written: {}", output.display()));

        self.probe(output, &plan).await;

        Ok(ScrollReport {
            output: output.to_path_buf(),
            panel_count: strip.panel_count,
            strip_width: strip.width,
            strip_height: strip.height,
            scroll_distance: plan.scroll_distance,
            duration_secs: plan.duration_secs,
        })
    }

    async fn probe(&self, output: &Path, plan: &ScrollPlan) {
        let log = &self.reporter;
        let ffprobe = &self.cfg.ffprobe_path;

        match ffmpeg::ffprobe_video_dimensions(ffprobe, output).await {
            Ok((w, h)) if (w, h) == (plan.viewport_width, plan.viewport_height) => {
                log.ok(format!("Probed size: {}x{}", w, h));
            }
            Ok((w, h)) => log.warn(format!(
                "Probed size {}x{} differs from viewport {}x{}",
                w, h, plan.viewport_width, plan.viewport_height
            )),
            Err(err) => log.warn(format!("Could not probe output size: {}", err)),
        }

        match ffmpeg::ffprobe_duration_seconds(ffprobe, output).await {
            Ok(d) => log.ok(format!(
                "Probed duration: {:.2}s (planned {:.2}s)",
                d, plan.duration_secs
            )),
            Err(err) => log.warn(format!("Could not probe output duration: {}", err)),
        }
    }
}

async fn compose_blocking(
    panels: Vec<crate::panel::Panel>,
    layout: StripLayout,
    out: PathBuf,
) -> ScrollResult<Strip> {
    tokio::task::spawn_blocking(move || write_strip(&panels, &layout, &out))
        .await
        .map_err(|e| ScrollError::Other(anyhow::anyhow!("strip task failed: {e}")))?
}

/// Name for the encoder's output inside the work dir; keeps the caller's
/// extension so ffmpeg picks the same container.
fn staged_name(output: &Path) -> String {
    let ext = output
        .extension()
        .and_then(OsStr::to_str)
        .filter(|e| !e.is_empty())
        .unwrap_or("mp4");
    format!("scroll.{ext}")
}

/// Moves the finished video to `to` without ever exposing a partial file there.
///
/// The bytes are first copied into a temp file beside `to`, then renamed over
/// it, so a failed copy leaves any earlier output untouched.
async fn move_file(from: &Path, to: &Path) -> ScrollResult<()> {
    let parent = match to.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let landing = tempfile::Builder::new()
        .prefix(".panel-scroll-")
        .suffix(".part")
        .tempfile_in(&parent)?;

    // dropping `landing` on error removes the partial copy
    fs::copy(from, landing.path()).await?;
    landing.persist(to).map_err(|e| ScrollError::Io(e.error))?;

    let _ = fs::remove_file(from).await;
    Ok(())
}
