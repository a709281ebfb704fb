use crate::config::ScrollConfig;
use crate::error::{ScrollError, ScrollResult};
use crate::scroll::{ScrollPlan, format_secs};
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

async fn run_cmd(program: &Path, args: &[String]) -> ScrollResult<()> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| ScrollError::EncoderSpawn {
            program: program.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(ScrollError::EncoderFailed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

/// Arguments that loop the still strip and pan a viewport across it.
pub fn scroll_args(cfg: &ScrollConfig, plan: &ScrollPlan, strip_png: &Path, out: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-loop".to_string(),
        "1".to_string(),
        "-i".to_string(),
        strip_png.display().to_string(),
        "-vf".to_string(),
        plan.crop_filter(),
        "-t".to_string(),
        format_secs(plan.duration_secs),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        cfg.preset.clone(),
        "-crf".to_string(),
        cfg.crf.to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        "-r".to_string(),
        cfg.fps.to_string(),
        out.display().to_string(),
    ]
}

pub async fn ffmpeg_render_scroll(
    cfg: &ScrollConfig,
    plan: &ScrollPlan,
    strip_png: &Path,
    out: &Path,
) -> ScrollResult<bool> {
    let args = scroll_args(cfg, plan, strip_png, out);
    tracing::debug!(program = %cfg.ffmpeg_path.display(), ?args, "invoking encoder");
    run_cmd(&cfg.ffmpeg_path, &args).await?;
    Ok(out.exists())
}

pub async fn ffprobe_video_dimensions(ffprobe: &Path, path: &Path) -> Result<(u32, u32)> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "csv=s=x:p=0",
        ])
        .arg(path)
        .output()
        .await
        .context("ffprobe execution failed")?;

    if !output.status.success() {
        return Err(anyhow::anyhow!("ffprobe failed"));
    }

    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    parse_dimensions(&text).ok_or_else(|| anyhow::anyhow!("Invalid dimensions: {text:?}"))
}

pub async fn ffprobe_duration_seconds(ffprobe: &Path, path: &Path) -> Result<f64> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .await
        .context("ffprobe duration failed")?;

    if !output.status.success() {
        return Err(anyhow::anyhow!("ffprobe failed"));
    }

    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let duration = text.parse::<f64>().unwrap_or(-1.0);
    if duration <= 0.0 {
        return Err(anyhow::anyhow!("Invalid duration: {text:?}"));
    }
    Ok(duration)
}

fn parse_dimensions(text: &str) -> Option<(u32, u32)> {
    let line = text.lines().next()?;
    let (w, h) = line.split_once('x')?;
    let w = w.trim().parse::<u32>().ok()?;
    let h = h.trim().parse::<u32>().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}
