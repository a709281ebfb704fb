use crate::error::{ScrollError, ScrollResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub panel_width: u32,
    /// Falls back to the height of the first panel when unset.
    pub panel_height: Option<u32>,
    pub spacer_width: u32,
    pub background: [u8; 3],
    pub seconds_per_panel: f64,
    pub fps: u32,
    pub crf: u8,
    pub preset: String,
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1920,
            viewport_height: 1080,
            panel_width: 640,
            panel_height: None,
            spacer_width: 1,
            background: [0, 0, 0],
            seconds_per_panel: 3.0,
            fps: 30,
            crf: 23,
            preset: "fast".to_string(),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
        }
    }
}

impl ScrollConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
        let config: ScrollConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> ScrollResult<()> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ScrollError::config("viewport width/height must be non-zero"));
        }
        if self.viewport_width % 2 != 0 || self.viewport_height % 2 != 0 {
            // yuv420p output
            return Err(ScrollError::config(format!(
                "viewport {}x{} must have even dimensions",
                self.viewport_width, self.viewport_height
            )));
        }
        if self.panel_width == 0 {
            return Err(ScrollError::config("panel_width must be non-zero"));
        }
        if self.panel_height == Some(0) {
            return Err(ScrollError::config("panel_height must be non-zero when set"));
        }
        if !self.seconds_per_panel.is_finite() || self.seconds_per_panel <= 0.0 {
            return Err(ScrollError::config(format!(
                "seconds_per_panel must be a positive number, got {}",
                self.seconds_per_panel
            )));
        }
        if self.fps == 0 {
            return Err(ScrollError::config("fps must be non-zero"));
        }
        if self.crf > 51 {
            return Err(ScrollError::config(format!(
                "crf must be within 0..=51, got {}",
                self.crf
            )));
        }
        if self.preset.trim().is_empty() {
            return Err(ScrollError::config("preset must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_landscape_1080p() {
        let cfg = ScrollConfig::default();
        assert_eq!((cfg.viewport_width, cfg.viewport_height), (1920, 1080));
        assert_eq!(cfg.panel_width, 640);
        assert_eq!(cfg.spacer_width, 1);
        assert_eq!(cfg.fps, 30);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ScrollConfig =
            serde_json::from_str(r#"{ "seconds_per_panel": 2.5, "spacer_width": 4 }"#).unwrap();
        assert_eq!(cfg.seconds_per_panel, 2.5);
        assert_eq!(cfg.spacer_width, 4);
        assert_eq!(cfg.viewport_width, 1920);
        assert_eq!(cfg.preset, "fast");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let odd = ScrollConfig {
            viewport_width: 1921,
            ..ScrollConfig::default()
        };
        assert!(matches!(odd.validate(), Err(ScrollError::Config(_))));

        let no_time = ScrollConfig {
            seconds_per_panel: 0.0,
            ..ScrollConfig::default()
        };
        assert!(no_time.validate().is_err());

        let nan_time = ScrollConfig {
            seconds_per_panel: f64::NAN,
            ..ScrollConfig::default()
        };
        assert!(nan_time.validate().is_err());

        let crf = ScrollConfig {
            crf: 60,
            ..ScrollConfig::default()
        };
        assert!(crf.validate().is_err());

        let zero_panel = ScrollConfig {
            panel_height: Some(0),
            ..ScrollConfig::default()
        };
        assert!(zero_panel.validate().is_err());
    }

    #[tokio::test]
    async fn load_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scroll.json");
        std::fs::write(&path, r#"{ "fps": 24, "preset": "veryfast" }"#).unwrap();

        let cfg = ScrollConfig::load(&path).await.unwrap();
        assert_eq!(cfg.fps, 24);
        assert_eq!(cfg.preset, "veryfast");

        let missing = ScrollConfig::load(dir.path().join("nope.json")).await;
        assert!(missing.is_err());
    }
}
