use crate::config::ScrollConfig;
use crate::error::{ScrollError, ScrollResult};

/// How the viewport travels across a strip of a given size.
///
/// The offset is linear in time from 0 to `scroll_distance` and clamped there,
/// so it never decreases and never leaves `[0, scroll_distance]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPlan {
    pub strip_width: u32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub panel_count: u32,
    pub scroll_distance: u32,
    pub duration_secs: f64,
}

impl ScrollPlan {
    pub fn new(strip_width: u32, strip_height: u32, cfg: &ScrollConfig) -> ScrollResult<Self> {
        let distance = i64::from(strip_width) - i64::from(cfg.viewport_width);
        if distance <= 0 {
            return Err(ScrollError::InsufficientScroll {
                strip_width,
                viewport_width: cfg.viewport_width,
            });
        }
        if strip_height < cfg.viewport_height {
            return Err(ScrollError::StripTooShort {
                strip_height,
                viewport_height: cfg.viewport_height,
            });
        }
        if cfg.panel_width == 0 {
            return Err(ScrollError::config("panel_width must be non-zero"));
        }

        let panel_count = strip_width / cfg.panel_width;
        let duration_secs = f64::from(panel_count) * cfg.seconds_per_panel;
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ScrollError::config(format!(
                "scroll duration must be positive, got {duration_secs}"
            )));
        }
        // shorter than a frame, or too short to survive millisecond formatting
        if duration_secs * f64::from(cfg.fps) < 1.0 || duration_secs < 0.001 {
            return Err(ScrollError::config(format!(
                "scroll of {duration_secs}s is shorter than one frame at {} fps",
                cfg.fps
            )));
        }

        Ok(Self {
            strip_width,
            viewport_width: cfg.viewport_width,
            viewport_height: cfg.viewport_height,
            panel_count,
            scroll_distance: distance as u32,
            duration_secs,
        })
    }

    /// Left edge of the viewport at `t` seconds.
    pub fn offset_at(&self, t: f64) -> f64 {
        let distance = f64::from(self.scroll_distance);
        (t * distance / self.duration_secs).clamp(0.0, distance)
    }

    /// `(time, offset)` at every output frame, the final frame included.
    pub fn breakpoints(&self, fps: u32) -> Vec<(f64, f64)> {
        if fps == 0 {
            return Vec::new();
        }
        let frames = (self.duration_secs * f64::from(fps)).ceil() as u64;
        (0..=frames)
            .map(|i| {
                let t = (i as f64 / f64::from(fps)).min(self.duration_secs);
                (t, self.offset_at(t))
            })
            .collect()
    }

    /// ffmpeg crop filter; the clamp is evaluated per frame by the encoder.
    pub fn crop_filter(&self) -> String {
        format!(
            "crop={w}:{h}:'min({d},t*{d}/{t})':0",
            w = self.viewport_width,
            h = self.viewport_height,
            d = self.scroll_distance,
            t = format_secs(self.duration_secs),
        )
    }
}

pub(crate) fn format_secs(secs: f64) -> String {
    format!("{:.3}", secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(viewport_width: u32, viewport_height: u32, panel_width: u32, secs: f64) -> ScrollConfig {
        ScrollConfig {
            viewport_width,
            viewport_height,
            panel_width,
            seconds_per_panel: secs,
            ..ScrollConfig::default()
        }
    }

    #[test]
    fn ten_panels_at_1080p() {
        let plan = ScrollPlan::new(6409, 1080, &cfg(1920, 1080, 640, 3.0)).unwrap();
        assert_eq!(plan.scroll_distance, 4489);
        assert_eq!(plan.panel_count, 10);
        assert_eq!(plan.duration_secs, 30.0);
    }

    #[test]
    fn duration_scales_with_seconds_per_panel() {
        let plan = ScrollPlan::new(6409, 1080, &cfg(1920, 1080, 640, 1.5)).unwrap();
        assert_eq!(plan.duration_secs, 15.0);
    }

    #[test]
    fn single_panel_cannot_scroll() {
        let err = ScrollPlan::new(640, 1080, &cfg(1920, 1080, 640, 3.0)).unwrap_err();
        assert!(matches!(
            err,
            ScrollError::InsufficientScroll {
                strip_width: 640,
                viewport_width: 1920
            }
        ));
    }

    #[test]
    fn strip_exactly_viewport_wide_cannot_scroll() {
        assert!(matches!(
            ScrollPlan::new(1920, 1080, &cfg(1920, 1080, 640, 3.0)),
            Err(ScrollError::InsufficientScroll { .. })
        ));
    }

    #[test]
    fn short_strip_is_rejected() {
        assert!(matches!(
            ScrollPlan::new(6409, 720, &cfg(1920, 1080, 640, 3.0)),
            Err(ScrollError::StripTooShort {
                strip_height: 720,
                viewport_height: 1080
            })
        ));
    }

    #[test]
    fn sub_frame_duration_is_rejected() {
        // 10 panels at 1e-5 s would print as 0.000 in the filter
        let err = ScrollPlan::new(6409, 1080, &cfg(1920, 1080, 640, 1e-5)).unwrap_err();
        assert!(matches!(err, ScrollError::Config(_)), "{err}");

        let slow = ScrollConfig {
            fps: 1,
            ..cfg(1920, 1080, 640, 0.05)
        };
        assert!(ScrollPlan::new(6409, 1080, &slow).is_err());

        let one_frame = ScrollConfig {
            fps: 20,
            ..cfg(1920, 1080, 640, 0.01)
        };
        let plan = ScrollPlan::new(6409, 1080, &one_frame).unwrap();
        assert_ne!(format_secs(plan.duration_secs), "0.000");
    }

    #[test]
    fn offset_is_linear_and_clamped() {
        let plan = ScrollPlan::new(6409, 1080, &cfg(1920, 1080, 640, 3.0)).unwrap();
        assert_eq!(plan.offset_at(-1.0), 0.0);
        assert_eq!(plan.offset_at(0.0), 0.0);
        assert!((plan.offset_at(15.0) - 2244.5).abs() < 1e-9);
        assert_eq!(plan.offset_at(30.0), 4489.0);
        assert_eq!(plan.offset_at(45.0), 4489.0);
    }

    #[test]
    fn breakpoints_never_move_backwards() {
        let plan = ScrollPlan::new(3205, 1080, &cfg(1920, 1080, 640, 0.5)).unwrap();
        let points = plan.breakpoints(30);
        assert_eq!(points.first(), Some(&(0.0, 0.0)));
        let last = points.last().unwrap();
        assert_eq!(last.0, plan.duration_secs);
        assert_eq!(last.1, f64::from(plan.scroll_distance));
        for pair in points.windows(2) {
            assert!(pair[1].0 >= pair[0].0);
            assert!(pair[1].1 >= pair[0].1);
            assert!(pair[1].1 <= f64::from(plan.scroll_distance));
        }
        assert!(plan.breakpoints(0).is_empty());
    }

    #[test]
    fn crop_filter_text() {
        let plan = ScrollPlan::new(6409, 1080, &cfg(1920, 1080, 640, 3.0)).unwrap();
        assert_eq!(
            plan.crop_filter(),
            "crop=1920:1080:'min(4489,t*4489/30.000)':0"
        );
    }
}
