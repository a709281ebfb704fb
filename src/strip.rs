use crate::error::{ScrollError, ScrollResult};
use crate::panel::Panel;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StripLayout {
    pub panel_width: u32,
    /// Target height for every panel; `None` takes the first panel's height.
    pub panel_height: Option<u32>,
    pub spacer_width: u32,
    pub background: Rgb<u8>,
}

impl Default for StripLayout {
    fn default() -> Self {
        Self {
            panel_width: 640,
            panel_height: None,
            spacer_width: 1,
            background: Rgb([0, 0, 0]),
        }
    }
}

impl StripLayout {
    fn pitch(&self) -> u64 {
        u64::from(self.panel_width) + u64::from(self.spacer_width)
    }
}

/// The composited strip as written to disk.
#[derive(Debug, Clone)]
pub struct Strip {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub panel_count: usize,
}

/// `n * panel_width + (n - 1) * spacer_width`, zero for no panels.
pub fn strip_width(panel_count: usize, panel_width: u32, spacer_width: u32) -> u64 {
    if panel_count == 0 {
        return 0;
    }
    let n = panel_count as u64;
    n * u64::from(panel_width) + (n - 1) * u64::from(spacer_width)
}

pub fn compose_strip(panels: &[Panel], layout: &StripLayout) -> ScrollResult<RgbImage> {
    let Some(first) = panels.first() else {
        return Err(ScrollError::EmptyStrip);
    };
    if layout.panel_width == 0 {
        return Err(ScrollError::layout("panel width must be non-zero"));
    }

    let height = match layout.panel_height {
        Some(h) => h,
        None => image::image_dimensions(&first.path)?.1,
    };
    if height == 0 {
        return Err(ScrollError::layout(format!(
            "first panel '{}' has zero height",
            first.path.display()
        )));
    }

    let total = strip_width(panels.len(), layout.panel_width, layout.spacer_width);
    let width = u32::try_from(total).map_err(|_| {
        ScrollError::layout(format!(
            "{} panels at {}px pitch exceed the maximum image width",
            panels.len(),
            layout.pitch()
        ))
    })?;

    let mut strip = RgbImage::from_pixel(width, height, layout.background);

    let mut x: u64 = 0;
    for panel in panels {
        let img = image::open(&panel.path)?.to_rgb8();
        let img = if img.dimensions() != (layout.panel_width, height) {
            tracing::debug!(
                panel = %panel.path.display(),
                from = ?img.dimensions(),
                to = ?(layout.panel_width, height),
                "resizing panel"
            );
            imageops::resize(&img, layout.panel_width, height, FilterType::Lanczos3)
        } else {
            img
        };

        imageops::replace(&mut strip, &img, x as i64, 0);
        x += layout.pitch();
    }

    Ok(strip)
}

/// Composes the strip and saves it as PNG at `out_path`.
pub fn write_strip(panels: &[Panel], layout: &StripLayout, out_path: &Path) -> ScrollResult<Strip> {
    let image = compose_strip(panels, layout)?;
    image.save_with_format(out_path, ImageFormat::Png)?;

    Ok(Strip {
        path: out_path.to_path_buf(),
        width: image.width(),
        height: image.height(),
        panel_count: panels.len(),
    })
}
