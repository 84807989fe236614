//! Gradient placeholder artwork for builds without final branding.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::convert::{ConvertReport, backup_once};
use crate::plan::IconPlan;
use crate::source::save_png;
use crate::{Error, Result};

/// Border colour of [`Style::Tile`].
const BORDER: Rgba<u8> = Rgba([100, 100, 100, 255]);

/// Placeholder look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Opaque orange-to-yellow tile with a grey border
    Tile,
    /// Translucent orange-to-red square for the welcome screen
    Cube,
}

/// Renders a `size`×`size` placeholder.
///
/// The gradient runs top to bottom. `Tile` goes from green 140 to 220 and
/// draws a border `max(2, size / 50)` pixels wide, inset by its own width.
/// `Cube` goes from green 165 to 100 at alpha 200.
pub fn render_placeholder(size: u32, style: Style) -> Result<RgbaImage> {
    if size == 0 {
        return Err(Error::validation("placeholder size must be positive"));
    }

    let mut img = RgbaImage::from_fn(size, size, |_, y| gradient(y, size, style));

    if style == Style::Tile {
        let border = (size / 50).max(2);
        let (lo, hi) = (border, size.saturating_sub(border));
        for (x, y, px) in img.enumerate_pixels_mut() {
            if !((lo..=hi).contains(&x) && (lo..=hi).contains(&y)) {
                continue;
            }
            let depth = (x - lo).min(y - lo).min(hi - x).min(hi - y);
            if depth < border {
                *px = BORDER;
            }
        }
    }
    Ok(img)
}

fn gradient(y: u32, size: u32, style: Style) -> Rgba<u8> {
    // y < size keeps both steps below 256
    match style {
        Style::Tile => Rgba([255, (140 + 80 * y / size) as u8, 0, 255]),
        Style::Cube => Rgba([255, (165 - (65 * y).div_ceil(size)) as u8, 0, 200]),
    }
}

/// Replaces the existing welcome-screen cube images with [`Style::Cube`]
/// placeholders. Missing files are reported as skipped, never created.
pub fn replace_cube_images(root: &Path) -> Result<ConvertReport> {
    let mut report = ConvertReport::default();

    for target in IconPlan::cube().targets {
        let path = root.join(&target.path);
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "Not found");
            report.skipped.push(path);
            continue;
        }
        if let Some(backup) = backup_once(&path)? {
            report.backed_up.push(backup);
        }
        save_png(&render_placeholder(target.width, Style::Cube)?, &path)?;
        report.written.push(path);
    }

    tracing::info!(replaced = report.written.len(), "Cube images replaced");
    Ok(report)
}
