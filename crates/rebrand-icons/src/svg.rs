//! Title-bar SVG badge.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;

use crate::convert::backup_once;
use crate::resize::resize_exact;
use crate::source::{encode_png, ensure_parent};
use crate::{Error, Result};

/// The editor's title-bar icon, relative to the root.
pub const TITLE_BAR_SVG: &str = "src/vs/workbench/browser/media/code-icon.svg";

/// Branding copy of the badge, relative to the root.
pub const BRAND_SVG: &str = "okds/media/okds-icon.svg";

/// Edge length of the title-bar icon.
const BADGE_SIZE: u32 = 16;

/// 16px "OK" badge on an orange-to-coral circle.
pub fn badge_svg() -> String {
    r##"<svg width="16" height="16" viewBox="0 0 16 16" fill="none" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="okdsGradient" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#FFA500;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#FF6B6B;stop-opacity:1" />
    </linearGradient>
  </defs>
  <circle cx="8" cy="8" r="7.5" fill="url(#okdsGradient)" stroke="white" stroke-width="0.5"/>
  <text x="50%" y="50%" text-anchor="middle" dominant-baseline="middle"
        font-family="Arial, sans-serif" font-size="6" font-weight="bold" fill="white">
    OK
  </text>
</svg>"##
        .to_string()
}

/// 16px SVG wrapping `image` as an embedded base64 PNG.
pub fn embedded_svg(image: &RgbaImage) -> Result<String> {
    let small = resize_exact(image, BADGE_SIZE, BADGE_SIZE)?;
    let data = STANDARD.encode(encode_png(&small)?);
    Ok(format!(
        r#"<svg width="16" height="16" viewBox="0 0 16 16" xmlns="http://www.w3.org/2000/svg">
  <image x="0" y="0" width="16" height="16" href="data:image/png;base64,{data}" preserveAspectRatio="xMidYMid meet"/>
</svg>"#
    ))
}

/// Replaces the title-bar icon with `svg` (backing up the original once)
/// and writes the branding copy.
pub fn write_badge(root: &Path, svg: &str) -> Result<Vec<PathBuf>> {
    let title_bar = root.join(TITLE_BAR_SVG);
    backup_once(&title_bar)?;

    let brand = root.join(BRAND_SVG);
    for path in [&title_bar, &brand] {
        ensure_parent(path)?;
        std::fs::write(path, svg).map_err(|e| Error::io_with_path(e, path))?;
        tracing::info!(path = %path.display(), "Created");
    }
    Ok(vec![title_bar, brand])
}
