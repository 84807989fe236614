//! Reading source artwork and writing PNG files.

use std::path::Path;

use image::{ImageFormat, ImageReader, RgbaImage};

use crate::{Error, Result};

/// Opens an icon or raster image as RGBA.
///
/// ICO files decode their largest entry. The format is detected from the
/// file contents, so a mislabelled extension still loads.
pub fn load_icon(path: &Path) -> Result<RgbaImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| Error::io_with_path(e, path))?
        .with_guessed_format()
        .map_err(|e| Error::io_with_path(e, path))?;
    let format = reader.format();
    let image = reader.decode().map_err(|e| Error::image(e, path))?.into_rgba8();

    tracing::debug!(
        path = %path.display(),
        format = ?format,
        width = image.width(),
        height = image.height(),
        "Loaded source image"
    );
    Ok(image)
}

/// Writes `image` as PNG, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| Error::image(e, path))?;
    tracing::info!(path = %path.display(), size = image.width(), "Created");
    Ok(())
}

/// Encodes `image` as PNG in memory.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = std::io::Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))
        }
        _ => Ok(()),
    }
}
