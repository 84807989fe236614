//! Multi-resolution ICO files.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{ExtendedColorType, RgbaImage};

use crate::plan::IconPlan;
use crate::placeholder::{Style, render_placeholder};
use crate::source::{ensure_parent, save_png};
use crate::{Error, Result};

/// Windows application icon, relative to the root.
pub const APP_ICO_PATH: &str = "resources/win32/code.ico";

/// Web favicon, relative to the root.
pub const FAVICON_PATH: &str = "resources/server/favicon.ico";

/// Frame sizes of the Windows application icon.
pub const APP_ICO_SIZES: [u32; 4] = [16, 32, 48, 256];

/// Frame sizes of the favicon.
pub const FAVICON_SIZES: [u32; 3] = [16, 32, 48];

/// Largest frame an ICO directory entry can describe.
const MAX_FRAME: u32 = 256;

/// Writes `images` as one ICO with a PNG-encoded frame per image.
pub fn write_ico(images: &[RgbaImage], path: &Path) -> Result<()> {
    if images.is_empty() {
        return Err(Error::validation("an ICO needs at least one image"));
    }

    let frames = images
        .iter()
        .map(|img| {
            let (w, h) = img.dimensions();
            if w > MAX_FRAME || h > MAX_FRAME {
                return Err(Error::validation(format!(
                    "ICO frames are at most {MAX_FRAME}px, got {w}x{h}"
                )));
            }
            Ok(IcoFrame::as_png(img.as_raw(), w, h, ExtendedColorType::Rgba8)?)
        })
        .collect::<Result<Vec<_>>>()?;

    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| Error::io_with_path(e, path))?;
    IcoEncoder::new(BufWriter::new(file))
        .encode_images(&frames)
        .map_err(|e| Error::image(e, path))?;

    tracing::info!(
        path = %path.display(),
        frames = images.len(),
        "Created"
    );
    Ok(())
}

/// Writes the full placeholder icon set under `root`: the Windows ICO, the
/// favicon and the PNG tiles of [`IconPlan::standard`].
pub fn placeholder_set(root: &Path) -> Result<Vec<PathBuf>> {
    let tiles = |sizes: &[u32]| {
        sizes
            .iter()
            .map(|&s| render_placeholder(s, Style::Tile))
            .collect::<Result<Vec<_>>>()
    };

    let mut written = Vec::new();

    let app_ico = root.join(APP_ICO_PATH);
    write_ico(&tiles(&APP_ICO_SIZES)?, &app_ico)?;
    written.push(app_ico);

    let favicon = root.join(FAVICON_PATH);
    write_ico(&tiles(&FAVICON_SIZES)?, &favicon)?;
    written.push(favicon);

    for target in IconPlan::standard().targets {
        let path = root.join(&target.path);
        save_png(&render_placeholder(target.width, Style::Tile)?, &path)?;
        written.push(path);
    }

    tracing::info!(files = written.len(), "Placeholder icons created");
    Ok(written)
}
