//! Writing a plan's targets from one source image.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::plan::{IconPlan, IconTarget};
use crate::resize::{fit_centered, resize_exact};
use crate::source::save_png;
use crate::{Error, Result};

/// Where the build copies the Windows icon from, relative to the root.
pub const BUILD_ICO_PATH: &str = ".build/electron/resources/win32/code.ico";

/// How the source is mapped onto a target size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fit {
    /// Resample to the exact size
    #[default]
    Stretch,
    /// Keep the aspect ratio and centre on a transparent canvas
    Contain,
}

/// Options for [`apply_plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Resampling mode
    pub fit: Fit,
    /// Keep the first version of each replaced file as `<file>.bak`
    pub backup: bool,
    /// Skip targets whose directory does not exist instead of creating it
    pub skip_missing_dirs: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            fit: Fit::Stretch,
            backup: true,
            skip_missing_dirs: false,
        }
    }
}

/// Files touched by a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertReport {
    /// Files written
    pub written: Vec<PathBuf>,
    /// Backups created in this run
    pub backed_up: Vec<PathBuf>,
    /// Targets skipped because their directory is missing
    pub skipped: Vec<PathBuf>,
}

/// Renders `source` into every target of `plan` under `root`.
pub fn apply_plan(
    source: &RgbaImage,
    root: &Path,
    plan: &IconPlan,
    options: &ConvertOptions,
) -> Result<ConvertReport> {
    plan.validate()?;
    let mut report = ConvertReport::default();

    for target in &plan.targets {
        let path = root.join(&target.path);

        if options.skip_missing_dirs && !parent_exists(&path) {
            tracing::warn!(path = %path.display(), "Directory not found, skipping");
            report.skipped.push(path);
            continue;
        }

        if options.backup
            && let Some(backup) = backup_once(&path)?
        {
            report.backed_up.push(backup);
        }

        save_png(&render_target(source, target, options.fit)?, &path)?;
        report.written.push(path);
    }

    tracing::info!(
        written = report.written.len(),
        backed_up = report.backed_up.len(),
        skipped = report.skipped.len(),
        "Icon plan applied"
    );
    Ok(report)
}

fn render_target(source: &RgbaImage, target: &IconTarget, fit: Fit) -> Result<RgbaImage> {
    match fit {
        Fit::Stretch => resize_exact(source, target.width, target.height),
        Fit::Contain => fit_centered(source, target.width, target.height),
    }
}

/// Copies `path` to `<path>.bak` unless the file is missing or a backup
/// already exists. Returns the backup path when one was made.
pub fn backup_once(path: &Path) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }
    let backup = backup_path(path);
    if backup.exists() {
        return Ok(None);
    }
    std::fs::copy(path, &backup).map_err(|e| Error::io_with_path(e, &backup))?;
    tracing::info!(path = %path.display(), "Backed up");
    Ok(Some(backup))
}

/// `<path>.bak`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Copies an ICO into the Electron build output, only if that directory
/// already exists.
pub fn copy_to_build(ico: &Path, root: &Path) -> Result<Option<PathBuf>> {
    let dest = root.join(BUILD_ICO_PATH);
    if !parent_exists(&dest) {
        tracing::debug!(path = %dest.display(), "No build output, not copying icon");
        return Ok(None);
    }
    std::fs::copy(ico, &dest).map_err(|e| Error::io_with_path(e, &dest))?;
    tracing::info!(path = %dest.display(), "Copied icon to build folder");
    Ok(Some(dest))
}

fn parent_exists(path: &Path) -> bool {
    path.parent().is_some_and(Path::is_dir)
}
