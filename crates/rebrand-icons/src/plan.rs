//! Which files to generate, at which sizes.
//!
//! The built-in plans cover the editor's standard icon set and the welcome
//! screen cube; other layouts can be described in a TOML manifest:
//!
//! ```toml
//! [[targets]]
//! path = "resources/linux/code.png"
//! width = 512
//! height = 512
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Welcome-screen cube images, relative to the source root.
pub const CUBE_IMAGES: [&str; 3] = [
    "src/vs/workbench/browser/parts/editor/media/void_cube_noshadow.png",
    "void_icons/logo_cube_noshadow.png",
    "resources/win32/logo_cube_noshadow.png",
];

/// Edge length of the cube images.
pub const CUBE_SIZE: u32 = 220;

/// One PNG to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconTarget {
    /// Path relative to the source root
    pub path: PathBuf,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl IconTarget {
    /// Square target.
    pub fn square(path: impl Into<PathBuf>, size: u32) -> Self {
        Self {
            path: path.into(),
            width: size,
            height: size,
        }
    }
}

/// Ordered list of targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPlan {
    /// Targets, written in order
    pub targets: Vec<IconTarget>,
}

impl IconPlan {
    /// Application icons derived from one square source.
    pub fn standard() -> Self {
        Self {
            targets: vec![
                IconTarget::square("resources/linux/code.png", 512),
                IconTarget::square("resources/win32/code_70x70.png", 70),
                IconTarget::square("resources/win32/code_150x150.png", 150),
                IconTarget::square("resources/server/code-192.png", 192),
                IconTarget::square("resources/server/code-512.png", 512),
            ],
        }
    }

    /// The welcome-screen cube images.
    pub fn cube() -> Self {
        Self {
            targets: CUBE_IMAGES
                .iter()
                .map(|p| IconTarget::square(*p, CUBE_SIZE))
                .collect(),
        }
    }

    /// Everything a character mascot replaces: cube images, the circled
    /// cube and the standard icons.
    pub fn character() -> Self {
        let mut plan = Self::cube();
        plan.targets
            .push(IconTarget::square("void_icons/cubecircled.png", 128));
        plan.targets.extend(Self::standard().targets);
        plan
    }

    /// Looks up a built-in plan by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::standard()),
            "cube" => Some(Self::cube()),
            "character" => Some(Self::character()),
            _ => None,
        }
    }

    /// Parses and validates a TOML manifest.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let plan: Self = toml::from_str(s).map_err(|e| Error::plan(e.to_string()))?;
        plan.validate()?;
        Ok(plan)
    }

    /// Reads a TOML manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content)
    }

    /// A built-in plan name, or else a manifest path.
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        match Self::builtin(name_or_path) {
            Some(plan) => Ok(plan),
            None => Self::load(Path::new(name_or_path)),
        }
    }

    /// Rejects empty plans, zero sizes and paths that leave the root.
    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(Error::plan("plan has no targets"));
        }
        for target in &self.targets {
            if target.width == 0 || target.height == 0 {
                return Err(Error::plan(format!(
                    "{}: size must be positive",
                    target.path.display()
                )));
            }
            let escapes = target.path.is_absolute()
                || target
                    .path
                    .components()
                    .any(|c| matches!(c, std::path::Component::ParentDir));
            if escapes {
                return Err(Error::plan(format!(
                    "{}: path must be relative to the root",
                    target.path.display()
                )));
            }
        }
        Ok(())
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True when the plan has no targets.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
