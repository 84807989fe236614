//! The icon replacement guide: every icon file a rebrand has to touch.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::source::ensure_parent;
use crate::{Error, Result};

/// Default location of the guide, relative to the root.
pub const GUIDE_PATH: &str = "okds/icon-replacement-guide.json";

/// Installer bitmap scale factors, in percent.
const INSTALLER_SCALES: [u32; 7] = [100, 125, 150, 175, 200, 225, 250];

/// Windows icons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowsIcons {
    /// Application ICO
    pub main_icon: String,
    /// Start-menu tile, 150px
    pub large_png: String,
    /// Start-menu tile, 70px
    pub small_png: String,
    /// Inno Setup wizard bitmaps
    pub installer_bmps: Vec<String>,
}

/// A platform with a single icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainIcon {
    /// Icon path
    pub main_icon: String,
}

/// Web server icons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerIcons {
    /// Browser favicon
    pub favicon: String,
    /// PWA icon, 192px
    pub pwa_192: String,
    /// PWA icon, 512px
    pub pwa_512: String,
}

/// Icon paths per platform, relative to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementGuide {
    /// Windows
    pub windows: WindowsIcons,
    /// macOS
    pub macos: MainIcon,
    /// Linux
    pub linux: MainIcon,
    /// Web server
    pub server: ServerIcons,
}

impl Default for ReplacementGuide {
    fn default() -> Self {
        let installer_bmps = ["big", "small"]
            .iter()
            .flat_map(|kind| {
                INSTALLER_SCALES
                    .iter()
                    .map(move |scale| format!("resources/win32/inno-{kind}-{scale}.bmp"))
            })
            .collect();

        Self {
            windows: WindowsIcons {
                main_icon: "resources/win32/code.ico".to_string(),
                large_png: "resources/win32/code_150x150.png".to_string(),
                small_png: "resources/win32/code_70x70.png".to_string(),
                installer_bmps,
            },
            macos: MainIcon {
                main_icon: "resources/darwin/code.icns".to_string(),
            },
            linux: MainIcon {
                main_icon: "resources/linux/code.png".to_string(),
            },
            server: ServerIcons {
                favicon: "resources/server/favicon.ico".to_string(),
                pwa_192: "resources/server/code-192.png".to_string(),
                pwa_512: "resources/server/code-512.png".to_string(),
            },
        }
    }
}

impl ReplacementGuide {
    /// Every path in the guide, in document order.
    pub fn all_paths(&self) -> Vec<&str> {
        let mut paths = vec![
            self.windows.main_icon.as_str(),
            self.windows.large_png.as_str(),
            self.windows.small_png.as_str(),
        ];
        paths.extend(self.windows.installer_bmps.iter().map(String::as_str));
        paths.extend([
            self.macos.main_icon.as_str(),
            self.linux.main_icon.as_str(),
            self.server.favicon.as_str(),
            self.server.pwa_192.as_str(),
            self.server.pwa_512.as_str(),
        ]);
        paths
    }

    /// Paths that do not exist under `root`.
    pub fn missing(&self, root: &Path) -> Vec<&str> {
        self.all_paths()
            .into_iter()
            .filter(|p| !root.join(p).exists())
            .collect()
    }

    /// Writes the guide as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        ensure_parent(path)?;
        std::fs::write(path, json).map_err(|e| Error::io_with_path(e, path))?;
        tracing::info!(path = %path.display(), "Icon replacement guide created");
        Ok(())
    }
}
