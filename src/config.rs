//! Viewer configuration: window chrome, layout constants, zoom factors,
//! export size, wheel bindings and hotkeys.
//!
//! Everything has a default, and a YAML file may override any subset of it.
//! The file is read from `--config` or `~/.csvchart/config.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color_scheme::ColorScheme;
use crate::data::export::ExportSettings;
use crate::data::hotkeys::{Hotkeys, Modifier};
use crate::data::interaction::{WheelModifiers, ZoomSettings};
use crate::data::layout::LayoutSettings;
use crate::error::ConfigError;

/// Modifiers that restrict wheel zoom to one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelBindings {
    pub x_only: Modifier,
    pub y_only: Modifier,
}

impl Default for WheelBindings {
    fn default() -> Self {
        Self {
            x_only: Modifier::Shift,
            y_only: Modifier::Ctrl,
        }
    }
}

impl WheelBindings {
    pub fn resolve(&self, mods: &eframe::egui::Modifiers) -> WheelModifiers {
        WheelModifiers {
            x_only: self.x_only.is_held(mods),
            y_only: self.y_only.is_held(mods),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Native window title.
    pub title: String,
    /// Initial inner window size in logical points.
    pub window_size: [f32; 2],
    pub color_scheme: ColorScheme,
    pub layout: LayoutSettings,
    pub zoom: ZoomSettings,
    pub export: ExportSettings,
    pub wheel: WheelBindings,
    pub hotkeys: Hotkeys,
    /// Seconds a notice stays on screen.
    pub notice_secs: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "CSV Chart".to_string(),
            window_size: [1400.0, 900.0],
            color_scheme: ColorScheme::default(),
            layout: LayoutSettings::default(),
            zoom: ZoomSettings::default(),
            export: ExportSettings::default(),
            wheel: WheelBindings::default(),
            hotkeys: Hotkeys::default(),
            notice_secs: 4.0,
        }
    }
}

impl ViewerConfig {
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = std::env::var_os("HOME").ok_or(ConfigError::NoHome)?;
        Ok(PathBuf::from(home).join(".csvchart").join("config.yaml"))
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_yaml_str(&s).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Load `explicit` if given. Otherwise use the default path when that
    /// file exists, falling back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        let path = match Self::default_path() {
            Ok(p) => p,
            Err(ConfigError::NoHome) => {
                tracing::debug!("no HOME, using default config");
                return Ok(Self::default());
            }
            Err(e) => return Err(e),
        };
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let s = self.to_yaml_string()?;
        fs::write(path, s).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "saved config");
        Ok(())
    }
}
