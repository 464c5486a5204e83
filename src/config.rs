//! Configuration loading
//!
//! Settings come from a TOML file. Every section and key is optional: missing
//! values fall back to the embedded defaults in `defaults/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SiteError};
use crate::ui::theme::Theme;

const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scroll: ScrollConfig,
    pub site: SiteSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Chermiti Building".to_string(),
            width: 1280,
            height: 800,
            vsync: true,
        }
    }
}

/// Constants of the scroll-driven camera path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub orbits: f32,
    pub radius_start: f32,
    pub radius_end: f32,
    pub height_start: f32,
    pub height_end: f32,
    pub look_start: f32,
    pub look_end: f32,
    pub damping: f32,
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbits: 2.0,
            radius_start: 15.0,
            radius_end: 7.0,
            height_start: 2.0,
            height_end: 27.0,
            look_start: 0.0,
            look_end: 12.0,
            damping: 0.05,
            fov_degrees: 75.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Pixels scrolled per wheel line
    pub line_pixels: f32,
    /// Fraction of the viewport moved by PageUp/PageDown
    pub page_step: f32,
    pub smooth_factor: f32,
    pub visibility_threshold: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            line_pixels: 80.0,
            page_step: 0.9,
            smooth_factor: 0.15,
            visibility_threshold: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub name: String,
    pub tower_name: String,
    pub tagline: String,
    pub theme: Theme,
    pub skip_intro: bool,
    /// Seed for the randomised parts of the scene (cloud sizes, leaves)
    pub seed: u64,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "Chermiti Building".to_string(),
            tower_name: "Skyline Tower".to_string(),
            tagline: "Redefining luxury living in the heart of the city".to_string(),
            theme: Theme::Dark,
            skip_intro: false,
            seed: 7,
        }
    }
}

impl SiteConfig {
    /// Default location: `<config_dir>/chermiti/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("chermiti").join("config.toml"))
    }

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and the embedded defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::load_from_file(&default),
                _ => {
                    log::debug!("No config file found, using embedded defaults");
                    Ok(Self::embedded())
                }
            },
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| SiteError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| SiteError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The configuration shipped with the binary
    pub fn embedded() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::warn!("Embedded config failed to parse ({e}), using built-in defaults");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embedded_defaults_match_builtin_defaults() {
        assert_eq!(SiteConfig::embedded(), SiteConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[camera]\ndamping = 0.1\n\n[site]\ntheme = \"light\"").unwrap();

        let config = SiteConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.camera.damping, 0.1);
        assert_eq!(config.camera.orbits, 2.0);
        assert_eq!(config.site.theme, Theme::Light);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, SiteError::ConfigRead { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[camera\ndamping = ").unwrap();
        let err = SiteConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, SiteError::ConfigParse { .. }));
    }
}
