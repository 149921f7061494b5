//! # Window Configuration
//!
//! Everything a [`Window`](crate::window::Window) needs at construction time.
//! The configuration can be built in code or loaded from a TOML/RON file
//! through the [`Config`] trait.

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};

/// Default update interval, roughly 60 ticks per second
pub const DEFAULT_UPDATE_INTERVAL: f64 = 16.666_666;

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Whether to open fullscreen on the primary monitor
    pub fullscreen: bool,
    /// Milliseconds between two ticks
    pub update_interval: f64,
    /// Initial window caption
    pub caption: String,
    /// Whether buffer swaps wait for vertical sync
    pub vsync: bool,
    /// Default log filter used by [`logging::init_with_level`](crate::foundation::logging::init_with_level)
    pub log_level: String,
}

impl WindowConfig {
    /// Create a windowed configuration of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set fullscreen mode
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Set the update interval in milliseconds
    pub fn with_update_interval(mut self, interval: f64) -> Self {
        self.update_interval = interval;
        self
    }

    /// Set the initial caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    /// Enable or disable vsync
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        if !self.update_interval.is_finite() || self.update_interval <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "update interval must be a positive number of milliseconds, got {}",
                self.update_interval
            )));
        }

        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fullscreen: false,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            caption: String::new(),
            vsync: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config for WindowConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("rust_gosu_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_builder_and_validation() {
        let config = WindowConfig::new(800, 600)
            .with_caption("Tiles")
            .with_update_interval(10.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.caption, "Tiles");

        assert!(WindowConfig::new(0, 600).validate().is_err());
        assert!(WindowConfig::default().with_update_interval(0.0).validate().is_err());
        assert!(WindowConfig::default().with_update_interval(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let path = temp_path("window.toml");
        let config = WindowConfig::new(320, 240).with_fullscreen(true).with_caption("Räksmörgås");

        config.save_to_file(&path).unwrap();
        let loaded = WindowConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_partial_file_uses_defaults() {
        let path = temp_path("window.ron");
        std::fs::write(&path, "(width: 1024, vsync: false)").unwrap();
        let loaded = WindowConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.width, 1024);
        assert_eq!(loaded.height, 480);
        assert!(!loaded.vsync);
    }

    #[test]
    fn test_unsupported_extension_and_missing_file() {
        let path = temp_path("window.ini");
        std::fs::write(&path, "width = 3").unwrap();
        let result = WindowConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));

        let missing = WindowConfig::load_or_default(temp_path("missing.toml")).unwrap();
        assert_eq!(missing, WindowConfig::default());
    }
}
