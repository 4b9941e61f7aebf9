//! Common configuration types shared across Microstage crates

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading the optional config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the demo player.
///
/// Loaded from an optional `microstage.toml`; every field has a default
/// so a partial file only overrides the keys it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Integer upscale factor from the 120×120 canvas to the window
    pub window_scale: u32,
    /// Master volume for note playback (0.0 – 1.0)
    pub master_volume: f32,
    /// Draw the software cursor on the canvas
    pub show_cursor: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window_scale: 4,
            master_volume: 1.0,
            show_cursor: true,
        }
    }
}

impl DemoConfig {
    /// Load from a TOML file. A missing file yields the defaults; an
    /// unreadable or malformed file is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let mut config: DemoConfig = toml::from_str(&text)?;
        config.window_scale = config.window_scale.max(1);
        config.master_volume = config.master_volume.clamp(0.0, 1.0);
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = DemoConfig::default();
        assert!(config.window_scale >= 1);
        assert!((0.0..=1.0).contains(&config.master_volume));
        assert!(config.show_cursor);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: DemoConfig = toml::from_str("window_scale = 6").unwrap();
        assert_eq!(config.window_scale, 6);
        assert_eq!(config.master_volume, DemoConfig::default().master_volume);
        assert_eq!(config.show_cursor, DemoConfig::default().show_cursor);
    }

    #[test]
    fn full_toml_round_trip() {
        let original = DemoConfig {
            window_scale: 2,
            master_volume: 0.5,
            show_cursor: false,
        };
        let text = toml::to_string(&original).unwrap();
        let parsed: DemoConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.window_scale, 2);
        assert_eq!(parsed.master_volume, 0.5);
        assert!(!parsed.show_cursor);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config =
            DemoConfig::load_or_default(Path::new("/nonexistent/microstage.toml")).unwrap();
        assert_eq!(config.window_scale, DemoConfig::default().window_scale);
    }
}
