//! Configuration system

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration trait
///
/// File format is picked from the extension; TOML and RON are supported.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the file is missing, unparseable, or in
    /// an unsupported format.
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when serialization or the write fails.
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Pool sizing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSettings {
    /// Display slots to pre-create at startup
    pub initial_size: usize,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self { initial_size: 5 }
    }
}

/// Texture lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Directories searched for texture files, in order
    pub search_paths: Vec<String>,
    /// File extensions tried for each key, in order
    pub extensions: Vec<String>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            search_paths: vec!["resources".to_string()],
            extensions: vec!["png".to_string()],
        }
    }
}

/// Top-level configuration for the display pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Pool sizing
    pub pool: PoolSettings,
    /// Texture lookup
    pub cache: CacheSettings,
    /// Default seconds a one-shot display stays visible
    pub display_duration: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pool: PoolSettings::default(),
            cache: CacheSettings::default(),
            display_duration: 3.0,
        }
    }
}

impl Config for DisplayConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensible_defaults() {
        let config = DisplayConfig::default();
        assert_eq!(config.pool.initial_size, 5);
        assert_eq!(config.cache.search_paths, vec!["resources".to_string()]);
        assert!((config.display_duration - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn toml_round_trip() {
        let config = DisplayConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: DisplayConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.pool.initial_size, config.pool.initial_size);
        assert_eq!(back.cache.extensions, config.cache.extensions);
    }

    #[test]
    fn ron_round_trip() {
        let config = DisplayConfig::default();
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let back: DisplayConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.cache.search_paths, config.cache.search_paths);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = DisplayConfig::default()
            .save_to_file("display.yaml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DisplayConfig::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
