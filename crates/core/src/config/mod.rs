//! Configuration for the server core
//!
//! [`CoreConfig`] is a serde struct stored as TOML. A default file is written
//! the first time the config is loaded.
//!
//! # Example
//!
//! ```ignore
//! use s2net_core::CoreConfig;
//!
//! let config = CoreConfig::load().unwrap_or_default();
//! s2net_core::logging::init_logging(&config);
//! ```

mod loader;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use loader::{base_dir, configs_dir, core_config_path, CONFIG_DIR_ENV};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Could not determine config directory from the executable location
    #[error("Config directory not available - could not resolve executable path")]
    NoConfigDirectory,
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Core server configuration.
///
/// Loaded from `<configs dir>/core.toml`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Config version for future migration support
    pub version: u32,

    /// Enable debug logging (overrides `log_filter`)
    pub debug: bool,

    /// `tracing` filter directives, e.g. `"info,s2net_core=debug"`
    pub log_filter: String,

    /// Client slots to allocate (clamped to the absolute player limit)
    pub max_clients: usize,

    /// Frames slower than this are logged as warnings (microseconds)
    pub frame_budget_us: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            version: 1,
            debug: false,
            log_filter: "info".to_string(),
            max_clients: s2net_sdk::ABSOLUTE_PLAYER_LIMIT,
            frame_budget_us: 1_000,
        }
    }
}

impl CoreConfig {
    /// Load core config from the default path, creating it if missing.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&core_config_path()?)
    }

    /// Load core config from `path`, creating a default file if missing.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::debug!("Loaded core config from {:?}", path);
            Ok(config)
        } else {
            let default = Self::default();
            default.save_to(path)?;
            tracing::info!("Created default core config at {:?}", path);
            Ok(default)
        }
    }

    /// Save core config to the default path.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&core_config_path()?)
    }

    /// Save core config to `path`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved core config to {:?}", path);
        Ok(())
    }

    /// Reload core config from the default path.
    pub fn reload(&mut self) -> ConfigResult<()> {
        self.reload_from(&core_config_path()?)
    }

    /// Reload core config from `path`.
    ///
    /// On error `self` is left unchanged.
    pub fn reload_from(&mut self, path: &Path) -> ConfigResult<()> {
        let content = std::fs::read_to_string(path)?;
        *self = toml::from_str(&content)?;
        tracing::debug!("Reloaded core config from {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("s2net-config-{}-{}", std::process::id(), name))
            .join("core.toml")
    }

    #[test]
    fn test_core_config_default() {
        let config = CoreConfig::default();
        assert_eq!(config.version, 1);
        assert!(!config.debug);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.max_clients, 64);
    }

    #[test]
    fn test_core_config_serialize() {
        let config = CoreConfig {
            version: 2,
            debug: true,
            ..CoreConfig::default()
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("version = 2"));
        assert!(toml_str.contains("debug = true"));
        assert!(toml_str.contains("frame_budget_us = 1000"));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: CoreConfig = toml::from_str("max_clients = 10").unwrap();
        assert_eq!(config.max_clients, 10);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.version, 1);
    }

    #[test]
    fn test_load_creates_default_file() {
        let path = scratch_path("create");
        let _ = std::fs::remove_file(&path);

        let config = CoreConfig::load_from(&path).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(path.exists());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_save_and_reload() {
        let path = scratch_path("reload");
        let mut config = CoreConfig::default();
        config.save_to(&path).unwrap();

        let edited = CoreConfig {
            max_clients: 12,
            log_filter: "warn".to_string(),
            ..CoreConfig::default()
        };
        edited.save_to(&path).unwrap();

        config.reload_from(&path).unwrap();
        assert_eq!(config, edited);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_reload_keeps_old_value_on_parse_error() {
        let path = scratch_path("broken");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "max_clients = \"many\"").unwrap();

        let mut config = CoreConfig::default();
        assert!(matches!(
            config.reload_from(&path),
            Err(ConfigError::ParseError(_))
        ));
        assert_eq!(config, CoreConfig::default());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
