//! Config path resolution
//!
//! The config directory comes from `S2NET_CONFIG_DIR` when set, otherwise
//! `configs/` next to the running executable.

use std::path::PathBuf;

use super::{ConfigError, ConfigResult};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "S2NET_CONFIG_DIR";

/// Returns the directory holding the running executable
pub fn base_dir() -> ConfigResult<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(PathBuf::from)
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the configs directory.
///
/// Path: `$S2NET_CONFIG_DIR`, or `<exe dir>/configs/`
pub fn configs_dir() -> ConfigResult<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => Ok(base_dir()?.join("configs")),
    }
}

/// Returns the core config path.
///
/// Path: `<configs dir>/core.toml`
pub fn core_config_path() -> ConfigResult<PathBuf> {
    Ok(configs_dir()?.join("core.toml"))
}
