//! Configuration file loading for the CLI
//!
//! This module finds and loads TOML configuration files from an explicit
//! path, the local directory or the platform config directory, then checks
//! the values the renderer depends on.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use tikzsync::{TikzSyncError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for TikzSyncError {
    fn from(err: ConfigError) -> Self {
        TikzSyncError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (tikzsync/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - The loaded values are out of range
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TikzSyncError> {
    let config = find_config(explicit_path)?;
    validate(&config)?;
    Ok(config)
}

fn find_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TikzSyncError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("tikzsync/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "tikzsync", "tikzsync") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file doesn't exist, cannot be read, or is not valid
/// TOML for [`AppConfig`].
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, TikzSyncError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    config
        .viewport()
        .viewport()
        .map_err(ConfigError::Validation)?;
    config
        .sampling()
        .limits()
        .map_err(ConfigError::Validation)?;
    config
        .preview()
        .background_color()
        .map_err(ConfigError::Validation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_explicit_path_is_loaded() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[viewport]\nscale = 20.0\n").expect("Failed to write config");

        let config = load_config(Some(&path)).expect("Failed to load config");
        let viewport = config.viewport().viewport().expect("valid viewport");
        assert_eq!(viewport.scale(), 20.0);
    }

    #[test]
    fn test_missing_explicit_path() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, TikzSyncError::Config(msg) if msg.contains("Missing configuration file")));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[viewport\nwidth = ").expect("Failed to write config");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, TikzSyncError::Config(msg) if msg.contains("Failed to parse")));
    }

    #[test]
    fn test_out_of_range_values() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[viewport]\nscale = 0.0\n").expect("Failed to write config");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, TikzSyncError::Config(msg) if msg.contains("Validation error")));
    }

    #[test]
    fn test_unbounded_sampling_is_rejected() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sampling]\nmax_samples = 4294967295\n")
            .expect("Failed to write config");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, TikzSyncError::Config(msg) if msg.contains("max_samples")));
    }

    #[test]
    fn test_non_positive_clamp_is_rejected() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sampling]\nclamp = -1.0\n").expect("Failed to write config");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, TikzSyncError::Config(msg) if msg.contains("clamp")));
    }

    #[test]
    fn test_bad_background_color() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[preview]\nbackground_color = \"not a color\"\n")
            .expect("Failed to write config");

        assert!(load_config(Some(&path)).is_err());
    }
}
