//! Configuration loading and discovery for `pixmon.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PixmonConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "pixmon.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pixmon.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the enhancement endpoint
    pub endpoint: Option<String>,
    /// Skip the remote attempt entirely
    pub offline: bool,
    /// Override the sprite size
    pub pixel_size: Option<u32>,
    /// Override the batch size
    pub quantity: Option<u8>,
    /// Override the audio asset directory
    pub audio_root: Option<PathBuf>,
}

/// Find pixmon.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for pixmon.toml
/// 2. Check XDG_CONFIG_HOME/pixmon/pixmon.toml (or ~/.config/pixmon/pixmon.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pixmon.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("pixmon").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find pixmon.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pixmon.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses [`find_config`]
/// to locate one. If no config file is found, returns the defaults.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("game/pixmon.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<PixmonConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            debug!("no pixmon.toml found, using defaults");
            Ok(PixmonConfig::default())
        }
    }
}

/// Load configuration from a specific file path.
///
/// A relative `audio.asset_root` is resolved against the file's directory.
fn load_config_file(path: &Path) -> Result<PixmonConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: PixmonConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if let Some(root) = project_root(path) {
        config.audio.asset_root = resolve_path(root, &config.audio.asset_root);
    }
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The result is
/// validated again, since flags can be as wrong as files.
pub fn merge_cli_overrides(
    config: &mut PixmonConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(ref endpoint) = overrides.endpoint {
        config.enhancement.endpoint = Some(endpoint.clone());
        config.enhancement.enabled = true;
    }

    if overrides.offline {
        config.enhancement.enabled = false;
    }

    if let Some(pixel_size) = overrides.pixel_size {
        config.defaults.pixel_size = pixel_size;
    }

    if let Some(quantity) = overrides.quantity {
        config.defaults.quantity = quantity;
    }

    if let Some(ref root) = overrides.audio_root {
        config.audio.asset_root = root.clone();
    }

    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// Get the directory that owns a config file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[defaults]\nquantity = 2");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"");

        let subdir = temp.path().join("sprites").join("monsters");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[enhancement]
endpoint = "http://localhost:8888/generate"

[audio]
asset_root = "sounds"

[defaults]
pixel_size = 32
quantity = 3
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.enhancement_endpoint(), Some("http://localhost:8888/generate"));
        assert_eq!(config.audio.asset_root, temp.path().join("sounds"));
        assert_eq!(config.defaults.pixel_size, 32);
        assert_eq!(config.defaults.quantity, 3);
    }

    #[test]
    fn test_load_config_keeps_absolute_asset_root() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[audio]\nasset_root = \"/srv/audio\"");

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.audio.asset_root, PathBuf::from("/srv/audio"));
    }

    #[test]
    fn test_load_config_missing_file_is_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join("nonexistent.toml");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[defaults]\nquantity = 0\npixel_size = 7");

        match load_config(Some(&config_path)) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides_offline_wins() {
        let mut config = PixmonConfig::default();
        let overrides = CliOverrides {
            endpoint: Some("http://localhost:1/x".to_string()),
            offline: true,
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.enhancement.endpoint.as_deref(), Some("http://localhost:1/x"));
        assert_eq!(config.enhancement_endpoint(), None);
    }

    #[test]
    fn test_merge_cli_overrides_endpoint_reenables() {
        let mut config = PixmonConfig::default();
        config.enhancement.enabled = false;
        let overrides =
            CliOverrides { endpoint: Some("http://localhost:1/x".to_string()), ..Default::default() };

        merge_cli_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.enhancement_endpoint(), Some("http://localhost:1/x"));
    }

    #[test]
    fn test_merge_cli_overrides_multiple() {
        let mut config = PixmonConfig::default();
        let overrides = CliOverrides {
            pixel_size: Some(128),
            quantity: Some(1),
            audio_root: Some(PathBuf::from("clips")),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.defaults.pixel_size, 128);
        assert_eq!(config.defaults.quantity, 1);
        assert_eq!(config.audio.asset_root, PathBuf::from("clips"));
    }

    #[test]
    fn test_merge_cli_overrides_validates() {
        let mut config = PixmonConfig::default();
        let overrides = CliOverrides { quantity: Some(7), ..Default::default() };

        let result = merge_cli_overrides(&mut config, &overrides);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_resolve_path_absolute() {
        let root = Path::new("/project");
        let absolute = Path::new("/other/path");
        assert_eq!(resolve_path(root, absolute), PathBuf::from("/other/path"));
    }

    #[test]
    fn test_resolve_path_relative() {
        let root = Path::new("/project");
        let relative = Path::new("assets/audio");
        assert_eq!(resolve_path(root, relative), PathBuf::from("/project/assets/audio"));
    }

    #[test]
    fn test_project_root() {
        let config_path = Path::new("/project/pixmon.toml");
        assert_eq!(project_root(config_path), Some(Path::new("/project")));
    }
}
