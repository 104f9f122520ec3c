//! Settings Persistence
//!
//! Handles loading and saving the editor configuration from/to the platform
//! configuration directory (or an explicit path).

use crate::config::Config;
use crate::error::{ConfigError, SettingsError, SettingsResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name below the platform config dir
const APP_DIR_NAME: &str = "scenekit";

/// Default config file name
const CONFIG_FILE_NAME: &str = "editor.toml";

/// Settings persistence layer
#[derive(Debug, Clone, Default)]
pub struct SettingsPersistence {
    config: Config,
    path: Option<PathBuf>,
}

impl SettingsPersistence {
    /// Create new persistence layer with default config and no backing file
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config directory for the editor, e.g. `~/.config/scenekit`
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Default config file path inside [`Self::config_dir`]
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Create the config directory if it does not exist yet
    pub fn ensure_config_dir() -> SettingsResult<PathBuf> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir).map_err(|e| {
            SettingsError::ConfigDirectory(format!("{}: {}", dir.display(), e))
        })?;
        Ok(dir)
    }

    /// Load settings from file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        check_extension(path)?;
        let config =
            Config::load_from_file(path).map_err(|e| SettingsError::LoadError(e.to_string()))?;
        Ok(Self {
            config,
            path: Some(path.to_path_buf()),
        })
    }

    /// Load settings from `path`, falling back to defaults when the file does
    /// not exist. A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            return Self::load_from_file(path);
        }

        tracing::info!(
            "No editor config at {}, using defaults",
            path.display()
        );
        Ok(Self {
            config: Config::default(),
            path: Some(path.to_path_buf()),
        })
    }

    /// Save settings to file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        check_extension(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.config
            .save_to_file(path)
            .map_err(|e| SettingsError::SaveError(e.to_string()))?;
        tracing::debug!("Saved editor config to {}", path.display());
        Ok(())
    }

    /// Save settings back to the file they were loaded from
    pub fn save(&self) -> SettingsResult<()> {
        match &self.path {
            Some(path) => self.save_to_file(path),
            None => Err(SettingsError::SaveError(
                "no backing file for these settings".to_string(),
            )),
        }
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Validate settings
    pub fn validate(&self) -> scenekit_core::Result<()> {
        self.config.validate()
    }
}

fn check_extension(path: &Path) -> SettingsResult<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") | Some("toml") => Ok(()),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("<none>").to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_backing_file() {
        let persistence = SettingsPersistence::new();
        assert!(persistence.path().is_none());
        assert!(matches!(
            persistence.save(),
            Err(SettingsError::SaveError(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SettingsPersistence::load_from_file(Path::new("editor.yaml"));
        assert!(matches!(
            result,
            Err(SettingsError::Config(ConfigError::UnsupportedFormat(ref ext))) if ext == "yaml"
        ));
    }

    #[test]
    fn test_default_path_file_name() {
        // dirs may return None in minimal containers; only check when it resolves
        if let Ok(path) = SettingsPersistence::default_config_path() {
            assert!(path.ends_with("scenekit/editor.toml"));
        }
    }
}
