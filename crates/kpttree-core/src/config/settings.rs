//! Application configuration loaded from a TOML file.
//!
//! The default configuration matches the values shown in `config/default.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::theme::Theme;
use crate::error::{CoreError, CoreResult};

/// Top-level application configuration.
///
/// Every field has a default so the viewer works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub theme: Theme,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Loads the first config found among `candidates`.
    ///
    /// Missing files are skipped; a file that exists but fails to load is
    /// an error. Returns the defaults if none exist.
    pub fn load_first(candidates: &[PathBuf]) -> CoreResult<Self> {
        for path in candidates {
            match Self::load(path) {
                Ok(config) => return Ok(config),
                Err(CoreError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(Self::default())
    }

    /// Standard lookup locations: `./config/default.toml`, then
    /// `$HOME/.config/kpttree/config.toml`.
    pub fn default_locations() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config").join("default.toml")];
        if let Ok(home) = std::env::var("HOME") {
            paths.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("kpttree")
                    .join("config.toml"),
            );
        }
        paths
    }
}

/// Process-level preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Command used to open files. Falls back to `$EDITOR`, then `vi`.
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            editor: None,
            log_file: default_log_file(),
        }
    }
}

impl GeneralConfig {
    /// The editor command to run, after applying fallbacks.
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.is_empty()))
            .unwrap_or_else(|| "vi".to_string())
    }
}

/// Tree panel display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_icons: bool,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_icons: true,
            title: default_title(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_file() -> String {
    "/tmp/kpttree.log".to_string()
}

fn default_title() -> String {
    "Kpt Packages".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_general() {
        let config = Config::default();
        assert!(config.general.editor.is_none());
        assert_eq!(config.general.log_file, "/tmp/kpttree.log");
    }

    #[test]
    fn default_config_ui() {
        let config = Config::default();
        assert!(config.ui.show_icons);
        assert_eq!(config.ui.title, "Kpt Packages");
    }

    #[test]
    fn configured_editor_wins() {
        let general = GeneralConfig {
            editor: Some("hx".to_string()),
            ..GeneralConfig::default()
        };
        assert_eq!(general.editor_command(), "hx");
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"
[general]
editor = "nano"
log_file = "/var/tmp/kpt.log"

[ui]
show_icons = false
title = "Packages"

[theme]
dir_fg = "green"
selected_fg = "#ff00ff"
"##,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.general.editor.as_deref(), Some("nano"));
        assert_eq!(config.general.log_file, "/var/tmp/kpt.log");
        assert!(!config.ui.show_icons);
        assert_eq!(config.ui.title, "Packages");
        assert_eq!(config.theme.dir_fg, "green");
        assert_eq!(config.theme.selected_fg, "#ff00ff");
        assert_eq!(config.theme.border_fg, "dark_gray");
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[ui]\nshow_icons = false\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert!(!config.ui.show_icons);
        assert_eq!(config.ui.title, "Kpt Packages");
        assert_eq!(config.general.log_file, "/tmp/kpttree.log");
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn load_first_skips_missing() {
        let tmp = TempDir::new().unwrap();
        let present = tmp.path().join("present.toml");
        fs::write(&present, "[ui]\ntitle = \"found\"\n").unwrap();

        let config =
            Config::load_first(&[tmp.path().join("missing.toml"), present]).unwrap();
        assert_eq!(config.ui.title, "found");
    }

    #[test]
    fn load_first_without_files_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_first(&[tmp.path().join("missing.toml")]).unwrap();
        assert_eq!(config.ui.title, "Kpt Packages");
    }

    #[test]
    fn load_first_reports_broken_file() {
        let tmp = TempDir::new().unwrap();
        let broken = tmp.path().join("broken.toml");
        fs::write(&broken, "[[[").unwrap();
        assert!(Config::load_first(&[broken]).is_err());
    }

    #[test]
    fn default_locations_start_with_local_config() {
        let paths = Config::default_locations();
        assert_eq!(paths[0], PathBuf::from("config/default.toml"));
    }
}
