//! Configuration persistence for the study client.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured backend URL.
pub const BACKEND_URL_ENV: &str = "STUDY_BACKEND_URL";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Application configuration that persists between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The currently selected theme name.
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Base URL of the study backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    #[serde(skip)]
    path: Option<PathBuf>,
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            backend_url: default_backend_url(),
            path: None,
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("study-tui")
            .join("config.toml")
    }

    /// Load config from `path`, returning defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            Self::parse(&content)?
        } else {
            Self::default()
        };
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// Save config back to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = self.path.clone().unwrap_or_else(Self::default_path);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Pick the backend URL: CLI flag, then environment, then the config file.
    pub fn resolve_backend_url(&self, cli: Option<&str>, env: Option<&str>) -> String {
        [cli, env]
            .into_iter()
            .flatten()
            .find(|url| !url.trim().is_empty())
            .unwrap_or(&self.backend_url)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn file_values_are_read() {
        let config = Config::parse(
            r#"
            theme = "dark"
            backend_url = "https://study.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.backend_url, "https://study.example.com");
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("study-tui-test-missing").join("config.toml");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("study-tui-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = Config::load(&path).unwrap();
        config.theme = "dark".into();
        config.save().unwrap();

        let reloaded = Config::load(&path).unwrap();
        assert_eq!(reloaded.theme, "dark");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn backend_url_precedence() {
        let config = Config {
            backend_url: "http://from-file:8000".into(),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_backend_url(Some("http://cli"), Some("http://env")),
            "http://cli"
        );
        assert_eq!(config.resolve_backend_url(None, Some("http://env")), "http://env");
        assert_eq!(config.resolve_backend_url(None, Some("  ")), "http://from-file:8000");
        assert_eq!(config.resolve_backend_url(None, None), "http://from-file:8000");
    }
}
