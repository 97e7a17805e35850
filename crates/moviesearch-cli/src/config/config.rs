//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use moviesearch_core::PaginationConfig;
use moviesearch_core::pagination::{DEFAULT_MARGIN_PAGES, DEFAULT_PAGE_RANGE};
use serde::{Deserialize, Serialize};

/// Environment variable holding the TMDB bearer token.
pub const TOKEN_ENV_VAR: &str = "TMDB_API_TOKEN";

/// Default toast lifetime in seconds.
const DEFAULT_TOAST_SECONDS: u64 = 4;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Terminal UI settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// TMDB connection settings.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// Base URL override (default: `https://api.themoviedb.org/3/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Bearer token, used when `TMDB_API_TOKEN` is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

/// Terminal UI settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// Pages shown around the current page in the page strip.
    #[serde(default = "default_page_range")]
    pub page_range: usize,
    /// Pages always shown at each end of the page strip.
    #[serde(default = "default_margin_pages")]
    pub margin_pages: usize,
    /// How long a notification stays on screen.
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: u64,
}

const fn default_page_range() -> usize {
    DEFAULT_PAGE_RANGE
}

const fn default_margin_pages() -> usize {
    DEFAULT_MARGIN_PAGES
}

const fn default_toast_seconds() -> u64 {
    DEFAULT_TOAST_SECONDS
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_range: DEFAULT_PAGE_RANGE,
            margin_pages: DEFAULT_MARGIN_PAGES,
            toast_seconds: DEFAULT_TOAST_SECONDS,
        }
    }
}

impl UiConfig {
    /// Page strip layout.
    #[must_use]
    pub const fn pagination(&self) -> PaginationConfig {
        PaginationConfig {
            page_range: self.page_range,
            margin_pages: self.margin_pages,
        }
    }

    /// Toast lifetime.
    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds)
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Resolves the API token: environment first, then the config file.
    #[must_use]
    pub fn resolve_api_token(&self, from_env: Option<String>) -> Option<String> {
        from_env
            .filter(|token| !token.trim().is_empty())
            .or_else(|| self.tmdb.api_token.clone())
            .filter(|token| !token.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.tmdb.base_url.is_none());
        assert!(config.tmdb.api_token.is_none());
        assert_eq!(config.ui.pagination(), PaginationConfig::default());
        assert_eq!(config.ui.toast_duration(), Duration::from_secs(4));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let path = Path::new("/tmp/moviesearch_test_nonexistent_config.toml");

        // Act
        let config = AppConfig::load(path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            tmdb: TmdbConfig {
                base_url: Some(String::from("http://localhost:8080/3/")),
                api_token: Some(String::from("secret")),
            },
            ui: UiConfig {
                page_range: 3,
                margin_pages: 2,
                toast_seconds: 6,
            },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\npage_range = 7\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.ui.page_range, 7);
        assert_eq!(config.ui.margin_pages, DEFAULT_MARGIN_PAGES);
        assert_eq!(config.tmdb, TmdbConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_token_prefers_environment() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                base_url: None,
                api_token: Some(String::from("from-file")),
            },
            ..AppConfig::default()
        };

        // Act & Assert
        assert_eq!(
            config.resolve_api_token(Some(String::from("from-env"))),
            Some(String::from("from-env"))
        );
        assert_eq!(
            config.resolve_api_token(Some(String::from("  "))),
            Some(String::from("from-file"))
        );
        assert_eq!(
            config.resolve_api_token(None),
            Some(String::from("from-file"))
        );
    }

    #[test]
    fn test_token_missing() {
        // Arrange
        let config = AppConfig::default();

        // Act & Assert
        assert_eq!(config.resolve_api_token(None), None);
    }
}
