//! Configuration module

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::render::DEFAULT_DISPLAY_LIMIT;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Card feed settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    /// Feed URL (e.g., "https://example.org/cards.json")
    #[serde(default)]
    pub url: Option<String>,

    /// Bearer token sent with the feed request
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheConfig {
    /// Cache file (default: user cache dir)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Cards shown per result set
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Lines of a truncated card
    #[serde(default = "default_preview_lines")]
    pub preview_lines: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            preview_lines: default_preview_lines(),
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_DISPLAY_LIMIT
}

fn default_preview_lines() -> usize {
    6
}

impl Config {
    /// Load config from default locations
    pub fn load() -> Result<Self> {
        // Try local config first, then global
        if let Some(local) = Self::find_local_config() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load from an explicit file if given, else from default locations
    pub fn load_with(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Find local .zettel/config.toml walking up directories
    pub fn find_local_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(".zettel").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Local config path in the current directory
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".zettel").join("config.toml")
    }

    /// Get global config path (~/.zettel/config.toml)
    pub fn global_config_path() -> Option<PathBuf> {
        directories::UserDirs::new().map(|u| u.home_dir().join(".zettel").join("config.toml"))
    }

    /// Feed URL with priority:
    /// 1. ZETTEL_SOURCE_URL env var
    /// 2. source.url
    pub fn source_url(&self) -> Option<String> {
        if let Ok(url) = std::env::var("ZETTEL_SOURCE_URL") {
            if !url.is_empty() {
                return Some(url);
            }
        }
        self.source.url.clone()
    }

    /// Cache file path with priority:
    /// 1. ZETTEL_CACHE env var
    /// 2. cache.path
    /// 3. User cache dir (e.g. ~/.cache/zettel/cards.json)
    /// 4. .zettel/cache/cards.json
    pub fn cache_path(&self) -> PathBuf {
        if let Ok(env_path) = std::env::var("ZETTEL_CACHE") {
            return PathBuf::from(env_path);
        }

        if let Some(path) = &self.cache.path {
            return path.clone();
        }

        if let Some(dirs) = directories::ProjectDirs::from("", "", "zettel") {
            return dirs.cache_dir().join("cards.json");
        }

        PathBuf::from(".zettel").join("cache").join("cards.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.display.limit, 20);
        assert_eq!(config.display.preview_lines, 6);
        assert_eq!(config.source.timeout_secs, 30);
        assert!(config.source.url.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [source]
            url = "https://example.org/cards.json"

            [display]
            preview_lines = 3
            "#,
        )
        .unwrap();

        assert_eq!(
            config.source.url.as_deref(),
            Some("https://example.org/cards.json")
        );
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.display.limit, 20);
        assert_eq!(config.display.preview_lines, 3);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[cache]\npath = \"/tmp/cards.json\"\n").unwrap();

        let mut expected = Config::default();
        expected.cache.path = Some(PathBuf::from("/tmp/cards.json"));
        assert_eq!(Config::load_with(Some(&path)).unwrap(), expected);
    }

    #[test]
    fn test_configured_cache_path() {
        let mut config = Config::default();
        config.cache.path = Some(PathBuf::from("/data/cards.json"));
        if std::env::var("ZETTEL_CACHE").is_err() {
            assert_eq!(config.cache_path(), PathBuf::from("/data/cards.json"));
        }
    }
}
