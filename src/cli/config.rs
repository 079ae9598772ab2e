//! `zettel config` command
//!
//! Get or set configuration values.
//!
//! # Usage
//! ```bash
//! zettel config                                        # Show config file
//! zettel config source.url                             # Get value
//! zettel config source.url https://example.org/cards.json
//! zettel config display.limit 50 --global
//! zettel config --path
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config key (e.g., source.url, display.limit)
    pub key: Option<String>,

    /// Value to set
    pub value: Option<String>,

    /// List all config values
    #[arg(long)]
    pub list: bool,

    /// Show config file paths
    #[arg(long)]
    pub path: bool,

    /// Use global config (~/.zettel/config.toml) instead of local
    #[arg(short, long)]
    pub global: bool,
}

fn get_config_path(explicit: Option<&Path>, global: bool) -> PathBuf {
    if let Some(path) = explicit {
        path.to_path_buf()
    } else if global {
        Config::global_config_path().unwrap_or_else(Config::local_config_path)
    } else {
        Config::find_local_config().unwrap_or_else(Config::local_config_path)
    }
}

/// `explicit` is the global `--config` path; it wins over discovery and `--global`
pub fn run(args: ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    let config_path = get_config_path(explicit, args.global);

    if args.path {
        match Config::global_config_path() {
            Some(global) => println!("Global: {}", global.display()),
            None => println!("Global: (no home directory)"),
        }
        println!("Local:  {}", get_config_path(None, false).display());
        println!();
        if config_path.exists() {
            println!("✓ Active: {}", config_path.display());
        } else {
            println!("⚠ No config file found at {}", config_path.display());
        }
        return Ok(());
    }

    if args.list || (args.key.is_none() && args.value.is_none()) {
        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            println!("📋 Configuration ({}):\n", config_path.display());
            println!("{}", content);
        } else {
            println!("📋 No config file at {}", config_path.display());
            println!();
            println!("Create one with:");
            println!("  zettel config source.url https://example.org/cards.json");
        }
        return Ok(());
    }

    if let Some(key) = &args.key {
        if let Some(value) = &args.value {
            set_config_value(&config_path, key, value)?;
            println!("✅ Set {} = {} (in {})", key, value, config_path.display());
        } else {
            match get_config_value(&config_path, key)? {
                Some(v) => println!("{}", v),
                None => println!("(not set)"),
            }
        }
    }

    Ok(())
}

/// Set a nested config value using dot notation (e.g., "source.url")
fn set_config_value(path: &Path, key: &str, val: &str) -> Result<()> {
    use toml_edit::{value, DocumentMut};

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = content.parse().context("Failed to parse config.toml")?;

    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        [name] => doc[*name] = value(parse_toml_value(val)),
        [section, name] => {
            if doc.get(*section).is_none() {
                doc[*section] = toml_edit::table();
            }
            doc[*section][*name] = value(parse_toml_value(val));
        }
        _ => anyhow::bail!("Key too deep: {}. Max depth is section.key", key),
    }

    // Reject values the config cannot load
    toml::from_str::<Config>(&doc.to_string())
        .with_context(|| format!("Invalid value for {}: {}", key, val))?;

    fs::write(path, doc.to_string())?;
    Ok(())
}

/// Get a config value by dot notation key
fn get_config_value(path: &Path, key: &str) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let doc: toml::Table = toml::from_str(&content).context("Failed to parse config.toml")?;

    let val = match key.split('.').collect::<Vec<_>>().as_slice() {
        [name] => doc.get(*name),
        [section, name] => doc.get(*section).and_then(|t| t.get(*name)),
        _ => None,
    };

    Ok(val.map(|v| match v {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }))
}

/// Parse string value to appropriate TOML type
fn parse_toml_value(s: &str) -> toml_edit::Value {
    if s == "true" {
        return true.into();
    }
    if s == "false" {
        return false.into();
    }

    if let Ok(i) = s.parse::<i64>() {
        return i.into();
    }

    if let Ok(f) = s.parse::<f64>() {
        return f.into();
    }

    s.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".zettel").join("config.toml");

        set_config_value(&path, "source.url", "https://example.org/cards.json").unwrap();
        set_config_value(&path, "display.limit", "5").unwrap();

        assert_eq!(
            get_config_value(&path, "source.url").unwrap().as_deref(),
            Some("https://example.org/cards.json")
        );
        assert_eq!(
            get_config_value(&path, "display.limit").unwrap().as_deref(),
            Some("5")
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.display.limit, 5);
    }

    #[test]
    fn test_rejects_wrong_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        assert!(set_config_value(&path, "display.limit", "many").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_key_too_deep() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert!(set_config_value(&path, "a.b.c", "1").is_err());
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(get_config_path(Some(&path), true), path);
        assert_eq!(get_config_path(Some(&path), false), path);
    }

    #[test]
    fn test_get_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(get_config_value(&path, "source.url").unwrap(), None);
    }
}
