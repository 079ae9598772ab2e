//! Local card cache
//!
//! Holds the last successfully loaded store so the viewer starts without a
//! network round trip. Read once at startup, written after each load.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::store::CardStore;

/// Persistence for a loaded store
pub trait CardCache: Send + Sync {
    /// Previously persisted store, if any
    fn get(&self) -> Result<Option<CardStore>>;

    /// Persist `store` fetched from `source`, replacing what was there
    fn put(&self, store: &CardStore, source: &str) -> Result<()>;
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    saved_at: DateTime<Utc>,
    source: &'a str,
    cards: &'a CardStore,
}

#[derive(Deserialize)]
struct Envelope {
    saved_at: DateTime<Utc>,
    #[serde(default)]
    source: String,
    cards: CardStore,
}

/// JSON file cache
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CardCache for FileCache {
    fn get(&self) -> Result<Option<CardStore>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read card cache {}", self.path.display()))?;
        let envelope: Envelope = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt card cache {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            saved_at = %envelope.saved_at,
            source = %envelope.source,
            cards = envelope.cards.len(),
            "Read card cache"
        );
        Ok(Some(envelope.cards))
    }

    fn put(&self, store: &CardStore, source: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory {}", parent.display())
            })?;
        }

        let envelope = EnvelopeRef {
            saved_at: Utc::now(),
            source,
            cards: store,
        };
        let content = serde_json::to_string(&envelope)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write card cache {}", self.path.display()))?;

        debug!(path = %self.path.display(), cards = store.len(), "Wrote card cache");
        Ok(())
    }
}

/// In-memory cache
#[derive(Debug, Default)]
pub struct MemoryCache {
    store: Mutex<Option<CardStore>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: CardStore) -> Self {
        Self {
            store: Mutex::new(Some(store)),
        }
    }
}

impl CardCache for MemoryCache {
    fn get(&self) -> Result<Option<CardStore>> {
        let store = self
            .store
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
        Ok(store.clone())
    }

    fn put(&self, store: &CardStore, _source: &str) -> Result<()> {
        let mut slot = self
            .store
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
        *slot = Some(store.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> CardStore {
        serde_json::from_str(r#"{"b": [["p", ["^1 x"]]], "a": [["tags", ["t"]]]}"#).unwrap()
    }

    #[test]
    fn test_file_cache_missing() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path().join("cards.json"));
        assert!(cache.get().unwrap().is_none());
    }

    #[test]
    fn test_file_cache_put_get() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path().join("nested").join("cards.json"));

        cache.put(&store(), "https://example.org/cards.json").unwrap();
        let loaded = cache.get().unwrap().unwrap();

        assert_eq!(loaded, store());
        let ids: Vec<&str> = loaded.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(cache.path()).unwrap()).unwrap();
        assert_eq!(raw["source"], "https://example.org/cards.json");
        assert!(raw["saved_at"].is_string());
        assert_eq!(raw["cards"]["a"], serde_json::json!([["tags", ["t"]]]));
    }

    #[test]
    fn test_file_cache_unwritable_directory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let cache = FileCache::new(blocker.join("cards.json"));
        let err = cache.put(&store(), "feed").unwrap_err();
        assert!(err.to_string().contains("Failed to create cache directory"));
    }

    #[test]
    fn test_file_cache_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cards.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileCache::new(&path).get().unwrap_err();
        assert!(err.to_string().contains("Corrupt card cache"));
    }

    #[test]
    fn test_memory_cache() {
        let cache = MemoryCache::new();
        assert!(cache.get().unwrap().is_none());
        cache.put(&store(), "feed").unwrap();
        assert_eq!(cache.get().unwrap(), Some(store()));
    }
}
