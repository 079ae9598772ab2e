//! Library - card store lifecycle
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  fetch   ┌─────────────────────────────┐
//! │  CardSource  │ ───────▶ │           Library           │
//! │ Remote│File  │          │ NotLoaded → Cached/Fetched  │
//! └──────────────┘          └──────────────┬──────────────┘
//!                                 get/put  │
//!                           ┌──────────────▼──────────────┐
//!                           │          CardCache          │
//!                           └─────────────────────────────┘
//! ```
//!
//! The store is read from the cache once at startup. A load replaces it only
//! when the fetch succeeds; on failure the previous store stays in place.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use super::cache::CardCache;
use super::store::CardStore;

/// Where a fresh card store comes from
#[async_trait]
pub trait CardSource: Send + Sync {
    /// Fetch the complete store
    async fn fetch(&self) -> Result<CardStore>;

    /// Human-readable origin (URL or path)
    fn describe(&self) -> String;
}

/// Card feed stored in a local JSON file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CardSource for FileSource {
    async fn fetch(&self) -> Result<CardStore> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read card feed {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse card feed {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Where the current store came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    /// No store yet; queries are ignored
    #[default]
    NotLoaded,
    /// Restored from the local cache
    Cached,
    /// Fetched from a source during this session
    Fetched,
}

/// Owner of the card store
#[derive(Debug, Default)]
pub struct Library {
    store: Option<CardStore>,
    readiness: Readiness,
}

impl Library {
    /// Library without cards
    pub fn new() -> Self {
        Self::default()
    }

    /// Library over an already fetched store
    pub fn with_store(store: CardStore) -> Self {
        Self {
            store: Some(store),
            readiness: Readiness::Fetched,
        }
    }

    /// Restore from the cache. An unreadable cache counts as empty.
    pub fn from_cache(cache: &dyn CardCache) -> Self {
        match cache.get() {
            Ok(Some(store)) => Self {
                store: Some(store),
                readiness: Readiness::Cached,
            },
            Ok(None) => Self::new(),
            Err(err) => {
                warn!(error = %format!("{:#}", err), "Ignoring unreadable card cache");
                Self::new()
            }
        }
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&CardStore> {
        self.store.as_ref()
    }

    /// Fetch from `source`, persist to `cache` and replace the store.
    ///
    /// Returns the number of cards loaded. Fetch errors are returned as-is and
    /// leave the current store untouched; a failed cache write is only logged.
    pub async fn load(&mut self, source: &dyn CardSource, cache: &dyn CardCache) -> Result<usize> {
        let origin = source.describe();
        let store = source
            .fetch()
            .await
            .with_context(|| format!("Failed to load cards from {}", origin))?;

        if let Err(err) = cache.put(&store, &origin) {
            warn!(error = %format!("{:#}", err), "Failed to write card cache");
        }

        let count = store.len();
        info!(source = %origin, cards = count, "Loaded cards");
        self.store = Some(store);
        self.readiness = Readiness::Fetched;
        Ok(count)
    }

    /// Load only when no store is present yet
    pub async fn ensure_loaded(
        &mut self,
        source: &dyn CardSource,
        cache: &dyn CardCache,
    ) -> Result<()> {
        if !self.is_ready() {
            self.load(source, cache).await?;
        }
        Ok(())
    }

    /// Drop the store
    pub fn reset(&mut self) {
        self.store = None;
        self.readiness = Readiness::NotLoaded;
    }
}
