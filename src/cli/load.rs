//! `zettel load` command
//!
//! Fetches the card feed and writes it to the local cache.
//!
//! # Usage
//! ```bash
//! zettel load                                     # Configured feed
//! zettel load --url https://example.org/cards.json
//! zettel load --file ./cards.json
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use super::utils::card_source;
use crate::config::Config;
use crate::core::cache::FileCache;
use crate::core::library::Library;

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Feed URL (overrides config)
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Read the feed from a local JSON file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub async fn run(args: LoadArgs, config: &Config) -> Result<()> {
    let Some(source) = card_source(config, args.url.as_deref(), args.file.as_deref())? else {
        bail!("No card feed configured. Use --url, --file or set source.url in config.");
    };

    let cache = FileCache::new(config.cache_path());
    let mut library = Library::new();
    let count = library.load(source.as_ref(), &cache).await?;

    println!(
        "{} Loaded {} cards from {}",
        "✓".green(),
        count,
        source.describe()
    );
    println!("   Cache: {}", cache.path().display());

    Ok(())
}
