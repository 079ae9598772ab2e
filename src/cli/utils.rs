//! CLI utility functions
//!
//! Common helpers shared across CLI commands:
//! - Card source selection (configured feed, `--url`, `--file`)
//! - Opening the library and a session over it
//! - Printing a session's view in the requested format

use anyhow::{bail, Result};

use super::print;
use super::{OutputArgs, OutputFormat};
use crate::config::Config;
use crate::core::cache::FileCache;
use crate::core::library::{CardSource, FileSource, Library};
use crate::core::session::{Navigation, Session};
use crate::remote::RemoteClient;

/// Source from explicit flags, falling back to the configured feed
pub fn card_source(
    config: &Config,
    url: Option<&str>,
    file: Option<&std::path::Path>,
) -> Result<Option<Box<dyn CardSource>>> {
    if let Some(path) = file {
        return Ok(Some(Box::new(FileSource::new(path))));
    }

    let url = match url {
        Some(url) => Some(url.to_string()),
        None => config.source_url(),
    };

    match url {
        Some(url) => Ok(Some(Box::new(RemoteClient::new(
            &url,
            config.source.token.clone(),
            config.source.timeout_secs,
        )?))),
        None => Ok(None),
    }
}

/// Library from the cache, loading from the configured feed if it is empty
///
/// # Errors
/// Returns an error if no cards are cached and no feed is configured, or if
/// the feed cannot be loaded.
pub async fn open_library(config: &Config) -> Result<Library> {
    let cache = FileCache::new(config.cache_path());
    let mut library = Library::from_cache(&cache);

    if !library.is_ready() {
        if let Some(source) = card_source(config, None, None)? {
            library.ensure_loaded(source.as_ref(), &cache).await?;
        }
    }

    if !library.is_ready() {
        bail!("No cards available. Run 'zettel load --url <feed>' or 'zettel load --file <cards.json>' first.");
    }

    Ok(library)
}

/// Session over the cached library with the display limit applied
pub async fn open_session(config: &Config, output: &OutputArgs) -> Result<Session> {
    let library = open_library(config).await?;
    let limit = output.limit.unwrap_or(config.display.limit);
    Ok(Session::new(library).with_display_limit(limit))
}

/// Print the outcome of a one-shot action
pub fn print_outcome(
    session: &mut Session,
    outcome: Navigation,
    output: &OutputArgs,
    config: &Config,
) -> Result<()> {
    match outcome {
        Navigation::Displayed => {}
        Navigation::External(url) => {
            println!("{}", url);
            return Ok(());
        }
        Navigation::NotReady => bail!("No cards loaded. Run 'zettel load' first."),
    }

    if output.expand {
        for index in 0..session.view().units().len() {
            session.show_more(index);
        }
    }

    match output.format {
        OutputFormat::Json => println!("{}", print::render_json(session.view())?),
        OutputFormat::Compact => print!("{}", print::render_compact(session.view())),
        OutputFormat::Pretty => print!(
            "{}",
            print::render_view(session.view(), config.display.preview_lines)
        ),
    }

    Ok(())
}
