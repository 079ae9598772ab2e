//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod browse;
pub mod config;
pub mod load;
pub mod print;
pub mod search;
pub mod show;
pub mod tag;
pub mod tags;
pub mod utils;

/// zettel - Zettelkasten card viewer
///
/// Browse a card feed by id, by tag or by free-text query.
#[derive(Parser, Debug)]
#[command(name = "zettel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "ZETTEL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the card feed and cache it
    Load(load::LoadArgs),

    /// Show a card by id
    Show(show::ShowArgs),

    /// Show cards carrying a tag
    Tag(tag::TagArgs),

    /// Search cards (every term must match)
    Search(search::SearchArgs),

    /// List tags with card counts
    Tags(tags::TagsArgs),

    /// Interactive browsing session
    Browse(browse::BrowseArgs),

    /// Get or set configuration
    Config(config::ConfigArgs),
}

/// Output format for result sets
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rendered cards
    #[default]
    Pretty,
    /// One `id<TAB>title` line per card
    Compact,
    /// Cards in feed shape
    Json,
}

/// Options shared by result commands
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Maximum cards displayed (default: display.limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Show cards in full instead of a preview
    #[arg(short, long)]
    pub expand: bool,
}
