//! `zettel tags` command
//!
//! Lists every tag with the number of cards carrying it.

use anyhow::Result;
use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::utils::open_library;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Sort by card count (default: feed order)
    #[arg(long)]
    pub by_count: bool,
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Cards")]
    cards: usize,
}

pub async fn run(args: TagsArgs, config: &Config) -> Result<()> {
    let library = open_library(config).await?;
    let Some(store) = library.store() else {
        return Ok(());
    };

    let mut rows: Vec<TagRow> = store
        .tag_counts()
        .into_iter()
        .map(|(tag, cards)| TagRow { tag, cards })
        .collect();

    if rows.is_empty() {
        println!("No tags.");
        return Ok(());
    }

    if args.by_count {
        rows.sort_by(|a, b| b.cards.cmp(&a.cards));
    }

    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}
