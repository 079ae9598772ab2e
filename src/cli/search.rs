//! `zettel search` command
//!
//! Searches cards by free text.
//!
//! # Usage
//! ```bash
//! zettel search intro
//! zettel search "graph theory"        # both terms must match
//! zettel search 'colou?r' --limit 5   # terms are regular expressions
//! zettel search                       # every card
//! ```
//!
//! # Matching
//! - Case-insensitive, every term must match
//! - Matches anywhere in the card: text, tags, link targets, element names
//! - Terms that are not valid patterns match literally

use anyhow::Result;
use clap::Args;

use super::utils::{open_session, print_outcome};
use super::OutputArgs;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Query terms
    pub query: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub async fn run(args: SearchArgs, config: &Config) -> Result<()> {
    let mut session = open_session(config, &args.output).await?;
    let outcome = session.submit_text_query(&args.query.join(" "));
    print_outcome(&mut session, outcome, &args.output, config)
}
