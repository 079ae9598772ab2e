//! `zettel show` command
//!
//! Shows a card by id.
//!
//! # Usage
//! ```bash
//! zettel show intro
//! zettel show intro --expand
//! zettel show intro --format json
//! ```

use anyhow::Result;
use clap::Args;

use super::utils::{open_session, print_outcome};
use super::OutputArgs;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Card id
    pub id: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub async fn run(args: ShowArgs, config: &Config) -> Result<()> {
    let mut session = open_session(config, &args.output).await?;
    let outcome = session.activate_heading_or_link(&args.id);
    print_outcome(&mut session, outcome, &args.output, config)
}
