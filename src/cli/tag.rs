//! `zettel tag` command
//!
//! Shows every card carrying a tag, in feed order.
//!
//! # Usage
//! ```bash
//! zettel tag math
//! zettel tag math --format compact
//! ```

use anyhow::Result;
use clap::Args;

use super::utils::{open_session, print_outcome};
use super::OutputArgs;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct TagArgs {
    /// Tag (exact match)
    pub tag: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub async fn run(args: TagArgs, config: &Config) -> Result<()> {
    let mut session = open_session(config, &args.output).await?;
    let outcome = session.activate_tag(&args.tag);
    print_outcome(&mut session, outcome, &args.output, config)
}
