//! zettel CLI - Entry point
//!
//! Usage: zettel <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zettel::cli::{Cli, Commands};
use zettel::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zettel=debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone();
    let load_config = || Config::load_with(config_path.as_deref());

    // Run command
    match cli.command {
        Commands::Load(args) => zettel::cli::load::run(args, &load_config()?).await,
        Commands::Show(args) => zettel::cli::show::run(args, &load_config()?).await,
        Commands::Tag(args) => zettel::cli::tag::run(args, &load_config()?).await,
        Commands::Search(args) => zettel::cli::search::run(args, &load_config()?).await,
        Commands::Tags(args) => zettel::cli::tags::run(args, &load_config()?).await,
        Commands::Browse(args) => zettel::cli::browse::run(args, &load_config()?).await,
        Commands::Config(args) => zettel::cli::config::run(args, config_path.as_deref()),
    }
}
