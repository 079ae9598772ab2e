//! `zettel browse` command
//!
//! Interactive session over the card store.
//!
//! # Commands
//! ```text
//! @intro        show card "intro"
//! #math         show cards tagged "math"
//! :go 3         follow the fragment labelled [3]
//! :more 2       expand card 2        :less 2   collapse it again
//! :back         previous result set  :reset    clear the results
//! :load         reload the card feed
//! :help         this list            :quit     leave
//! anything else free-text search
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use super::print;
use super::utils::card_source;
use crate::config::Config;
use crate::core::cache::FileCache;
use crate::core::library::{Library, Readiness};
use crate::core::session::{Navigation, Session};

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Maximum cards displayed per result set (default: display.limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Start with this text query
    #[arg(short, long)]
    pub query: Option<String>,
}

/// One line of browse input
#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Card(String),
    Tag(String),
    Go(usize),
    More(usize),
    Less(usize),
    Back,
    Reset,
    Load,
    Help,
    Quit,
    Query(String),
    Invalid(String),
    Empty,
}

impl BrowseCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return BrowseCommand::Empty;
        }

        if let Some(id) = line.strip_prefix('@') {
            return BrowseCommand::Card(id.trim().to_string());
        }
        if let Some(tag) = line.strip_prefix('#') {
            return BrowseCommand::Tag(tag.trim().to_string());
        }

        let Some(command) = line.strip_prefix(':') else {
            return BrowseCommand::Query(line.to_string());
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let number = parts.next().and_then(|n| n.parse::<usize>().ok());

        match (name, number) {
            ("go" | "g", Some(n)) if n > 0 => BrowseCommand::Go(n),
            ("more" | "m", Some(n)) if n > 0 => BrowseCommand::More(n),
            ("less" | "l", Some(n)) if n > 0 => BrowseCommand::Less(n),
            ("back" | "b", None) => BrowseCommand::Back,
            ("reset" | "r", None) => BrowseCommand::Reset,
            ("load", None) => BrowseCommand::Load,
            ("help" | "h" | "?", None) => BrowseCommand::Help,
            ("quit" | "q" | "exit", None) => BrowseCommand::Quit,
            _ => BrowseCommand::Invalid(line.to_string()),
        }
    }
}

pub async fn run(args: BrowseArgs, config: &Config) -> Result<()> {
    let cache = FileCache::new(config.cache_path());
    let source = card_source(config, None, None)?;

    let mut library = Library::from_cache(&cache);
    if let Some(source) = source.as_deref() {
        if let Err(err) = library.ensure_loaded(source, &cache).await {
            eprintln!("{} {:#}", "⚠".yellow(), err);
        }
    }

    let limit = args.limit.unwrap_or(config.display.limit);
    let mut session = Session::new(library).with_display_limit(limit);

    let term = Term::stdout();
    let theme = ColorfulTheme::default();

    print_status(&session);
    print_help();

    if let Some(query) = &args.query {
        let outcome = session.submit_text_query(query);
        show(&term, &session, outcome, config)?;
    }

    loop {
        let line: String = Input::with_theme(&theme)
            .with_prompt("zettel")
            .allow_empty(true)
            .interact_text()?;

        let outcome = match BrowseCommand::parse(&line) {
            BrowseCommand::Empty => continue,
            BrowseCommand::Quit => break,
            BrowseCommand::Help => {
                print_help();
                continue;
            }
            BrowseCommand::Invalid(input) => {
                println!("Unknown command: {} (:help for a list)", input);
                continue;
            }
            BrowseCommand::Load => {
                match source.as_deref() {
                    Some(source) => match session.library_mut().load(source, &cache).await {
                        Ok(count) => println!("{} Loaded {} cards", "✓".green(), count),
                        Err(err) => eprintln!("{} {:#}", "⚠".yellow(), err),
                    },
                    None => println!("No card feed configured (source.url)."),
                }
                continue;
            }
            BrowseCommand::Go(n) => match session.view().actions().get(n - 1).cloned() {
                Some(action) => session.activate(&action),
                None => {
                    println!("No link [{}] on screen.", n);
                    continue;
                }
            },
            BrowseCommand::More(n) => toggle(&mut session, n, true),
            BrowseCommand::Less(n) => toggle(&mut session, n, false),
            BrowseCommand::Back => session.go_back(),
            BrowseCommand::Reset => session.reset_query(),
            BrowseCommand::Card(id) => session.activate_heading_or_link(&id),
            BrowseCommand::Tag(tag) => session.activate_tag(&tag),
            BrowseCommand::Query(text) => session.submit_text_query(&text),
        };

        show(&term, &session, outcome, config)?;
    }

    Ok(())
}

fn toggle(session: &mut Session, number: usize, expand: bool) -> Navigation {
    let index = number - 1;
    let found = if expand {
        session.show_more(index)
    } else {
        session.show_less(index)
    };
    if !found {
        println!("No card {} on screen.", number);
    }
    Navigation::Displayed
}

fn show(term: &Term, session: &Session, outcome: Navigation, config: &Config) -> Result<()> {
    match outcome {
        Navigation::Displayed => {
            term.clear_screen()?;
            print!(
                "{}",
                print::render_view(session.view(), config.display.preview_lines)
            );
            println!(
                "{}",
                format!("history: {}", session.history().len()).dimmed()
            );
        }
        Navigation::External(url) => println!("External link: {}", url.blue()),
        Navigation::NotReady => {
            println!("No cards loaded yet. Configure source.url and use :load.")
        }
    }
    Ok(())
}

fn print_status(session: &Session) {
    let library = session.library();
    let status = match library.readiness() {
        Readiness::NotLoaded => "no cards loaded".to_string(),
        Readiness::Cached => format!("{} cards (cached)", card_count(library)),
        Readiness::Fetched => format!("{} cards", card_count(library)),
    };
    println!("📇 zettel: {}", status);
}

fn card_count(library: &Library) -> usize {
    library.store().map_or(0, |store| store.len())
}

fn print_help() {
    println!(
        "{}",
        "@id card · #tag tag · :go N follow · :more N / :less N · :back · :reset · :load · :quit"
            .dimmed()
    );
    println!("{}", "Anything else searches (every term must match).".dimmed());
}
