//! zettel - Zettelkasten card viewer
//!
//! Holds a set of notes ("cards"), renders them as structured markup and
//! navigates between them by id, by tag or by free-text query.
//!
//! ## Key Concepts
//!
//! - **Cards**: ordered content nodes (headings, links, tag lists, elements)
//! - **Superscript shorthand**: `^1 note` in leaf text becomes a footnote marker
//! - **Queries**: by id, by exact tag, or by whitespace-separated pattern terms
//! - **History**: every displayed result set is pushed; `back` pops it

pub mod cli;
pub mod config;
pub mod core;
pub mod remote;

pub use core::card::{Card, ContentNode, Item};
pub use core::library::{CardSource, Library, Readiness};
pub use core::query::{QueryEngine, ResultSet};
pub use core::session::{Navigation, Session};
pub use core::store::CardStore;
pub use remote::RemoteClient;
