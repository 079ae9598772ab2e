//! Browsing session
//!
//! Owns the library, the navigation history and the view on display, and
//! maps each user action onto a query or a history operation.
//!
//! Queries issued before the library is ready are ignored
//! ([`Navigation::NotReady`]) and leave the history untouched. A fresh query
//! displays at most `display_limit` cards while the history keeps the full
//! set; going back redisplays that full set.
//!
//! Reloading the library does not touch the history or the view. They hold the
//! cards as they were when displayed, so `back` after a reload shows the old
//! versions; the next query runs against the new store.

use tracing::debug;

use super::history::NavigationHistory;
use super::library::Library;
use super::markup::{self, Action};
use super::query::{QueryEngine, ResultSet};
use super::render::{ResultsView, DEFAULT_DISPLAY_LIMIT};

/// Outcome of a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The view changed
    Displayed,
    /// An absolute URL to open outside the viewer
    External(String),
    /// No cards loaded yet; nothing happened
    NotReady,
}

pub struct Session {
    library: Library,
    history: NavigationHistory,
    view: ResultsView,
    display_limit: usize,
}

impl Session {
    pub fn new(library: Library) -> Self {
        Self {
            library,
            history: NavigationHistory::new(),
            view: ResultsView::empty(),
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    /// Follow a rendered action
    pub fn activate(&mut self, action: &Action) -> Navigation {
        match action {
            Action::ShowCard(id) => self.activate_heading_or_link(id),
            Action::ShowTag(tag) => self.activate_tag(tag),
        }
    }

    /// Heading or link: URLs leave the viewer, anything else is a card id
    pub fn activate_heading_or_link(&mut self, target: &str) -> Navigation {
        if markup::is_external(target) {
            return Navigation::External(target.to_string());
        }
        self.query(|engine| engine.by_id(target))
    }

    pub fn activate_tag(&mut self, tag: &str) -> Navigation {
        self.query(|engine| engine.by_tag(tag))
    }

    pub fn submit_text_query(&mut self, text: &str) -> Navigation {
        self.query(|engine| engine.by_text(text))
    }

    /// Drop the current result set and redisplay the previous one in full
    pub fn go_back(&mut self) -> Navigation {
        self.history.pop();
        self.view = match self.history.current() {
            Some(cards) => ResultsView::render(cards, None),
            None => ResultsView::empty(),
        };
        Navigation::Displayed
    }

    /// Display an empty result set
    pub fn reset_query(&mut self) -> Navigation {
        self.show(Vec::new())
    }

    /// Expand the unit at `index`; false if there is none
    pub fn show_more(&mut self, index: usize) -> bool {
        match self.view.unit_mut(index) {
            Some(unit) => {
                unit.show_more();
                true
            }
            None => false,
        }
    }

    /// Truncate the unit at `index`; false if there is none
    pub fn show_less(&mut self, index: usize) -> bool {
        match self.view.unit_mut(index) {
            Some(unit) => {
                unit.show_less();
                true
            }
            None => false,
        }
    }

    fn query(&mut self, lookup: impl FnOnce(&QueryEngine<'_>) -> ResultSet) -> Navigation {
        let Some(store) = self.library.store() else {
            debug!("Card store not loaded, ignoring query");
            return Navigation::NotReady;
        };
        let cards = lookup(&QueryEngine::new(store));
        self.show(cards)
    }

    fn show(&mut self, cards: ResultSet) -> Navigation {
        self.view = ResultsView::render(&cards, Some(self.display_limit));
        self.history.push(cards);
        Navigation::Displayed
    }
}
