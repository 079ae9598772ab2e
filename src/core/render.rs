//! Card and result rendering
//!
//! A [`DisplayUnit`] always holds the full rendered card. Truncation is a
//! display toggle only: the printer decides how much of a truncated unit to
//! show.

use std::sync::Arc;

use super::card::Card;
use super::markup::{self, Action, Fragment};

/// Cards shown for a freshly pushed result set
pub const DEFAULT_DISPLAY_LIMIT: usize = 20;

/// One rendered card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUnit {
    card: Arc<Card>,
    fragments: Vec<Fragment>,
    truncated: bool,
}

impl DisplayUnit {
    pub fn card(&self) -> &Arc<Card> {
        &self.card
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Leave the truncated state
    pub fn show_more(&mut self) {
        self.truncated = false;
    }

    /// Return to the truncated state
    pub fn show_less(&mut self) {
        self.truncated = true;
    }

    pub fn actions(&self) -> Vec<Action> {
        self.fragments.iter().flat_map(Fragment::actions).collect()
    }
}

/// Render a card, starting truncated
pub fn render_card(card: &Arc<Card>) -> DisplayUnit {
    DisplayUnit {
        card: Arc::clone(card),
        fragments: card.nodes().iter().map(markup::render_node).collect(),
        truncated: true,
    }
}

/// The rendered result set currently on display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsView {
    units: Vec<DisplayUnit>,
    total: usize,
}

impl ResultsView {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Render `cards` in order, keeping at most `limit` of them
    pub fn render(cards: &[Arc<Card>], limit: Option<usize>) -> Self {
        let shown = limit.map_or(cards.len(), |limit| limit.min(cards.len()));
        Self {
            units: cards[..shown].iter().map(render_card).collect(),
            total: cards.len(),
        }
    }

    pub fn units(&self) -> &[DisplayUnit] {
        &self.units
    }

    pub fn unit_mut(&mut self, index: usize) -> Option<&mut DisplayUnit> {
        self.units.get_mut(index)
    }

    /// Size of the result set behind the view
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Whether the display cap hid part of the result set
    pub fn is_capped(&self) -> bool {
        self.units.len() < self.total
    }

    /// Activatable actions of every unit, in display order
    pub fn actions(&self) -> Vec<Action> {
        self.units.iter().flat_map(DisplayUnit::actions).collect()
    }
}
