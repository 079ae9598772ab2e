//! Navigation history
//!
//! Stack of every result set displayed in this session, backing "previous".
//! Unbounded and in-memory only.

use super::query::ResultSet;

#[derive(Debug, Default)]
pub struct NavigationHistory {
    entries: Vec<ResultSet>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cards: ResultSet) {
        self.entries.push(cards);
    }

    pub fn pop(&mut self) -> Option<ResultSet> {
        self.entries.pop()
    }

    /// Top of the stack
    pub fn current(&self) -> Option<&ResultSet> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
