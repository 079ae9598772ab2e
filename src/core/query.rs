//! Query engine
//!
//! Lookups by id, by tag and by free text over a [`CardStore`].
//!
//! Text queries are split on whitespace and every term must match the card's
//! serialized form (see [`Card::haystack`]), case-insensitively. Terms are
//! regular expressions and are not escaped, so `intro|outro` or `^h1` work as
//! patterns. A term that does not compile is matched literally instead.
//! There is no ranking: results keep store order.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use super::card::Card;
use super::store::CardStore;

/// Ordered cards produced by one query
pub type ResultSet = Vec<Arc<Card>>;

/// Lookups over a loaded store
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    store: &'a CardStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a CardStore) -> Self {
        Self { store }
    }

    /// The card with this id, or nothing if the id is unknown
    pub fn by_id(&self, id: &str) -> ResultSet {
        match self.store.get(id) {
            Some(card) => vec![Arc::clone(card)],
            None => {
                warn!(id, "No card with this id");
                Vec::new()
            }
        }
    }

    /// Cards carrying `tag`, anywhere in their content
    pub fn by_tag(&self, tag: &str) -> ResultSet {
        let cards: ResultSet = self
            .store
            .iter()
            .filter(|card| card.has_tag(tag))
            .cloned()
            .collect();
        debug!(tag, matches = cards.len(), "Tag lookup");
        cards
    }

    /// Cards matching every term of `query`
    pub fn by_text(&self, query: &str) -> ResultSet {
        let query = TextQuery::parse(query);
        let cards: ResultSet = self
            .store
            .iter()
            .filter(|card| query.matches(card))
            .cloned()
            .collect();
        debug!(terms = query.len(), matches = cards.len(), "Text lookup");
        cards
    }
}

/// Parsed free-text query
#[derive(Debug, Clone)]
pub struct TextQuery {
    terms: Vec<Term>,
}

#[derive(Debug, Clone)]
enum Term {
    Pattern(Regex),
    /// Lowercased literal, for terms that are not valid patterns
    Literal(String),
}

impl Term {
    fn parse(term: &str) -> Self {
        match RegexBuilder::new(term).case_insensitive(true).build() {
            Ok(pattern) => Term::Pattern(pattern),
            Err(err) => {
                debug!(term, error = %err, "Not a valid pattern, matching literally");
                Term::Literal(term.to_lowercase())
            }
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            Term::Pattern(pattern) => pattern.is_match(text),
            Term::Literal(needle) => text.to_lowercase().contains(needle.as_str()),
        }
    }
}

impl TextQuery {
    pub fn parse(query: &str) -> Self {
        Self {
            terms: query.split_whitespace().map(Term::parse).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// A query without terms matches everything
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, card: &Card) -> bool {
        self.matches_text(card.haystack())
    }

    pub fn matches_text(&self, text: &str) -> bool {
        self.terms.iter().all(|term| term.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "a": [["h1", ["Intro"], "a"], ["tags", ["science", "math"]]],
        "b": [["tags", ["math"]]],
        "c": [
            ["h1", ["Functions (part 2)"], "c"],
            ["p", ["see ", ["a", ["docs"], "https://example.org/fn"]]],
            ["ul", [["li", [["tags", ["nested-tag"]]]]]]
        ]
    }"#;

    fn store() -> CardStore {
        serde_json::from_str(FEED).unwrap()
    }

    fn ids(cards: &ResultSet) -> Vec<&str> {
        cards.iter().map(|c| c.id()).collect()
    }

    #[test]
    fn test_by_id_every_card() {
        let store = store();
        let engine = QueryEngine::new(&store);
        for card in store.iter() {
            let result = engine.by_id(card.id());
            assert_eq!(result.len(), 1);
            assert!(Arc::ptr_eq(&result[0], card));
        }
    }

    #[test]
    fn test_by_id_unknown() {
        let store = store();
        assert!(QueryEngine::new(&store).by_id("nope").is_empty());
    }

    #[test]
    fn test_by_tag_store_order() {
        let store = store();
        let engine = QueryEngine::new(&store);
        assert_eq!(ids(&engine.by_tag("math")), vec!["a", "b"]);
        assert_eq!(ids(&engine.by_tag("science")), vec!["a"]);
        assert!(engine.by_tag("Math").is_empty());
    }

    #[test]
    fn test_by_tag_nested() {
        let store = store();
        assert_eq!(ids(&QueryEngine::new(&store).by_tag("nested-tag")), vec!["c"]);
    }

    #[test]
    fn test_by_tag_matches_tag_sets_exactly() {
        let store = store();
        let engine = QueryEngine::new(&store);
        for (tag, _) in store.tag_counts() {
            let result = engine.by_tag(&tag);
            let expected: Vec<&str> = store
                .iter()
                .filter(|c| c.tags().contains(&tag.as_str()))
                .map(|c| c.id())
                .collect();
            assert_eq!(ids(&result), expected);
        }
    }

    #[test]
    fn test_by_text_case_insensitive() {
        let store = store();
        assert_eq!(ids(&QueryEngine::new(&store).by_text("intro")), vec!["a"]);
        assert_eq!(ids(&QueryEngine::new(&store).by_text("INTRO")), vec!["a"]);
    }

    #[test]
    fn test_by_text_all_terms_required() {
        let store = store();
        let engine = QueryEngine::new(&store);
        assert_eq!(ids(&engine.by_text("math science")), vec!["a"]);
        assert_eq!(ids(&engine.by_text("  math\t ")), vec!["a", "b"]);
        assert!(engine.by_text("math nowhere").is_empty());
    }

    #[test]
    fn test_by_text_empty_matches_all() {
        let store = store();
        let engine = QueryEngine::new(&store);
        assert_eq!(ids(&engine.by_text("")), vec!["a", "b", "c"]);
        assert_eq!(ids(&engine.by_text("   ")), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_by_text_searches_structure() {
        let store = store();
        let engine = QueryEngine::new(&store);
        // tag names, node names and URLs are all part of the searched text
        assert_eq!(ids(&engine.by_text("example.org")), vec!["c"]);
        assert_eq!(ids(&engine.by_text("nested-tag")), vec!["c"]);
        assert_eq!(ids(&engine.by_text("^h1")), vec!["a", "c"]);
    }

    #[test]
    fn test_terms_are_patterns() {
        let store = store();
        let engine = QueryEngine::new(&store);
        assert_eq!(ids(&engine.by_text("intro|functions")), vec!["a", "c"]);
        // `.` is a wildcard, not a literal dot
        assert_eq!(ids(&engine.by_text("m.th")), vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_pattern_matches_literally() {
        let store = store();
        let engine = QueryEngine::new(&store);
        assert_eq!(ids(&engine.by_text("functions (PART")), vec!["c"]);
        assert!(engine.by_text("intro (").is_empty());
    }

    #[test]
    fn test_anchored_term_on_bare_element() {
        let store: CardStore = serde_json::from_str(r#"{"x": [["hr"]], "y": [["hr", []]]}"#).unwrap();
        assert_eq!(ids(&QueryEngine::new(&store).by_text("hr$")), vec!["x"]);
    }

    #[test]
    fn test_text_query_matches_text() {
        let query = TextQuery::parse("alpha b.ta");
        assert_eq!(query.len(), 2);
        assert!(query.matches_text("ALPHA and beta"));
        assert!(!query.matches_text("alpha only"));
        assert!(TextQuery::parse("").is_empty());
        assert!(TextQuery::parse("").matches_text("anything"));
    }
}
