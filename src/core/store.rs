//! CardStore - id to card mapping
//!
//! Enumeration follows the order cards appear in the feed, so result sets are
//! reproducible for as long as the store lives.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::card::{Card, ContentNode};

/// All cards of one load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardStore {
    cards: Vec<Arc<Card>>,
    index: HashMap<String, usize>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a card. Re-inserting an id replaces the card in place.
    pub fn insert(&mut self, id: impl Into<String>, nodes: Vec<ContentNode>) {
        let id = id.into();
        let card = Arc::new(Card::new(id.clone(), nodes));
        match self.index.get(&id) {
            Some(&position) => self.cards[position] = card,
            None => {
                self.index.insert(id, self.cards.len());
                self.cards.push(card);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Card>> {
        self.index.get(id).map(|&position| &self.cards[position])
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in store order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.cards.iter()
    }

    /// Every tag with the number of cards carrying it, first occurrence order
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for card in &self.cards {
            for tag in card.tags() {
                match positions.get(tag) {
                    Some(&i) => counts[i].1 += 1,
                    None => {
                        positions.insert(tag, counts.len());
                        counts.push((tag.to_string(), 1));
                    }
                }
            }
        }

        counts
    }
}

impl Serialize for CardStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cards.len()))?;
        for card in &self.cards {
            map.serialize_entry(card.id(), card.nodes())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CardStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StoreVisitor)
    }
}

struct StoreVisitor;

impl<'de> Visitor<'de> for StoreVisitor {
    type Value = CardStore;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of card ids to cards")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut store = CardStore::new();
        while let Some((id, nodes)) = access.next_entry::<String, Vec<ContentNode>>()? {
            store.insert(id, nodes);
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "zeta": [["h1", ["Z"], "zeta"]],
        "alpha": [["tags", ["math", "science"]]],
        "mid": [["p", [["tags", ["math"]]]]]
    }"#;

    #[test]
    fn test_feed_order_preserved() {
        let store: CardStore = serde_json::from_str(FEED).unwrap();
        let ids: Vec<&str> = store.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_get() {
        let store: CardStore = serde_json::from_str(FEED).unwrap();
        assert_eq!(store.get("alpha").unwrap().id(), "alpha");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_id_keeps_position() {
        let store: CardStore =
            serde_json::from_str(r#"{"a": [["p", ["old"]]], "b": [], "a": [["p", ["new"]]]}"#)
                .unwrap();

        let ids: Vec<&str> = store.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.get("a").unwrap().haystack(), "p,new");
    }

    #[test]
    fn test_serialize_matches_feed() {
        let store: CardStore = serde_json::from_str(FEED).unwrap();
        let json = serde_json::to_string(&store).unwrap();
        let reloaded: CardStore = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, store);
        assert!(json.starts_with(r#"{"zeta":"#));
    }

    #[test]
    fn test_tag_counts() {
        let store: CardStore = serde_json::from_str(FEED).unwrap();
        assert_eq!(
            store.tag_counts(),
            vec![("math".to_string(), 2), ("science".to_string(), 1)]
        );
    }

    #[test]
    fn test_rejects_non_map() {
        assert!(serde_json::from_str::<CardStore>("[]").is_err());
    }
}
