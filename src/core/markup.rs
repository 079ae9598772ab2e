//! Markup rendering
//!
//! Turns card content into a display tree. Headings, card links and tag chips
//! carry the [`Action`] they trigger when activated.
//!
//! # Superscript shorthand
//! Leaf text like `^1 first^2 second` becomes footnote pairs
//! `(1, "first")`, `(2, "second")`. Text before the first marker is dropped
//! and footnote text stops at the next `^`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::card::{ContentNode, Item};

static FOOTNOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\^([0-9]+) ([^\^]*)").expect("footnote pattern is valid"));

/// What activating a fragment does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the card with this id
    ShowCard(String),
    /// Show every card carrying this tag
    ShowTag(String),
}

/// Where a link points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Absolute URL, left to the outside world
    External(String),
    /// Another card
    Card(String),
}

impl LinkTarget {
    pub fn parse(target: &str) -> Self {
        if is_external(target) {
            LinkTarget::External(target.to_string())
        } else {
            LinkTarget::Card(target.to_string())
        }
    }
}

/// Whether a link target leaves the zettelkasten
pub fn is_external(target: &str) -> bool {
    target.starts_with("http")
}

/// Footnote marker with its trailing text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footnote {
    pub marker: String,
    pub text: String,
}

/// Display tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Superscripted(Vec<Footnote>),
    Heading {
        target: String,
        children: Vec<Fragment>,
    },
    Link {
        target: LinkTarget,
        children: Vec<Fragment>,
    },
    Tags(Vec<String>),
    Element {
        name: String,
        children: Vec<Fragment>,
    },
}

impl Fragment {
    /// Activatable actions in document order
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.collect_actions(&mut actions);
        actions
    }

    fn collect_actions(&self, out: &mut Vec<Action>) {
        match self {
            Fragment::Text(_) | Fragment::Superscripted(_) => {}
            Fragment::Heading { target, children } => {
                out.push(Action::ShowCard(target.clone()));
                children.iter().for_each(|c| c.collect_actions(out));
            }
            Fragment::Link { target, children } => {
                if let LinkTarget::Card(id) = target {
                    out.push(Action::ShowCard(id.clone()));
                }
                children.iter().for_each(|c| c.collect_actions(out));
            }
            Fragment::Tags(tags) => {
                out.extend(tags.iter().map(|t| Action::ShowTag(t.clone())));
            }
            Fragment::Element { children, .. } => {
                children.iter().for_each(|c| c.collect_actions(out));
            }
        }
    }
}

pub fn render_item(item: &Item) -> Fragment {
    match item {
        Item::Leaf(text) => supify(text),
        Item::Node(node) => render_node(node),
    }
}

pub fn render_node(node: &ContentNode) -> Fragment {
    match node {
        ContentNode::Heading {
            contents,
            target_id,
        } => Fragment::Heading {
            target: target_id.clone(),
            children: render_items(contents),
        },
        ContentNode::Link { contents, target } => Fragment::Link {
            target: LinkTarget::parse(target),
            children: render_items(contents),
        },
        ContentNode::TagList { tags } => Fragment::Tags(tags.clone()),
        ContentNode::Generic { tag_name, .. } => Fragment::Element {
            name: tag_name.clone(),
            children: render_items(node.contents()),
        },
    }
}

fn render_items(items: &[Item]) -> Vec<Fragment> {
    items.iter().map(render_item).collect()
}

/// Expand the superscript shorthand in leaf text
pub fn supify(text: &str) -> Fragment {
    let footnotes: Vec<Footnote> = FOOTNOTE
        .captures_iter(text)
        .map(|caps| Footnote {
            marker: caps[1].to_string(),
            text: caps[2].to_string(),
        })
        .collect();

    if footnotes.is_empty() {
        Fragment::Text(text.to_string())
    } else {
        Fragment::Superscripted(footnotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> ContentNode {
        serde_json::from_value(value).unwrap()
    }

    fn note(marker: &str, text: &str) -> Footnote {
        Footnote {
            marker: marker.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_supify_pairs() {
        assert_eq!(
            supify("^1 alpha^2 beta"),
            Fragment::Superscripted(vec![note("1", "alpha"), note("2", "beta")])
        );
    }

    #[test]
    fn test_supify_plain_text_unchanged() {
        assert_eq!(
            supify("no markers here"),
            Fragment::Text("no markers here".to_string())
        );
    }

    #[test]
    fn test_supify_ascii_digits_only() {
        assert_eq!(
            supify("^\u{0663} arabic three"),
            Fragment::Text("^\u{0663} arabic three".to_string())
        );
        assert_eq!(
            supify("^\u{0663} arabic ^4 four"),
            Fragment::Superscripted(vec![note("4", "four")])
        );
    }

    #[test]
    fn test_supify_drops_leading_text() {
        assert_eq!(
            supify("lead in ^12 twelve"),
            Fragment::Superscripted(vec![note("12", "twelve")])
        );
    }

    #[test]
    fn test_supify_caret_without_marker() {
        assert_eq!(supify("x^y"), Fragment::Text("x^y".to_string()));
        assert_eq!(
            supify("^1 a^b ^2 c"),
            Fragment::Superscripted(vec![note("1", "a"), note("2", "c")])
        );
    }

    #[test]
    fn test_heading_action() {
        let fragment = render_node(&node(json!(["h1", ["Intro"], "a"])));
        assert_eq!(
            fragment,
            Fragment::Heading {
                target: "a".to_string(),
                children: vec![Fragment::Text("Intro".to_string())],
            }
        );
        assert_eq!(fragment.actions(), vec![Action::ShowCard("a".to_string())]);
    }

    #[test]
    fn test_external_link_has_no_action() {
        let fragment = render_node(&node(json!(["a", ["docs"], "https://example.org"])));
        assert!(matches!(
            &fragment,
            Fragment::Link { target: LinkTarget::External(url), .. } if url == "https://example.org"
        ));
        assert!(fragment.actions().is_empty());
    }

    #[test]
    fn test_card_link_action() {
        let fragment = render_node(&node(json!(["a", ["other"], "b"])));
        assert_eq!(fragment.actions(), vec![Action::ShowCard("b".to_string())]);
    }

    #[test]
    fn test_tag_chips() {
        let fragment = render_node(&node(json!(["tags", ["science", "math"]])));
        assert_eq!(
            fragment.actions(),
            vec![
                Action::ShowTag("science".to_string()),
                Action::ShowTag("math".to_string()),
            ]
        );
    }

    #[test]
    fn test_generic_recursion_in_order() {
        let fragment = render_node(&node(json!([
            "ul",
            [
                ["li", ["^1 one"]],
                ["li", [["a", ["next"], "n"], " tail"]],
                ["li", [["tags", ["t"]]]]
            ]
        ])));

        match &fragment {
            Fragment::Element { name, children } => {
                assert_eq!(name, "ul");
                assert_eq!(children.len(), 3);
                assert_eq!(
                    children[0],
                    Fragment::Element {
                        name: "li".to_string(),
                        children: vec![Fragment::Superscripted(vec![note("1", "one")])],
                    }
                );
            }
            other => panic!("expected element, got {:?}", other),
        }
        assert_eq!(
            fragment.actions(),
            vec![
                Action::ShowCard("n".to_string()),
                Action::ShowTag("t".to_string()),
            ]
        );
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("http://a"));
        assert!(is_external("https://a"));
        assert!(!is_external("card-http"));
    }
}
