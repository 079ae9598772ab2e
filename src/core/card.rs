//! Card - Core data structure
//!
//! A card is one note in the zettelkasten: an ordered list of content nodes.
//!
//! # Wire format
//! ```text
//! ["h1", [items...], "<card id>"]     heading, navigates by id
//! ["a", [items...], "<url or id>"]    link
//! ["tags", ["tag", ...]]              tag list
//! ["<name>", [items...]]              any other element
//! "text"                              leaf
//! ```
//!
//! Serialization writes the same shape back, so a feed survives a trip
//! through the cache unchanged.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Error for content that does not follow the wire format
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardFormatError {
    #[error("expected a node array or a string, found {0}")]
    UnexpectedValue(&'static str),

    #[error("node is an empty array")]
    EmptyNode,

    #[error("node name must be a string, found {0}")]
    NodeName(&'static str),

    #[error("contents of <{tag}> must be an array, found {found}")]
    Contents { tag: String, found: &'static str },

    #[error("<{tag}> needs a string target, found {found}")]
    Target { tag: String, found: &'static str },

    #[error("tag labels must be strings, found {0}")]
    TagLabel(&'static str),
}

/// One element of a contents array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum Item {
    Node(ContentNode),
    Leaf(String),
}

/// Structural content node
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ContentNode {
    /// Clickable heading, shows the card `target_id`
    Heading { contents: Vec<Item>, target_id: String },

    /// Link to an absolute URL or to another card
    Link { contents: Vec<Item>, target: String },

    /// Tag labels attached to the card
    TagList { tags: Vec<String> },

    /// Any other element, kept with its name. `contents` is `None` when the
    /// node carries no contents array at all (`["hr"]`).
    Generic {
        tag_name: String,
        contents: Option<Vec<Item>>,
    },
}

impl ContentNode {
    /// Nested items (empty for tag lists)
    pub fn contents(&self) -> &[Item] {
        match self {
            ContentNode::Heading { contents, .. } | ContentNode::Link { contents, .. } => contents,
            ContentNode::Generic { contents, .. } => contents.as_deref().unwrap_or_default(),
            ContentNode::TagList { .. } => &[],
        }
    }

    /// Visit this node and every nested node, parents first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ContentNode)) {
        visit(self);
        for item in self.contents() {
            if let Item::Node(node) = item {
                node.walk(visit);
            }
        }
    }

    /// Concatenated leaf text, markup removed
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        push_plain_text(self.contents(), &mut out);
        out
    }
}

fn push_plain_text(items: &[Item], out: &mut String) {
    for item in items {
        match item {
            Item::Leaf(text) => out.push_str(text),
            Item::Node(node) => push_plain_text(node.contents(), out),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<Value> for Item {
    type Error = CardFormatError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Item::Leaf(text)),
            Value::Array(_) => ContentNode::try_from(value).map(Item::Node),
            other => Err(CardFormatError::UnexpectedValue(kind(&other))),
        }
    }
}

impl TryFrom<Value> for ContentNode {
    type Error = CardFormatError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let parts = match value {
            Value::Array(parts) => parts,
            other => return Err(CardFormatError::UnexpectedValue(kind(&other))),
        };
        let mut parts = parts.into_iter();

        let tag = match parts.next() {
            Some(Value::String(tag)) => tag,
            Some(other) => return Err(CardFormatError::NodeName(kind(&other))),
            None => return Err(CardFormatError::EmptyNode),
        };
        let contents = parts.next();
        let option = parts.next();

        match tag.as_str() {
            "h1" => Ok(ContentNode::Heading {
                contents: items(&tag, contents)?,
                target_id: target(&tag, option)?,
            }),
            "a" => Ok(ContentNode::Link {
                contents: items(&tag, contents)?,
                target: target(&tag, option)?,
            }),
            "tags" => Ok(ContentNode::TagList {
                tags: labels(&tag, contents)?,
            }),
            _ => {
                let contents = match contents {
                    None => None,
                    present => Some(items(&tag, present)?),
                };
                Ok(ContentNode::Generic {
                    tag_name: tag,
                    contents,
                })
            }
        }
    }
}

fn items(tag: &str, contents: Option<Value>) -> Result<Vec<Item>, CardFormatError> {
    match contents {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(values)) => values.into_iter().map(Item::try_from).collect(),
        Some(other) => Err(CardFormatError::Contents {
            tag: tag.to_string(),
            found: kind(&other),
        }),
    }
}

fn target(tag: &str, option: Option<Value>) -> Result<String, CardFormatError> {
    match option {
        Some(Value::String(target)) => Ok(target),
        Some(other) => Err(CardFormatError::Target {
            tag: tag.to_string(),
            found: kind(&other),
        }),
        None => Err(CardFormatError::Target {
            tag: tag.to_string(),
            found: "nothing",
        }),
    }
}

fn labels(tag: &str, contents: Option<Value>) -> Result<Vec<String>, CardFormatError> {
    match contents {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(values)) => values
            .into_iter()
            .map(|value| match value {
                Value::String(label) => Ok(label),
                other => Err(CardFormatError::TagLabel(kind(&other))),
            })
            .collect(),
        Some(other) => Err(CardFormatError::Contents {
            tag: tag.to_string(),
            found: kind(&other),
        }),
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Item::Leaf(text) => serializer.serialize_str(text),
            Item::Node(node) => node.serialize(serializer),
        }
    }
}

impl Serialize for ContentNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContentNode::Heading {
                contents,
                target_id,
            } => ("h1", contents, target_id).serialize(serializer),
            ContentNode::Link { contents, target } => ("a", contents, target).serialize(serializer),
            ContentNode::TagList { tags } => ("tags", tags).serialize(serializer),
            ContentNode::Generic { tag_name, contents } => match contents {
                Some(contents) => (tag_name.as_str(), contents).serialize(serializer),
                None => (tag_name.as_str(),).serialize(serializer),
            },
        }
    }
}

/// A note: its id in the store plus ordered content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: String,
    nodes: Vec<ContentNode>,
    haystack: String,
}

impl Card {
    pub fn new(id: impl Into<String>, nodes: Vec<ContentNode>) -> Self {
        let haystack = serialized_text(&nodes);
        Self {
            id: id.into(),
            nodes,
            haystack,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    /// Every tag in any tag list of the card, first occurrence order
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        self.walk(&mut |node| {
            if let ContentNode::TagList { tags: labels } = node {
                for label in labels {
                    if !tags.contains(&label.as_str()) {
                        tags.push(label);
                    }
                }
            }
        });
        tags
    }

    /// Exact tag membership, nested tag lists included
    pub fn has_tag(&self, tag: &str) -> bool {
        let mut found = false;
        self.walk(&mut |node| {
            if let ContentNode::TagList { tags } = node {
                found |= tags.iter().any(|t| t == tag);
            }
        });
        found
    }

    /// Text of the first heading, if any
    pub fn title(&self) -> Option<String> {
        let mut title = None;
        self.walk(&mut |node| {
            if title.is_none() {
                if let ContentNode::Heading { .. } = node {
                    title = Some(node.plain_text());
                }
            }
        });
        title
    }

    /// Flattened form searched by text queries: every element joined with
    /// `,`, nested arrays flattened, e.g. `h1,Intro,a,tags,science,math`.
    pub fn haystack(&self) -> &str {
        &self.haystack
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ContentNode)) {
        for node in &self.nodes {
            node.walk(visit);
        }
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.nodes.serialize(serializer)
    }
}

fn serialized_text(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_node(node, &mut out);
    }
    out
}

fn write_node(node: &ContentNode, out: &mut String) {
    match node {
        ContentNode::Heading {
            contents,
            target_id,
        } => {
            out.push_str("h1,");
            write_items(contents, out);
            out.push(',');
            out.push_str(target_id);
        }
        ContentNode::Link { contents, target } => {
            out.push_str("a,");
            write_items(contents, out);
            out.push(',');
            out.push_str(target);
        }
        ContentNode::TagList { tags } => {
            out.push_str("tags,");
            out.push_str(&tags.join(","));
        }
        ContentNode::Generic { tag_name, contents } => {
            out.push_str(tag_name);
            if let Some(contents) = contents {
                out.push(',');
                write_items(contents, out);
            }
        }
    }
}

fn write_items(items: &[Item], out: &mut String) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match item {
            Item::Leaf(text) => out.push_str(text),
            Item::Node(node) => write_node(node, out),
        }
    }
}
