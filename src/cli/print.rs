//! Terminal output for result views
//!
//! Pretty output numbers every activatable fragment (`[n]`) in the same
//! order as [`ResultsView::actions`], so `:go n` in a browse session follows
//! the fragment labelled `n`.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::core::card::ContentNode;
use crate::core::markup::{Fragment, LinkTarget};
use crate::core::render::{DisplayUnit, ResultsView};

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "blockquote", "pre", "ul", "ol", "li", "dl", "dt", "dd",
    "table", "tr", "h2", "h3", "h4", "h5", "h6", "hr", "br", "figure", "details",
];

#[derive(Debug, Clone, Copy, Default)]
struct Style {
    bold: bool,
    italic: bool,
    code: bool,
    link: bool,
}

impl Style {
    fn for_element(self, name: &str) -> Self {
        match name {
            "strong" | "b" | "h2" | "h3" | "h4" | "h5" | "h6" | "dt" => Self { bold: true, ..self },
            "em" | "i" | "cite" | "blockquote" => Self { italic: true, ..self },
            "code" | "pre" | "kbd" => Self { code: true, ..self },
            _ => self,
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        let mut painted = text.normal();
        if self.bold {
            painted = painted.bold();
        }
        if self.italic {
            painted = painted.italic();
        }
        if self.code {
            painted = painted.cyan();
        }
        if self.link {
            painted = painted.underline();
        }
        painted
    }
}

/// Lays out the fragments of one card as lines
struct Painter {
    lines: Vec<String>,
    line: String,
    depth: usize,
    next_label: usize,
}

impl Painter {
    fn new(labels_used: usize) -> Self {
        Self {
            lines: Vec::new(),
            line: String::new(),
            depth: 0,
            next_label: labels_used,
        }
    }

    fn label(&mut self) -> String {
        self.next_label += 1;
        format!("[{}]", self.next_label).dimmed().to_string()
    }

    fn push(&mut self, text: &str, style: Style) {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            if !part.is_empty() {
                self.line.push_str(&style.paint(part).to_string());
            }
        }
    }

    fn break_line(&mut self) {
        if !self.line.is_empty() {
            let line = std::mem::take(&mut self.line);
            self.lines.push(format!("{}{}", "  ".repeat(self.depth), line));
        }
    }

    fn children(&mut self, children: &[Fragment], style: Style) {
        for child in children {
            self.fragment(child, style);
        }
    }

    fn fragment(&mut self, fragment: &Fragment, style: Style) {
        match fragment {
            Fragment::Text(text) => self.push(text, style),
            Fragment::Superscripted(footnotes) => {
                for note in footnotes {
                    self.line
                        .push_str(&superscript(&note.marker).yellow().to_string());
                    self.push(&note.text, style);
                }
            }
            Fragment::Heading { children, .. } => {
                self.break_line();
                let label = self.label();
                self.children(children, Style { bold: true, ..style });
                self.line.push(' ');
                self.line.push_str(&label);
                self.break_line();
            }
            Fragment::Link { target, children } => match target {
                LinkTarget::External(url) => {
                    self.children(children, style);
                    self.line
                        .push_str(&format!(" <{}>", url).blue().to_string());
                }
                LinkTarget::Card(_) => {
                    let label = self.label();
                    self.children(children, Style { link: true, ..style });
                    self.line.push_str(&label);
                }
            },
            Fragment::Tags(tags) => {
                self.break_line();
                let chips: Vec<String> = tags
                    .iter()
                    .map(|tag| format!("{}{}", format!("#{}", tag).magenta(), self.label()))
                    .collect();
                self.line.push_str(&chips.join("  "));
                self.break_line();
            }
            Fragment::Element { name, children } => {
                let block = BLOCK_ELEMENTS.contains(&name.as_str());
                if block {
                    self.break_line();
                }
                match name.as_str() {
                    "li" => self.line.push_str("• "),
                    "hr" => self.line.push_str(&"────────".dimmed().to_string()),
                    _ => {}
                }
                let nested = matches!(name.as_str(), "ul" | "ol" | "blockquote");
                if nested {
                    self.depth += 1;
                }
                self.children(children, style.for_element(name));
                if block {
                    self.break_line();
                }
                if nested {
                    self.depth -= 1;
                }
            }
        }
    }

    fn finish(mut self) -> (Vec<String>, usize) {
        self.break_line();
        (self.lines, self.next_label)
    }
}

/// Digits as unicode superscript
fn superscript(marker: &str) -> String {
    marker
        .chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}

fn render_unit(
    out: &mut String,
    number: usize,
    unit: &DisplayUnit,
    labels_used: usize,
    preview_lines: usize,
) -> usize {
    let mut painter = Painter::new(labels_used);
    for fragment in unit.fragments() {
        painter.fragment(fragment, Style::default());
    }
    let (lines, labels_used) = painter.finish();

    out.push_str(&format!("── {}. {}\n", number, unit.card().id()).dimmed().to_string());
    out.push('\n');

    let hidden = unit.is_truncated() && lines.len() > preview_lines;
    let shown = if hidden { &lines[..preview_lines] } else { &lines[..] };
    for line in shown {
        out.push_str(line);
        out.push('\n');
    }

    if hidden {
        out.push_str(
            &format!("… show more (:more {})\n", number)
                .dimmed()
                .to_string(),
        );
    } else if !unit.is_truncated() && lines.len() > preview_lines {
        out.push_str(
            &format!("  show less (:less {})\n", number)
                .dimmed()
                .to_string(),
        );
    }
    out.push('\n');

    labels_used
}

/// Rendered cards with numbered actions
pub fn render_view(view: &ResultsView, preview_lines: usize) -> String {
    if view.is_empty() {
        return "No cards.\n".to_string();
    }

    let mut out = String::new();
    let mut labels_used = 0;
    for (i, unit) in view.units().iter().enumerate() {
        labels_used = render_unit(&mut out, i + 1, unit, labels_used, preview_lines);
    }

    if view.is_capped() {
        out.push_str(&format!(
            "Showing {} of {} cards\n",
            view.units().len(),
            view.total()
        ));
    }

    out
}

/// One `id<TAB>title` line per card
pub fn render_compact(view: &ResultsView) -> String {
    view.units()
        .iter()
        .map(|unit| {
            let card = unit.card();
            format!("{}\t{}\n", card.id(), card.title().unwrap_or_default())
        })
        .collect()
}

#[derive(Serialize)]
struct JsonCard<'a> {
    id: &'a str,
    card: &'a [ContentNode],
}

/// Displayed cards in feed shape, in display order
pub fn render_json(view: &ResultsView) -> Result<String> {
    let cards: Vec<JsonCard> = view
        .units()
        .iter()
        .map(|unit| JsonCard {
            id: unit.card().id(),
            card: unit.card().nodes(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&cards)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::library::Library;
    use crate::core::session::Session;
    use crate::core::store::CardStore;

    const FEED: &str = r#"{
        "a": [
            ["h1", ["Intro"], "a"],
            ["p", ["Read ", ["a", ["more"], "b"], " or ", ["a", ["docs"], "https://example.org"]]],
            ["p", ["lead ^1 alpha^2 beta"]],
            ["ul", [["li", ["one"]], ["li", ["two"]], ["li", ["three"]]]],
            ["tags", ["science", "math"]]
        ],
        "b": [["tags", ["math"]]]
    }"#;

    fn session() -> Session {
        colored::control::set_override(false);
        let store: CardStore = serde_json::from_str(FEED).unwrap();
        Session::new(Library::with_store(store))
    }

    #[test]
    fn test_superscript() {
        assert_eq!(superscript("12"), "¹²");
    }

    #[test]
    fn test_render_full_card() {
        let mut session = session();
        session.activate_heading_or_link("a");
        session.show_more(0);

        let out = render_view(session.view(), 100);
        let expected = "\
── 1. a

Intro [1]
Read more[2] or docs <https://example.org>
¹alpha²beta
  • one
  • two
  • three
#science[3]  #math[4]

";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_labels_follow_action_order() {
        let mut session = session();
        session.activate_tag("math");
        let out = render_view(session.view(), 100);
        let actions = session.view().actions();

        assert_eq!(actions.len(), 5);
        assert!(out.contains("#math[5]"));
    }

    #[test]
    fn test_truncated_preview() {
        let mut session = session();
        session.activate_heading_or_link("a");

        let out = render_view(session.view(), 2);
        assert!(out.contains("Intro [1]"));
        assert!(!out.contains("#science"));
        assert!(out.contains("show more (:more 1)"));

        session.show_more(0);
        let out = render_view(session.view(), 2);
        assert!(out.contains("#science[3]"));
        assert!(out.contains("show less (:less 1)"));
    }

    #[test]
    fn test_capped_footer() {
        let mut session = session().with_display_limit(1);
        session.activate_tag("math");
        assert!(render_view(session.view(), 6).ends_with("Showing 1 of 2 cards\n"));
    }

    #[test]
    fn test_empty_view() {
        assert_eq!(render_view(&ResultsView::empty(), 6), "No cards.\n");
    }

    #[test]
    fn test_compact() {
        let mut session = session();
        session.activate_tag("math");
        assert_eq!(render_compact(session.view()), "a\tIntro\nb\t\n");
    }

    #[test]
    fn test_json_keeps_order_and_shape() {
        let mut session = session();
        session.activate_tag("math");

        let value: serde_json::Value =
            serde_json::from_str(&render_json(session.view()).unwrap()).unwrap();
        assert_eq!(value[0]["id"], "a");
        assert_eq!(value[0]["card"][0], serde_json::json!(["h1", ["Intro"], "a"]));
        assert_eq!(value[1]["id"], "b");
    }
}
