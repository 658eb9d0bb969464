//! The `.sous` recipe markup.
//!
//! A recipe file is a sequence of paragraphs separated by blank lines. Each
//! non-blank line is classified into exactly one [`Node`]:
//!
//! ```text
//! # Garlic Broccoli              header (level = number of '#')
//! @source https://example.com    attribute
//! % roast, don't steam           comment
//! {3 cloves}[garlic], minced     block ingredient definition
//! Toss with {1 tbsp}[olive oil]. prose, with inline ingredients
//! ```

mod document;
mod ingredient;

pub use document::{Document, Paragraph};
pub use ingredient::{
    parse_block_definition, parse_inline_definitions, parse_references, Ingredient, IngredientRef,
};

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<level>#+)\s+(?P<name>.+)$").unwrap());
static ATTRIBUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@(?P<name>[\w-]+)\s+(?P<value>.+)$").unwrap());
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^%\s+(?P<comment>.+)$").unwrap());

/// One classified line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Header { level: usize, name: String },
    Attribute { name: String, value: String },
    Comment { text: String },
    Ingredient(Ingredient),
    /// Free text, with any `{quantity}[id]` spans found inside it.
    Prose { text: String, ingredients: Vec<Ingredient> },
}

impl Node {
    /// Name of the node's kind, as shown by [`Document::summarize`].
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Header { .. } => "Header",
            Node::Attribute { .. } => "Attribute",
            Node::Comment { .. } => "Comment",
            Node::Ingredient(_) => "Ingredient",
            Node::Prose { .. } => "Prose",
        }
    }
}

/// Classifies a single trimmed, non-empty line.
///
/// Rules are tried in order (header, attribute, comment, block ingredient)
/// and prose is the fallback, so every line yields a node.
pub fn classify_line(line: &str) -> Node {
    if let Some(caps) = HEADER_RE.captures(line) {
        return Node::Header {
            level: caps["level"].len(),
            name: caps["name"].to_string(),
        };
    }

    if let Some(caps) = ATTRIBUTE_RE.captures(line) {
        return Node::Attribute {
            name: caps["name"].to_string(),
            value: caps["value"].to_string(),
        };
    }

    if let Some(caps) = COMMENT_RE.captures(line) {
        return Node::Comment {
            text: caps["comment"].to_string(),
        };
    }

    if let Some(ingredient) = parse_block_definition(line) {
        return Node::Ingredient(ingredient);
    }

    let ingredients = parse_inline_definitions(line);
    trace!("prose with {} inline ingredient(s): {}", ingredients.len(), line);
    Node::Prose {
        text: line.to_string(),
        ingredients,
    }
}
