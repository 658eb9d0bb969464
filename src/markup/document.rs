use std::path::Path;

use log::debug;

use super::{classify_line, Node};
use crate::error::SousError;

/// Nodes from one run of consecutive non-blank lines.
pub type Paragraph = Vec<Node>;

/// A parsed `.sous` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Parses recipe markup. Never fails: unrecognized lines become prose.
    pub fn parse(text: &str) -> Self {
        let mut paragraphs = Vec::new();
        let mut paragraph = Paragraph::new();

        // lines() handles \n and \r\n; a lone \r also ends a line
        for line in text.lines().flat_map(|line| line.split('\r')) {
            let contents = line.trim();

            if !contents.is_empty() {
                paragraph.push(classify_line(contents));
            } else if !paragraph.is_empty() {
                paragraphs.push(std::mem::take(&mut paragraph));
            }
        }

        if !paragraph.is_empty() {
            paragraphs.push(paragraph);
        }

        debug!("Parsed document with {} paragraph(s)", paragraphs.len());
        Document { paragraphs }
    }

    /// Reads and parses a recipe file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SousError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SousError::io(path, e))?;
        Ok(Self::parse(&text))
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.paragraphs.iter().flatten()
    }

    /// One line per node naming its kind, with a blank line closing each
    /// paragraph. Prose lines also show how many ingredients they mention.
    pub fn summarize(&self) -> String {
        let mut result = Vec::new();

        for paragraph in &self.paragraphs {
            for node in paragraph {
                match node {
                    Node::Prose { ingredients, .. } => {
                        result.push(format!("{} ({})", node.kind(), ingredients.len()))
                    }
                    _ => result.push(node.kind().to_string()),
                }
            }
            result.push(String::new());
        }

        result.join("\n")
    }
}
