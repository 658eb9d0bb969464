use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::join_present;

static BLOCK_DEFINITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\{(?P<quantity>[^}]*)\}(?P<descriptors>[^\[]*)\[(?P<id>[^,\]]+)\](?P<preparation>.*)$",
    )
    .unwrap()
});
static INLINE_DEFINITION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(?P<quantity>[^}]*)\}\[(?P<id>[^,\]]+)\]").unwrap());
static REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(?P<ref>[^,\]]+)\](\((?P<id>[^)]+)\))?").unwrap());

/// An ingredient declared in a recipe.
///
/// Two ingredients with the same `id` are the same thing to shop for, no
/// matter how much of it or how it is prepared. Code that deduplicates goes
/// through [`Ingredient::key`]; the derived `PartialEq` compares every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: String,
    pub quantity: Option<String>,
    pub descriptors: Option<String>,
    pub preparation: Option<String>,
}

impl Ingredient {
    pub fn new(id: impl Into<String>) -> Self {
        Ingredient {
            id: id.into(),
            quantity: None,
            descriptors: None,
            preparation: None,
        }
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = non_empty(quantity.into());
        self
    }

    pub fn with_descriptors(mut self, descriptors: impl Into<String>) -> Self {
        self.descriptors = non_empty(descriptors.into());
        self
    }

    pub fn with_preparation(mut self, preparation: impl Into<String>) -> Self {
        self.preparation = non_empty(preparation.into());
        self
    }

    /// Identity used when merging ingredients across recipes.
    pub fn key(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = join_present(
            " ",
            [
                self.quantity.as_deref(),
                self.descriptors.as_deref(),
                Some(self.id.as_str()),
                self.preparation.as_deref(),
            ],
        );
        f.write_str(&joined)
    }
}

/// A bare `[ref]` or `[ref](id)` mention in prose.
///
/// Nothing resolves these yet; they are only recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRef {
    pub reference: String,
    pub id: Option<String>,
}

/// Parses a line wholly dedicated to one ingredient:
/// `{quantity}descriptors[id]preparation`.
///
/// Descriptors and preparation lose surrounding punctuation and whitespace;
/// empty pieces become `None`.
pub fn parse_block_definition(line: &str) -> Option<Ingredient> {
    let caps = BLOCK_DEFINITION_RE.captures(line)?;

    Some(Ingredient {
        id: caps["id"].to_string(),
        quantity: non_empty(caps["quantity"].to_string()),
        descriptors: non_empty(trim_punctuation(&caps["descriptors"]).to_string()),
        preparation: non_empty(trim_punctuation(&caps["preparation"]).to_string()),
    })
}

/// Finds every `{quantity}[id]` span in a line, left to right.
pub fn parse_inline_definitions(line: &str) -> Vec<Ingredient> {
    INLINE_DEFINITION_RE
        .captures_iter(line)
        .map(|caps| Ingredient {
            id: caps["id"].to_string(),
            quantity: non_empty(caps["quantity"].to_string()),
            descriptors: None,
            preparation: None,
        })
        .collect()
}

/// Finds bare `[ref]` / `[ref](id)` mentions in a line.
pub fn parse_references(line: &str) -> Vec<IngredientRef> {
    REFERENCE_RE
        .captures_iter(line)
        .map(|caps| IngredientRef {
            reference: caps["ref"].to_string(),
            id: caps.name("id").map(|m| m.as_str().to_string()),
        })
        .collect()
}

fn trim_punctuation(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
