use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

use crate::error::SousError;
use crate::markup::{Document, Ingredient, Node};

/// A recipe backed by a parsed document.
///
/// The document is never mutated after parsing, so the derived name and
/// ingredient list are computed on first use and kept for the recipe's
/// lifetime.
#[derive(Debug)]
pub struct Recipe {
    path: Option<PathBuf>,
    document: Document,
    name: OnceCell<Option<String>>,
    ingredients: OnceCell<Vec<Ingredient>>,
}

impl Recipe {
    pub fn new(document: Document) -> Self {
        Recipe {
            path: None,
            document,
            name: OnceCell::new(),
            ingredients: OnceCell::new(),
        }
    }

    pub fn parse(text: &str) -> Self {
        Self::new(Document::parse(text))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SousError> {
        let path = path.as_ref();
        let mut recipe = Self::new(Document::load(path)?);
        recipe.path = Some(path.to_path_buf());
        Ok(recipe)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Name of the first header in the recipe, if there is one.
    pub fn name(&self) -> Option<&str> {
        self.name
            .get_or_init(|| {
                self.document.nodes().find_map(|node| match node {
                    Node::Header { name, .. } => Some(name.clone()),
                    _ => None,
                })
            })
            .as_deref()
    }

    /// Every ingredient in document order: block definitions as they appear,
    /// and the inline ingredients of each prose line.
    pub fn ingredients(&self) -> &[Ingredient] {
        self.ingredients.get_or_init(|| {
            let mut ingredients = Vec::new();

            for node in self.document.nodes() {
                match node {
                    Node::Ingredient(ingredient) => ingredients.push(ingredient.clone()),
                    Node::Prose {
                        ingredients: inline,
                        ..
                    } => ingredients.extend(inline.iter().cloned()),
                    _ => {}
                }
            }

            ingredients
        })
    }

    /// `@name value` attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.document.nodes().filter_map(|node| match node {
            Node::Attribute { name, value } => Some((name.as_str(), value.as_str())),
            _ => None,
        })
    }
}
