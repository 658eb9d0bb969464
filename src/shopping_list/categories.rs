use std::path::Path;

use log::debug;
use toml::{Table, Value};

use crate::error::SousError;

/// A named group of items, e.g. an aisle of the grocery store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    /// Lowercased item names
    pub items: Vec<String>,
}

impl Category {
    fn contains(&self, normalized: &str) -> bool {
        self.items.iter().any(|item| item == normalized)
    }
}

/// Groups and orders shopping list items.
///
/// Parsed from a TOML file where each table with an `items` array is a
/// category. Tables keep their file order, which is the order categories
/// are rendered in:
///
/// ```toml
/// [dairy]
/// items = ["milk", "butter", "eggs"]
///
/// [produce]
/// items = ["potatoes", "onions", "garlic"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryConfig {
    categories: Vec<Category>,
}

impl CategoryConfig {
    pub fn new(categories: Vec<Category>) -> Self {
        CategoryConfig { categories }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SousError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SousError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Tables without an `items` list of strings are ignored.
    pub fn from_toml_str(content: &str) -> Result<Self, SousError> {
        let table: Table = content.parse()?;
        let mut categories = Vec::new();

        for (name, value) in table {
            let Some(Value::Array(items)) = value.get("items") else {
                debug!("Skipping table '{}' without an items list", name);
                continue;
            };

            let mut normalized = Vec::with_capacity(items.len());
            for item in items.iter().filter_map(Value::as_str) {
                let item = item.to_lowercase();
                if !normalized.contains(&item) {
                    normalized.push(item);
                }
            }

            categories.push(Category {
                name,
                items: normalized,
            });
        }

        Ok(CategoryConfig { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category holding `item_name`, compared case-insensitively.
    pub fn category_for(&self, item_name: &str) -> Option<&str> {
        self.position(item_name)
            .map(|index| self.categories[index].name.as_str())
    }

    /// Orders items by category position, then alphabetically.
    /// Uncategorized items sort after every category.
    pub fn sort_key(&self, item_name: &str) -> (usize, String) {
        let index = self.position(item_name).unwrap_or(self.categories.len());
        (index, item_name.to_lowercase())
    }

    fn position(&self, item_name: &str) -> Option<usize> {
        let normalized = item_name.to_lowercase();
        self.categories
            .iter()
            .position(|category| category.contains(&normalized))
    }
}
