mod builder;
mod categories;

pub use builder::{IngredientSource, ShoppingListBuilder};
pub use categories::{Category, CategoryConfig};

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::error::SousError;
use crate::markup::Ingredient;
use crate::recipe::Recipe;

const UNCATEGORIZED: &str = "other";

/// How each shopping list line is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// `name (uses)`, with the count only when used more than once
    Compact,
    /// `name (q1, q2, ...)` with every quantity
    #[default]
    Expanded,
}

impl Format {
    pub const COMPACT: &'static str = "compact";
    pub const EXPANDED: &'static str = "expanded";

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Compact => Self::COMPACT,
            Format::Expanded => Self::EXPANDED,
        }
    }
}

impl FromStr for Format {
    type Err = SousError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            Self::COMPACT => Ok(Format::Compact),
            Self::EXPANDED => Ok(Format::Expanded),
            _ => Err(SousError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed of one ingredient, across all recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub quantities: Vec<String>,
}

impl Item {
    /// Identity used to deduplicate items.
    pub fn key(&self) -> &str {
        &self.name
    }

    pub fn render(&self, format: Format) -> String {
        match format {
            Format::Compact if self.quantities.len() > 1 => {
                format!("{} ({})", self.name, self.quantities.len())
            }
            Format::Expanded if !self.quantities.is_empty() => {
                format!("{} ({})", self.name, self.quantities.join(", "))
            }
            _ => self.name.clone(),
        }
    }
}

/// Merges ingredients sharing an id into one item per id, in order of first
/// appearance, collecting every quantity that was given.
pub fn aggregate<'a, I>(ingredients: I) -> Vec<Item>
where
    I: IntoIterator<Item = &'a Ingredient>,
{
    let mut items: Vec<Item> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for ingredient in ingredients {
        let index = match positions.get(ingredient.key()) {
            Some(&index) => index,
            None => {
                positions.insert(ingredient.key().to_string(), items.len());
                items.push(Item {
                    name: ingredient.id.clone(),
                    quantities: Vec::new(),
                });
                items.len() - 1
            }
        };

        if let Some(quantity) = &ingredient.quantity {
            items[index].quantities.push(quantity.clone());
        }
    }

    debug!("Aggregated {} distinct item(s)", items.len());
    items
}

/// A deduplicated list of things to buy.
#[derive(Debug, Clone)]
pub struct ShoppingList {
    items: Vec<Item>,
    format: Format,
    categories: Option<CategoryConfig>,
}

impl ShoppingList {
    /// Builds a list from ingredients that were already gathered.
    pub fn new<'a, I>(ingredients: I, format: Format, categories: Option<CategoryConfig>) -> Self
    where
        I: IntoIterator<Item = &'a Ingredient>,
    {
        ShoppingList {
            items: aggregate(ingredients),
            format,
            categories,
        }
    }

    /// Parses each recipe file and builds a list from all of their
    /// ingredients, minus the excluded ids.
    pub fn from_recipe_paths<P, S>(paths: &[P], exclusions: &[S]) -> Result<Self, SousError>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let recipes = paths
            .iter()
            .map(Recipe::load)
            .collect::<Result<Vec<_>, _>>()?;

        let mut list = Self::new(
            recipes.iter().flat_map(Recipe::ingredients),
            Format::default(),
            None,
        );
        list.exclude(exclusions)?;
        Ok(list)
    }

    pub fn builder() -> ShoppingListBuilder {
        ShoppingListBuilder::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn format_kind(&self) -> Format {
        self.format
    }

    pub fn categories(&self) -> Option<&CategoryConfig> {
        self.categories.as_ref()
    }

    /// Removes the items with the given ids.
    ///
    /// Every id must name an item; if one does not, nothing is removed.
    pub fn exclude<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<(), SousError> {
        let known: HashSet<&str> = self.items.iter().map(Item::key).collect();
        let excluded: Vec<&str> = ids.iter().map(|id| id.as_ref()).collect();
        if let Some(unknown) = excluded.iter().find(|id| !known.contains(**id)) {
            return Err(SousError::UnknownExclusion(unknown.to_string()));
        }

        let excluded: HashSet<&str> = excluded.into_iter().collect();
        self.items.retain(|item| !excluded.contains(item.key()));
        Ok(())
    }

    /// The rendered lines: grouped by category when a configuration is set,
    /// otherwise one alphabetical list.
    pub fn format(&self) -> Vec<String> {
        match &self.categories {
            Some(config) => self.render_grouped(config),
            None => self.render_as(self.format),
        }
    }

    /// Every item rendered in `format`, sorted alphabetically.
    pub fn render_as(&self, format: Format) -> Vec<String> {
        let mut lines: Vec<String> = self.items.iter().map(|item| item.render(format)).collect();
        lines.sort();
        lines
    }

    fn render_grouped(&self, config: &CategoryConfig) -> Vec<String> {
        let mut items: Vec<&Item> = self.items.iter().collect();
        items.sort_by_cached_key(|item| (config.sort_key(&item.name), item.render(self.format)));

        let mut lines = Vec::new();
        let mut current: Option<&str> = None;

        for item in items {
            let category = config.category_for(&item.name).unwrap_or(UNCATEGORIZED);
            if current != Some(category) {
                if current.is_some() {
                    lines.push(String::new());
                }
                lines.push(format!("[{category}]"));
                current = Some(category);
            }
            lines.push(item.render(self.format));
        }

        lines
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format().join("\n"))
    }
}
