use std::path::PathBuf;

use log::info;

use super::{CategoryConfig, Format, ShoppingList};
use crate::cookbook::Cookbook;
use crate::error::SousError;
use crate::markup::Ingredient;
use crate::recipe::Recipe;
use crate::text::pluralize;

/// Where the ingredients of a shopping list come from
#[derive(Debug, Clone)]
pub enum IngredientSource {
    /// A `.sous` file to parse
    RecipeFile(PathBuf),
    /// A directory searched recursively for `.sous` files
    Cookbook(PathBuf),
    /// Ingredients that were already picked
    Ingredients(Vec<Ingredient>),
}

/// Builder for configuring and assembling a shopping list
#[derive(Debug, Default)]
pub struct ShoppingListBuilder {
    sources: Vec<IngredientSource>,
    exclusions: Vec<String>,
    format: Format,
    categories: Option<CategoryConfig>,
}

impl ShoppingListBuilder {
    /// Add a single recipe file
    ///
    /// # Example
    /// ```no_run
    /// use sous::ShoppingList;
    ///
    /// let list = ShoppingList::builder()
    ///     .recipe("recipes/garlic-broccoli.sous")
    ///     .build()?;
    /// # Ok::<(), sous::SousError>(())
    /// ```
    pub fn recipe(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(IngredientSource::RecipeFile(path.into()));
        self
    }

    /// Add every recipe found under a directory
    pub fn cookbook(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(IngredientSource::Cookbook(path.into()));
        self
    }

    /// Add ingredients directly, e.g. ones picked interactively
    pub fn ingredients(mut self, ingredients: impl IntoIterator<Item = Ingredient>) -> Self {
        self.sources
            .push(IngredientSource::Ingredients(ingredients.into_iter().collect()));
        self
    }

    /// Leave out the item with this id. Building fails if no such item exists.
    pub fn exclude(mut self, id: impl Into<String>) -> Self {
        self.exclusions.push(id.into());
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Group items by category when rendering
    ///
    /// # Example
    /// ```
    /// use sous::{CategoryConfig, Format, Ingredient, ShoppingList};
    ///
    /// let config = CategoryConfig::from_toml_str("[dairy]\nitems = [\"milk\"]\n")?;
    /// let list = ShoppingList::builder()
    ///     .ingredients([Ingredient::new("milk"), Ingredient::new("garlic")])
    ///     .format(Format::Compact)
    ///     .categories(config)
    ///     .build()?;
    ///
    /// assert_eq!(list.format(), vec!["[dairy]", "milk", "", "[other]", "garlic"]);
    /// # Ok::<(), sous::SousError>(())
    /// ```
    pub fn categories(mut self, categories: CategoryConfig) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Read every source and build the list
    ///
    /// # Errors
    /// Returns `SousError` if:
    /// - A recipe file or cookbook directory cannot be read
    /// - An excluded id matches no item
    pub fn build(self) -> Result<ShoppingList, SousError> {
        let mut ingredients: Vec<Ingredient> = Vec::new();
        let mut recipe_count = 0;

        for source in self.sources {
            match source {
                IngredientSource::RecipeFile(path) => {
                    let recipe = Recipe::load(&path)?;
                    ingredients.extend(recipe.ingredients().iter().cloned());
                    recipe_count += 1;
                }
                IngredientSource::Cookbook(path) => {
                    let cookbook = Cookbook::collate([path], Vec::<PathBuf>::new())?;
                    ingredients.extend(cookbook.ingredients().cloned());
                    recipe_count += cookbook.recipes().len();
                }
                IngredientSource::Ingredients(picked) => ingredients.extend(picked),
            }
        }

        info!("Building shopping list for {}", pluralize("recipe", recipe_count));

        let mut list = ShoppingList::new(&ingredients, self.format, self.categories);
        list.exclude(&self.exclusions)?;
        Ok(list)
    }
}
