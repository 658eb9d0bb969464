//! Read `.sous` recipe files, turn their ingredients into shopping lists, and
//! import recipes from the web.
//!
//! # Example
//!
//! ```
//! use sous::{Format, Recipe, ShoppingList};
//!
//! let recipe = Recipe::parse("# Toast\n\n{2 slices}[bread]\nSpread with {1 tbsp}[butter].\n");
//! let list = ShoppingList::new(recipe.ingredients(), Format::Expanded, None);
//! assert_eq!(list.format(), vec!["bread (2 slices)", "butter (1 tbsp)"]);
//! ```

pub mod config;
pub mod cookbook;
pub mod error;
pub mod export;
pub mod import;
pub mod markup;
pub mod recipe;
pub mod select;
pub mod shopping_list;
pub mod text;

use std::path::Path;

use log::debug;

pub use config::Settings;
pub use cookbook::Cookbook;
pub use error::SousError;
pub use export::{export_items, ExportReport, TaskExporter, TodoistClient};
pub use import::{AmountParser, Downloader, RecipeSource, ScrapedRecipe, SimpleAmountParser};
pub use markup::{Document, Ingredient, Node};
pub use recipe::Recipe;
pub use shopping_list::{CategoryConfig, Format, Item, ShoppingList, ShoppingListBuilder};

/// Fetches a recipe from a URL (or a saved JSON file) with default download
/// settings.
pub fn fetch_recipe(source: &str) -> Result<ScrapedRecipe, SousError> {
    let downloader = Downloader::new(&Settings::default().download)?;
    downloader.fetch(source)
}

/// Fetches a recipe and renders it as `.sous` markup.
pub fn import_recipe(source: &str) -> Result<String, SousError> {
    let recipe = fetch_recipe(source)?;
    debug!("{:#?}", recipe);
    recipe.to_sous(&SimpleAmountParser)
}

/// Builds a shopping list from recipe files, without the excluded ids.
pub fn build_shopping_list<P, S>(
    recipe_paths: &[P],
    exclusions: &[S],
) -> Result<ShoppingList, SousError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    ShoppingList::from_recipe_paths(recipe_paths, exclusions)
}
