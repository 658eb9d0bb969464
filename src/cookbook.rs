use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::SousError;
use crate::markup::Ingredient;
use crate::recipe::Recipe;

pub const SOUS_FILE_EXTENSION: &str = "sous";

/// Named recipes gathered from cookbook directories and individual files.
#[derive(Debug, Default)]
pub struct Cookbook {
    recipes: Vec<Recipe>,
}

impl Cookbook {
    /// Collects explicit recipe files first, then every `.sous` file found
    /// under the cookbook directories.
    ///
    /// Recipes without a header have no name and are skipped with a warning.
    pub fn collate<C, R>(cookbook_paths: C, recipe_paths: R) -> Result<Self, SousError>
    where
        C: IntoIterator,
        C::Item: AsRef<Path>,
        R: IntoIterator,
        R::Item: AsRef<Path>,
    {
        let mut collated: Vec<PathBuf> = recipe_paths
            .into_iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect();

        for cookbook_path in cookbook_paths {
            let found = find_files(cookbook_path.as_ref(), SOUS_FILE_EXTENSION)?;
            debug!(
                "Found {} recipe file(s) in {}",
                found.len(),
                cookbook_path.as_ref().display()
            );
            collated.extend(found);
        }

        let mut recipes = Vec::new();
        for path in collated {
            let recipe = Recipe::load(&path)?;
            if recipe.name().is_some() {
                recipes.push(recipe);
            } else {
                warn!("Ignoring recipe with no name at {}", path.display());
            }
        }

        Ok(Cookbook { recipes })
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Cookbook { recipes }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Ingredients of every recipe, recipe by recipe.
    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.recipes.iter().flat_map(|recipe| recipe.ingredients())
    }
}

/// Files with the given extension under `dir`, in file-name order.
///
/// Symbolic links to directories are not descended into; links to files
/// are kept.
pub fn find_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, SousError> {
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            SousError::io(path, e.into())
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            found.push(path.to_path_buf());
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collate_walks_directories_and_skips_unnamed() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sides");
        fs::create_dir(&nested).unwrap();

        fs::write(dir.path().join("b.sous"), "# Bread\n\n{500 g}[flour]\n").unwrap();
        fs::write(nested.join("a.sous"), "# Asparagus\n\n{1 bunch}[asparagus]\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "# Not a recipe\n").unwrap();
        fs::write(dir.path().join("untitled.sous"), "{1}[egg]\n").unwrap();

        let cookbook = Cookbook::collate([dir.path()], Vec::<PathBuf>::new()).unwrap();
        let names: Vec<_> = cookbook.recipes().iter().filter_map(Recipe::name).collect();
        assert_eq!(names, vec!["Bread", "Asparagus"]);
    }

    #[test]
    fn test_explicit_recipes_come_first() {
        let dir = tempfile::tempdir().unwrap();
        let cookbook_dir = dir.path().join("book");
        fs::create_dir(&cookbook_dir).unwrap();
        fs::write(cookbook_dir.join("soup.sous"), "# Soup\n{1}[onion]\n").unwrap();
        let single = dir.path().join("salad.sous");
        fs::write(&single, "# Salad\n{1}[lettuce]\n").unwrap();

        let cookbook = Cookbook::collate([&cookbook_dir], [&single]).unwrap();
        let ids: Vec<_> = cookbook.ingredients().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["lettuce", "onion"]);
    }

    #[test]
    fn test_find_files_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dump")).unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("dump").join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("a.sous"), "# A\n").unwrap();

        let found = find_files(dir.path(), "json").unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("b.json"), dir.path().join("dump").join("a.json")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_find_files_does_not_follow_directory_links() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("soup.sous"), "# Soup\n").unwrap();
        symlink(dir.path(), dir.path().join("loop")).unwrap();
        symlink(dir.path().join("soup.sous"), dir.path().join("zz-linked.sous")).unwrap();

        let found = find_files(dir.path(), SOUS_FILE_EXTENSION).unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("soup.sous"), dir.path().join("zz-linked.sous")]
        );
    }

    #[test]
    fn test_missing_recipe_file_is_an_error() {
        let result = Cookbook::collate(Vec::<PathBuf>::new(), ["/no/such/file.sous"]);
        assert!(matches!(result, Err(SousError::Io { .. })));
    }
}
