use std::fs;

use sous::{build_shopping_list, CategoryConfig, Format, Ingredient, ShoppingList, SousError};

const CATEGORIES: &str = r#"
[produce]
items = ["garlic", "broccoli"]

[spices]
items = ["kosher salt", "red pepper flakes"]

[notes]
description = "not a category"
"#;

fn garlic_broccoli_ingredients() -> Vec<Ingredient> {
    vec![
        Ingredient::new("kosher salt"),
        Ingredient::new("broccoli").with_quantity("2"),
        Ingredient::new("garlic").with_quantity("3 cloves"),
        Ingredient::new("red pepper flakes"),
    ]
}

#[test]
fn test_grouped_by_category() {
    let config = CategoryConfig::from_toml_str(CATEGORIES).unwrap();
    let list = ShoppingList::new(
        &garlic_broccoli_ingredients(),
        Format::Expanded,
        Some(config),
    );

    assert_eq!(
        list.format(),
        vec![
            "[produce]",
            "broccoli (2)",
            "garlic (3 cloves)",
            "",
            "[spices]",
            "kosher salt",
            "red pepper flakes",
        ]
    );
}

#[test]
fn test_uncategorized_items_come_last() {
    let config = CategoryConfig::from_toml_str(CATEGORIES).unwrap();
    let mut ingredients = garlic_broccoli_ingredients();
    ingredients.push(Ingredient::new("olive oil").with_quantity("2 tbsp"));
    ingredients.push(Ingredient::new("Anchovies"));

    let list = ShoppingList::new(&ingredients, Format::Expanded, Some(config));
    let lines = list.format();

    assert_eq!(
        &lines[lines.len() - 4..],
        &["", "[other]", "Anchovies", "olive oil (2 tbsp)"]
    );
    assert_ne!(lines.last().map(String::as_str), Some(""));
}

#[test]
fn test_flat_output_ignores_input_order() {
    let ingredients = garlic_broccoli_ingredients();
    let expected = vec![
        "broccoli (2)",
        "garlic (3 cloves)",
        "kosher salt",
        "red pepper flakes",
    ];

    let mut reversed = ingredients.clone();
    reversed.reverse();
    let mut rotated = ingredients.clone();
    rotated.rotate_left(2);

    for ordering in [ingredients, reversed, rotated] {
        let list = ShoppingList::new(&ordering, Format::Expanded, None);
        assert_eq!(list.format(), expected);
    }
}

#[test]
fn test_builder_with_exclusions() {
    let list = ShoppingList::builder()
        .ingredients(garlic_broccoli_ingredients())
        .exclude("kosher salt")
        .format(Format::Compact)
        .build()
        .unwrap();

    assert_eq!(list.format_kind(), Format::Compact);
    assert_eq!(list.format(), vec!["broccoli", "garlic", "red pepper flakes"]);
}

#[test]
fn test_builder_rejects_unknown_exclusion() {
    let result = ShoppingList::builder()
        .ingredients(garlic_broccoli_ingredients())
        .exclude("saffron")
        .build();

    match result {
        Err(SousError::UnknownExclusion(id)) => assert_eq!(id, "saffron"),
        other => panic!("Expected UnknownExclusion, got {other:?}"),
    }
}

#[test]
fn test_from_recipe_files() {
    let dir = tempfile::tempdir().unwrap();
    let soup = dir.path().join("soup.sous");
    let bread = dir.path().join("bread.sous");
    fs::write(&soup, "# Soup\n\n{1}[onion]\n{2 cups}[stock]\n{1 tsp}[salt]\n").unwrap();
    fs::write(&bread, "# Bread\n\n{3 cups}[flour]\nAdd {1 tsp}[salt] and {1 cup}[water].\n")
        .unwrap();

    let list = build_shopping_list(&[&soup, &bread], &["water"]).unwrap();
    assert_eq!(
        list.to_string(),
        "flour (3 cups)\nonion (1)\nsalt (1 tsp, 1 tsp)\nstock (2 cups)"
    );

    let list = ShoppingList::builder()
        .recipe(&soup)
        .recipe(&bread)
        .format(Format::Compact)
        .build()
        .unwrap();
    assert_eq!(
        list.format(),
        vec!["flour", "onion", "salt (2)", "stock", "water"]
    );
}

#[test]
fn test_missing_recipe_file() {
    let result = build_shopping_list(&["/no/such/recipe.sous"], &[] as &[&str]);
    assert!(matches!(result, Err(SousError::Io { .. })));
}

#[test]
fn test_categories_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.toml");
    fs::write(&path, CATEGORIES).unwrap();

    let config = CategoryConfig::load(&path).unwrap();
    let names: Vec<&str> = config.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["produce", "spices"]);
    assert_eq!(config.category_for("Garlic"), Some("produce"));
    assert_eq!(config.category_for("saffron"), None);
}

#[test]
fn test_invalid_category_file() {
    let result = CategoryConfig::from_toml_str("[produce\nitems = ");
    assert!(matches!(result, Err(SousError::Toml(_))));
}
