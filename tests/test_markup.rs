use sous::markup::{parse_block_definition, parse_inline_definitions, Node};
use sous::{Document, Ingredient, Recipe};

const GARLIC_BROCCOLI: &str = "# Garlic Broccoli

@source https://example.com/garlic-broccoli
@yield 4 servings
% roast, don't steam

{1 head}[broccoli], cut into florets
{3 cloves}fresh[garlic], minced
{}[kosher salt]


Heat the oven to 425F.

Toss the [broccoli] with {2 tbsp}[olive oil] and {1 pinch}[red pepper flakes].
Roast for 20 minutes.
";

#[test]
fn test_paragraphs_never_hold_blank_lines() {
    let document = Document::parse(GARLIC_BROCCOLI);

    let sizes: Vec<usize> = document.paragraphs().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![1, 3, 3, 1, 2]);

    let non_blank = GARLIC_BROCCOLI.lines().filter(|l| !l.trim().is_empty()).count();
    assert_eq!(document.nodes().count(), non_blank);
}

#[test]
fn test_line_kinds() {
    let document = Document::parse(GARLIC_BROCCOLI);
    let kinds: Vec<&str> = document.nodes().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "Header",
            "Attribute",
            "Attribute",
            "Comment",
            "Ingredient",
            "Ingredient",
            "Ingredient",
            "Prose",
            "Prose",
            "Prose",
        ]
    );
}

#[test]
fn test_summarize() {
    let document = Document::parse(GARLIC_BROCCOLI);
    assert_eq!(
        document.summarize(),
        "Header\n\nAttribute\nAttribute\nComment\n\nIngredient\nIngredient\nIngredient\n\nProse (0)\n\nProse (2)\nProse (0)\n"
    );
}

#[test]
fn test_block_definition() {
    assert_eq!(
        parse_block_definition("{3 cloves}[garlic], minced"),
        Some(Ingredient::new("garlic").with_quantity("3 cloves").with_preparation("minced"))
    );
    assert_eq!(parse_block_definition("Mince the [garlic]."), None);
}

#[test]
fn test_inline_definitions() {
    let found = parse_inline_definitions("Add {1 cup}[stock] and {}[salt] to taste.");
    assert_eq!(
        found,
        vec![Ingredient::new("stock").with_quantity("1 cup"), Ingredient::new("salt")]
    );
    assert!(parse_inline_definitions("Stir well.").is_empty());
}

#[test]
fn test_recipe_from_document() {
    let recipe = Recipe::parse(GARLIC_BROCCOLI);

    assert_eq!(recipe.name(), Some("Garlic Broccoli"));
    let attributes: Vec<(&str, &str)> = recipe.attributes().collect();
    assert_eq!(
        attributes,
        vec![
            ("source", "https://example.com/garlic-broccoli"),
            ("yield", "4 servings")
        ]
    );

    let labels: Vec<String> = recipe.ingredients().iter().map(|i| i.to_string()).collect();
    assert_eq!(
        labels,
        vec![
            "1 head broccoli cut into florets",
            "3 cloves fresh garlic minced",
            "kosher salt",
            "2 tbsp olive oil",
            "1 pinch red pepper flakes",
        ]
    );
}

#[test]
fn test_recipe_ingredients_are_stable() {
    let recipe = Recipe::parse(GARLIC_BROCCOLI);
    let first = recipe.ingredients().to_vec();
    assert_eq!(recipe.ingredients(), first.as_slice());
}

#[test]
fn test_load_missing_file() {
    let result = Document::load("/definitely/not/here.sous");
    assert!(matches!(result, Err(sous::SousError::Io { .. })));
}
