use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

use super::ScrapedRecipe;

/// Finds the schema.org `Recipe` object embedded in a page's JSON-LD
/// scripts and maps it onto a [`ScrapedRecipe`].
pub fn extract_recipe(html: &str, url: &str) -> Option<ScrapedRecipe> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script[type='application/ld+json']").ok()?;

    for (index, script) in document.select(&selector).enumerate() {
        let raw_json = script.inner_html();
        let json_ld = match serde_json::from_str::<Value>(&raw_json) {
            Ok(json_ld) => json_ld,
            Err(e) => {
                debug!("JSON-LD script {} is not valid JSON: {}", index, e);
                continue;
            }
        };

        let Some(recipe_json) = find_recipe(&json_ld) else {
            debug!("JSON-LD script {} holds no recipe", index);
            continue;
        };

        match serde_json::from_value::<JsonLdRecipe>(recipe_json.clone()) {
            Ok(recipe) => return Some(recipe.into_scraped(url)),
            Err(e) => debug!("JSON-LD script {} has an unusable recipe: {}", index, e),
        }
    }

    None
}

fn find_recipe(json_ld: &Value) -> Option<&Value> {
    if let Some(items) = json_ld.as_array() {
        items.iter().find(|item| is_recipe_type(item))
    } else if is_recipe_type(json_ld) {
        Some(json_ld)
    } else {
        json_ld
            .get("@graph")
            .and_then(Value::as_array)
            .and_then(|items| items.iter().find(|item| is_recipe_type(item)))
    }
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .any(|kind| kind.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    description: Option<String>,
    url: Option<String>,
    author: Option<Author>,
    #[serde(rename = "recipeIngredient", default)]
    recipe_ingredient: Vec<String>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<RecipeYield>,
    #[serde(rename = "prepTime")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime")]
    cook_time: Option<String>,
    #[serde(rename = "totalTime")]
    total_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Author {
    String(String),
    Object(AuthorObject),
    Multiple(Vec<AuthorObject>),
}

#[derive(Debug, Deserialize)]
struct AuthorObject {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    String(String),
    Number(i64),
    Array(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Steps(Vec<Instruction>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Instruction {
    Text(String),
    Section {
        #[serde(rename = "itemListElement")]
        item_list_element: Vec<Instruction>,
    },
    Step {
        text: Option<String>,
        name: Option<String>,
    },
}

impl Instruction {
    fn collect_into(self, steps: &mut Vec<String>) {
        match self {
            Instruction::Text(text) => steps.push(text),
            Instruction::Section { item_list_element } => {
                for step in item_list_element {
                    step.collect_into(steps);
                }
            }
            Instruction::Step { text, name } => {
                if let Some(text) = text.or(name) {
                    steps.push(text);
                }
            }
        }
    }
}

impl JsonLdRecipe {
    fn into_scraped(self, url: &str) -> ScrapedRecipe {
        let author = self.author.and_then(|author| match author {
            Author::String(name) => Some(name),
            Author::Object(obj) => obj.name,
            Author::Multiple(authors) => {
                let names: Vec<String> = authors.into_iter().filter_map(|a| a.name).collect();
                if names.is_empty() {
                    None
                } else {
                    Some(names.join(", "))
                }
            }
        });

        let yields = self.recipe_yield.and_then(|recipe_yield| match recipe_yield {
            RecipeYield::String(s) => Some(s),
            RecipeYield::Number(n) => Some(n.to_string()),
            // Prefer the descriptive entry ("4 servings") over a bare number
            RecipeYield::Array(values) => values
                .iter()
                .find(|v| v.contains(char::is_alphabetic))
                .or_else(|| values.first())
                .cloned(),
        });

        let instructions_list = match self.recipe_instructions {
            Some(RecipeInstructions::String(text)) => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Some(RecipeInstructions::Steps(steps)) => {
                let mut collected = Vec::new();
                for step in steps {
                    step.collect_into(&mut collected);
                }
                collected
            }
            None => Vec::new(),
        };

        ScrapedRecipe {
            title: decode_html_symbols(&self.name),
            description: cleaned(self.description),
            canonical_url: Some(self.url.unwrap_or_else(|| url.to_string())),
            author: cleaned(author),
            cook_time: cleaned(self.cook_time),
            prep_time: cleaned(self.prep_time),
            total_time: cleaned(self.total_time),
            yields: cleaned(yields),
            ingredients: self
                .recipe_ingredient
                .iter()
                .map(|i| decode_html_symbols(i))
                .filter(|i| !i.is_empty())
                .collect(),
            instructions_list: instructions_list
                .iter()
                .map(|s| decode_html_symbols(s))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

fn cleaned(value: Option<String>) -> Option<String> {
    value
        .map(|v| decode_html_symbols(&v))
        .filter(|v| !v.is_empty())
}

fn decode_html_symbols(text: &str) -> String {
    // Some sites double-encode entities ("&amp;amp;")
    decode_html_entities(&decode_html_entities(text))
        .trim()
        .to_string()
}
