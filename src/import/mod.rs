//! Turning recipes found on the web into `.sous` files.

mod amount;
mod downloader;
mod json_ld;
mod robots;

pub use amount::{AmountParser, ParsedIngredient, SimpleAmountParser};
pub use downloader::{Downloader, RecipeSource};
pub use robots::RobotsPolicy;

use std::path::Path;

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SousError;
use crate::text::join_present;

pub const SOUS_FORMAT_VERSION: u32 = 1;

/// Below this, an extracted ingredient name is reported as doubtful.
const LOW_CONFIDENCE: f32 = 0.5;

/// A recipe as scraped from a web page, and as persisted to JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedRecipe {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub cook_time: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub prep_time: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_time: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub yields: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions_list: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
}

/// Accepts `"30"` as well as `30`, as scrapers report times and yields both ways.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::String(s) => s,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
    }))
}

impl ScrapedRecipe {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SousError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SousError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes the recipe as pretty-printed UTF-8 JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SousError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| SousError::io(path, e))
    }

    /// Renders the recipe as `.sous` markup.
    ///
    /// Every ingredient sentence goes through `parser`; a sentence it cannot
    /// name fails the whole conversion.
    pub fn to_sous(&self, parser: &dyn AmountParser) -> Result<String, SousError> {
        let mut lines = Vec::new();
        lines.extend(self.title_lines());
        lines.extend(self.frontmatter_lines());
        lines.extend(self.intro_lines());
        lines.extend(self.ingredient_lines(parser)?);
        lines.extend(self.step_lines());
        Ok(lines.join("\n"))
    }

    /// Renders the recipe and writes it to `path`.
    pub fn write_sous(
        &self,
        path: impl AsRef<Path>,
        parser: &dyn AmountParser,
    ) -> Result<String, SousError> {
        let path = path.as_ref();
        let sous = self.to_sous(parser)?;
        std::fs::write(path, &sous).map_err(|e| SousError::io(path, e))?;
        Ok(sous)
    }

    fn title_lines(&self) -> Vec<String> {
        vec![format!("# {}", self.title), String::new()]
    }

    fn frontmatter_lines(&self) -> Vec<String> {
        let attributes = [
            ("source", self.canonical_url.as_deref()),
            ("author", self.author.as_deref()),
            ("cook-time", self.cook_time.as_deref()),
            ("prep-time", self.prep_time.as_deref()),
            ("total-time", self.total_time.as_deref()),
            ("yield", self.yields.as_deref()),
        ];

        let mut lines: Vec<String> = attributes
            .iter()
            .filter_map(|(name, value)| match value {
                Some(value) if !value.trim().is_empty() => Some(format!("@{name} {value}")),
                _ => None,
            })
            .collect();
        lines.push(format!("@syntax {SOUS_FORMAT_VERSION}"));
        lines.push(String::new());
        lines
    }

    fn intro_lines(&self) -> Vec<String> {
        match self.description.as_deref() {
            Some(description) if !description.trim().is_empty() => {
                vec![description.to_string(), String::new()]
            }
            _ => vec![],
        }
    }

    fn ingredient_lines(&self, parser: &dyn AmountParser) -> Result<Vec<String>, SousError> {
        let mut lines = Vec::new();

        for sentence in &self.ingredients {
            let parsed = parser.parse(sentence)?;
            if parsed.confidence < LOW_CONFIDENCE {
                warn!(
                    "Low confidence ({:.2}) in ingredient name '{}' from '{}'",
                    parsed.confidence,
                    parsed.names.join("|"),
                    sentence
                );
            }

            let names: Vec<String> = parsed.names.iter().map(|n| n.to_lowercase()).collect();
            let amount = format!("{{{}}}", parsed.amount.as_deref().unwrap_or_default());
            let definition = format!("{amount}[{}]", names.join("|"));
            lines.push(join_present(
                " ",
                [Some(definition.as_str()), parsed.preparation.as_deref()],
            ));
        }

        if !lines.is_empty() {
            lines.push(String::new());
        }

        Ok(lines)
    }

    fn step_lines(&self) -> Vec<String> {
        self.instructions_list
            .iter()
            .map(|step| format!("{}\n", step.trim()))
            .collect()
    }
}
