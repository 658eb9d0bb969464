use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SousError;

const NUMBER: &str = r"(?:\d+(?:[./]\d+)?|\d*[¼½¾⅓⅔⅛⅜⅝⅞])";

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?P<amount>{NUMBER}(?:\s+{NUMBER})?(?:\s*(?:-|–|to)\s*{NUMBER})?)\s*(?P<rest>.*)$"
    ))
    .unwrap()
});
static UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<unit>cups?|tablespoons?|tbsps?|teaspoons?|tsps?|pounds?|lbs?|ounces?|oz|grams?|g|kilograms?|kg|milliliters?|millilitres?|ml|liters?|litres?|l|pinch(?:es)?|dash(?:es)?|cloves?|heads?|bunch(?:es)?|cans?|packages?|sticks?|slices?|quarts?|pints?|sprigs?|handfuls?)\.?(?:\s+|$)(?P<rest>.*)$",
    )
    .unwrap()
});
static OF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^of\s+").unwrap());
static ALTERNATIVES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+or\s+").unwrap());

/// Structured reading of a free-text ingredient sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredient {
    /// Ingredient name followed by any alternatives ("butter or margarine")
    pub names: Vec<String>,
    /// Amount with its unit, e.g. "2 cups"
    pub amount: Option<String>,
    pub preparation: Option<String>,
    /// How sure the parser is about `names`, from 0 to 1
    pub confidence: f32,
}

/// Splits an ingredient sentence like "2 cups flour, sifted" into its parts.
pub trait AmountParser {
    /// Fails when no ingredient name can be found.
    fn parse(&self, sentence: &str) -> Result<ParsedIngredient, SousError>;
}

/// Pattern-based parser: a leading amount (whole numbers, decimals,
/// fractions, ranges) with an optional unit, then the name up to the first
/// comma. Whatever follows the comma is the preparation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleAmountParser;

impl AmountParser for SimpleAmountParser {
    fn parse(&self, sentence: &str) -> Result<ParsedIngredient, SousError> {
        let sentence = sentence.trim();
        let (head, preparation) = match sentence.split_once(',') {
            Some((head, tail)) => (head.trim(), non_empty(tail.trim())),
            None => (sentence, None),
        };

        let (amount, rest) = match AMOUNT_RE.captures(head) {
            Some(caps) => {
                let number = caps["amount"].to_string();
                let rest = caps.name("rest").map_or("", |m| m.as_str());
                match UNIT_RE.captures(rest) {
                    Some(unit) => (
                        Some(format!("{} {}", number, &unit["unit"])),
                        unit.name("rest").map_or("", |m| m.as_str()).to_string(),
                    ),
                    None => (Some(number), rest.to_string()),
                }
            }
            None => (None, head.to_string()),
        };

        let name = OF_RE.replace(rest.trim(), "");
        let name = name.trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation());
        if name.is_empty() {
            return Err(SousError::IngredientParse(sentence.to_string()));
        }

        let names: Vec<String> = ALTERNATIVES_RE
            .split(name)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();

        let words = name.split_whitespace().count();
        let confidence = match (amount.is_some(), words) {
            (_, w) if w > 6 => 0.3,
            (true, w) if w <= 4 => 1.0,
            (true, _) => 0.8,
            (false, _) => 0.6,
        };

        debug!("Parsed '{}' as {:?} / {:?}", sentence, amount, names);
        Ok(ParsedIngredient {
            names,
            amount,
            preparation,
            confidence,
        })
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
