use once_cell::sync::Lazy;
use regex::Regex;

static SIBILANT_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"([sxz]|[^aeioudgkprt]h)$").unwrap());
static CONSONANT_Y_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^aeiou]y$").unwrap());
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Prefixes `noun` with `count`, pluralizing it unless `count` is one.
pub fn pluralize(noun: &str, count: usize) -> String {
    let pluralized = if count == 1 {
        noun.to_string()
    } else if SIBILANT_END.is_match(noun) {
        format!("{noun}es")
    } else if CONSONANT_Y_END.is_match(noun) {
        format!("{}ies", &noun[..noun.len() - 1])
    } else {
        format!("{noun}s")
    };

    format!("{count} {pluralized}")
}

/// Lowercases a title and turns it into a file-name friendly slug.
pub fn kebab_case(sentence: &str) -> String {
    let lowered = sentence.to_lowercase();
    let stripped = PUNCTUATION.replace_all(lowered.trim(), "");
    WHITESPACE.replace_all(&stripped, "-").into_owned()
}

/// Joins the parts that are present and non-empty.
pub fn join_present<'a, I>(separator: &str, parts: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
