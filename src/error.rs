use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading recipes and building shopping lists
#[derive(Error, Debug)]
pub enum SousError {
    /// Failed to read or write a file
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or write a recipe JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a category configuration file
    #[error("Invalid category configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Failed to talk to a remote service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A source looked like a URL but could not be parsed as one
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    /// Unknown shopping list format identifier
    #[error("Invalid shopping list format: '{0}'")]
    InvalidFormat(String),

    /// Excluded id does not match any shopping list item
    #[error("Cannot exclude '{0}': no such item in the shopping list")]
    UnknownExclusion(String),

    /// An ingredient sentence could not be split into a name
    #[error("Unable to find an ingredient name in '{0}'")]
    IngredientParse(String),

    /// No structured recipe was found on a page
    #[error("No recipe found at {0}")]
    NoRecipeFound(String),

    /// The site's robots policy forbids fetching this URL
    #[error("Fetching {0} is disallowed by robots.txt")]
    Disallowed(String),

    /// A single item could not be exported
    #[error("Error exporting item '{item}': {message}")]
    Export { item: String, message: String },

    /// The selection callback returned something unusable
    #[error("Invalid selection: {0}")]
    Selection(String),
}

impl SousError {
    /// Wraps an I/O error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SousError::Io {
            path: path.into(),
            source,
        }
    }
}
