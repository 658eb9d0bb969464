use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Default shopping list format ("compact" or "expanded")
    #[serde(default = "default_format")]
    pub format: String,
    /// Path to a TOML file grouping shopping list items into categories
    #[serde(default)]
    pub categories: Option<PathBuf>,
    /// Recipe download settings
    #[serde(default)]
    pub download: DownloadSettings,
    /// Todoist export settings
    #[serde(default)]
    pub todoist: TodoistSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: default_format(),
            categories: None,
            download: DownloadSettings::default(),
            todoist: TodoistSettings::default(),
        }
    }
}

/// Settings for fetching recipes from the web
#[derive(Debug, Deserialize, Clone)]
pub struct DownloadSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Delay between bulk downloads when robots.txt does not request one
    #[serde(default = "default_crawl_delay")]
    pub default_crawl_delay_secs: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            default_crawl_delay_secs: default_crawl_delay(),
            user_agent: default_user_agent(),
        }
    }
}

/// Settings for exporting a shopping list to Todoist
#[derive(Debug, Deserialize, Clone)]
pub struct TodoistSettings {
    /// REST API root
    #[serde(default = "default_todoist_url")]
    pub base_url: String,
    /// Project receiving the exported items
    #[serde(default)]
    pub project_id: Option<String>,
    /// File holding the API token
    #[serde(default)]
    pub token_file: Option<PathBuf>,
}

impl Default for TodoistSettings {
    fn default() -> Self {
        Self {
            base_url: default_todoist_url(),
            project_id: None,
            token_file: None,
        }
    }
}

// Default value functions
fn default_format() -> String {
    "expanded".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_crawl_delay() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("Mozilla/5.0 (compatible; sous/{})", env!("CARGO_PKG_VERSION"))
}

fn default_todoist_url() -> String {
    "https://api.todoist.com/rest/v2".to_string()
}

impl Settings {
    /// Load settings from `sous.toml` and the environment
    ///
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables with SOUS__ prefix
    /// 2. sous.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: SOUS__TODOIST__PROJECT_ID
    pub fn load() -> Result<Self, ConfigError> {
        load_settings(None)
    }

    /// Load settings from an explicit file (which must exist) and the environment
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        load_settings(Some(path))
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("sous").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: SOUS__DOWNLOAD__TIMEOUT_SECS
        .add_source(
            Environment::with_prefix("SOUS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.format, "expanded");
        assert!(settings.categories.is_none());
        assert_eq!(settings.download.timeout_secs, 30);
        assert_eq!(settings.download.default_crawl_delay_secs, 5);
        assert_eq!(settings.todoist.base_url, "https://api.todoist.com/rest/v2");
        assert!(settings.todoist.project_id.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
format = "compact"
categories = "aisles.toml"

[download]
default_crawl_delay_secs = 10

[todoist]
project_id = "12345"
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.format, "compact");
        assert_eq!(settings.categories, Some(PathBuf::from("aisles.toml")));
        assert_eq!(settings.download.default_crawl_delay_secs, 10);
        assert_eq!(settings.download.timeout_secs, 30);
        assert_eq!(settings.todoist.project_id.as_deref(), Some("12345"));
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = Settings::load_from(Path::new("/definitely/not/here/sous.toml"));
        assert!(result.is_err());
    }
}
