use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::Url;

use super::json_ld::extract_recipe;
use super::robots::RobotsPolicy;
use super::ScrapedRecipe;
use crate::config::DownloadSettings;
use crate::error::SousError;

/// Somewhere recipes come from.
pub trait RecipeSource {
    /// Fetches the recipe named by `source`, a URL or a path.
    fn fetch(&self, source: &str) -> Result<ScrapedRecipe, SousError>;
}

/// Fetches recipe pages over HTTP(S), honouring each site's robots.txt, and
/// reads previously saved recipe JSON files from disk.
pub struct Downloader {
    client: Client,
    default_delay: u64,
    policies: RefCell<HashMap<String, RobotsPolicy>>,
    last_delay: Cell<Option<u64>>,
}

impl Downloader {
    pub fn new(settings: &DownloadSettings) -> Result<Self, SousError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            default_delay: settings.default_crawl_delay_secs,
            policies: RefCell::new(HashMap::new()),
            last_delay: Cell::new(None),
        })
    }

    /// How long to wait before the next download: the crawl delay of the
    /// site fetched last, or the configured default.
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.last_delay.get().unwrap_or(self.default_delay))
    }

    fn fetch_url(&self, url: Url) -> Result<ScrapedRecipe, SousError> {
        let policy = self.policy_for(&url)?;
        self.last_delay.set(policy.crawl_delay());
        if !policy.can_fetch(&robots_target(&url)) {
            return Err(SousError::Disallowed(url.to_string()));
        }

        info!("Downloading {}", url);
        let html = self.client.get(url.clone()).send()?.error_for_status()?.text()?;

        extract_recipe(&html, url.as_str()).ok_or_else(|| SousError::NoRecipeFound(url.to_string()))
    }

    fn policy_for(&self, url: &Url) -> Result<RobotsPolicy, SousError> {
        let origin = url.origin().ascii_serialization();
        if let Some(policy) = self.policies.borrow().get(&origin) {
            return Ok(policy.clone());
        }

        let robots_url = url
            .join("/robots.txt")
            .map_err(|_| SousError::InvalidUrl(url.to_string()))?;
        let response = self.client.get(robots_url).send()?;
        let policy = if response.status().is_success() {
            RobotsPolicy::parse(&response.text()?)
        } else {
            debug!("No robots.txt for {} ({})", origin, response.status());
            RobotsPolicy::allow_all()
        };

        self.policies.borrow_mut().insert(origin, policy.clone());
        Ok(policy)
    }
}

/// Path and query, the part of a URL that robots.txt rules are matched against.
fn robots_target(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

impl RecipeSource for Downloader {
    fn fetch(&self, source: &str) -> Result<ScrapedRecipe, SousError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            let url = Url::parse(source).map_err(|_| SousError::InvalidUrl(source.to_string()))?;
            self.fetch_url(url)
        } else {
            debug!("Reading saved recipe {}", source);
            ScrapedRecipe::load(source)
        }
    }
}
