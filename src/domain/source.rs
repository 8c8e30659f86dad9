use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{WatcherError, WatcherResult};

/// Item container selector shared by the listing pages we watch. The groups
/// cover the common list layouts; matches are unioned in document order.
pub const DEFAULT_ITEM_SELECTOR: &str = "div.list ul li, div.newslist ul li, ul.list li, ul li";
pub const DEFAULT_TITLE_SELECTOR: &str = "a";
pub const DEFAULT_DATE_SELECTORS: &[&str] = &["span", "em", "i"];

/// How to find items, titles and dates on one listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorRules {
    /// Candidate list-item nodes.
    pub item: String,
    /// Title/link element, relative to the item node.
    pub title: String,
    /// Date elements, tried in order; the first one that parses wins.
    pub date: Vec<String>,
}

impl Default for SelectorRules {
    fn default() -> Self {
        Self {
            item: DEFAULT_ITEM_SELECTOR.to_string(),
            title: DEFAULT_TITLE_SELECTOR.to_string(),
            date: DEFAULT_DATE_SELECTORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// One monitored listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Identifier, also the output file stem.
    pub name: String,
    /// Listing page to fetch.
    pub url: String,
    /// Base for resolving relative links.
    pub base_url: String,
    /// Human-readable feed title.
    pub title: String,
    #[serde(default)]
    pub selectors: SelectorRules,
}

impl SourceConfig {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        base_url: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            base_url: base_url.into(),
            title: title.into(),
            selectors: SelectorRules::default(),
        }
    }

    pub fn with_selectors(mut self, selectors: SelectorRules) -> Self {
        self.selectors = selectors;
        self
    }

    /// Checks the name and URLs. Selectors are checked when they are compiled.
    pub fn validate(&self) -> WatcherResult<()> {
        if self.name.is_empty() {
            return Err(WatcherError::Config("source name must not be empty".to_string()));
        }

        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(WatcherError::Config(format!(
                "source name `{}` may only contain ASCII letters, digits, '-', '_' and '.'",
                self.name
            )));
        }

        Self::check_http_url(&self.url)?;
        Self::check_http_url(&self.base_url)?;

        if self.selectors.title.trim().is_empty() {
            return Err(WatcherError::Config(format!(
                "source `{}` has an empty title selector",
                self.name
            )));
        }

        Ok(())
    }

    fn check_http_url(raw: &str) -> WatcherResult<()> {
        let parsed = Url::parse(raw).map_err(|e| WatcherError::InvalidUrl(format!("{}: {}", raw, e)))?;

        match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => Ok(()),
            _ => Err(WatcherError::InvalidUrl(format!(
                "{}: expected an absolute http(s) URL",
                raw
            ))),
        }
    }
}
