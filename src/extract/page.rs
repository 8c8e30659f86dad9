use chrono::{DateTime, Utc};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::domain::{RawItem, SelectorRules, SourceConfig};
use crate::errors::{WatcherError, WatcherResult};
use crate::extract::date::parse_date;
use crate::extract::url::resolve_url;

/// Only this many item nodes are looked at per page.
pub const MAX_CANDIDATES: usize = 80;

/// Compiled selectors for one source.
pub struct PageExtractor {
    item: Selector,
    title: Selector,
    dates: Vec<Selector>,
}

impl PageExtractor {
    pub fn new(rules: &SelectorRules) -> WatcherResult<Self> {
        Ok(Self {
            item: compile(&rules.item)?,
            title: compile(&rules.title)?,
            dates: rules
                .date
                .iter()
                .map(|s| compile(s))
                .collect::<WatcherResult<Vec<_>>>()?,
        })
    }

    /// Extract items, using the current time for undated ones.
    pub fn extract(&self, base_url: &str, html: &str) -> Vec<RawItem> {
        self.extract_at(base_url, html, Utc::now())
    }

    /// Extract items with an explicit fallback timestamp.
    ///
    /// Never fails: a page that matches nothing yields no items.
    pub fn extract_at(&self, base_url: &str, html: &str, now: DateTime<Utc>) -> Vec<RawItem> {
        let document = Html::parse_document(html);

        let mut candidates = 0;
        let items: Vec<RawItem> = document
            .select(&self.item)
            .take(MAX_CANDIDATES)
            .inspect(|_| candidates += 1)
            .filter_map(|node| self.item_from_node(node, base_url, now))
            .collect();

        let extracted = items.len();
        let items: Vec<RawItem> = items
            .into_iter()
            .unique_by(RawItem::dedup_key)
            .collect();

        debug!(
            candidates,
            extracted,
            duplicates = extracted - items.len(),
            undated = items.iter().filter(|i| !i.dated).count(),
            "Extracted listing items"
        );

        items
    }

    fn item_from_node(
        &self,
        node: ElementRef<'_>,
        base_url: &str,
        now: DateTime<Utc>,
    ) -> Option<RawItem> {
        let anchor = node.select(&self.title).next()?;

        let title: String = anchor.text().map(str::trim).collect();
        let href = anchor.value().attr("href").unwrap_or_default();
        let url = resolve_url(base_url, href);

        if title.is_empty() || url.is_empty() {
            return None;
        }

        Some(match self.find_date(node) {
            Some(published) => RawItem::new(title, url, published),
            None => RawItem::undated(title, url, now),
        })
    }

    /// Tries each date selector in order; the first one whose first match
    /// parses wins.
    fn find_date(&self, node: ElementRef<'_>) -> Option<DateTime<Utc>> {
        self.dates.iter().find_map(|selector| {
            let element = node.select(selector).next()?;
            let text = element
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .join(" ");
            parse_date(&text)
        })
    }
}

/// Compile `source`'s selectors and extract its page in one go.
pub fn extract_items(source: &SourceConfig, html: &str) -> WatcherResult<Vec<RawItem>> {
    let extractor = PageExtractor::new(&source.selectors)?;
    Ok(extractor.extract(&source.base_url, html))
}

fn compile(selector: &str) -> WatcherResult<Selector> {
    Selector::parse(selector).map_err(|e| WatcherError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
