use chrono::{DateTime, Utc};

/// A list item pulled off a listing page. Lives for one source cycle only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    pub title: String,
    pub url: String,
    /// Always set. Items without a parseable date carry the extraction time.
    pub published: DateTime<Utc>,
    /// False when `published` is the fallback timestamp.
    pub dated: bool,
}

impl RawItem {
    pub fn new(title: String, url: String, published: DateTime<Utc>) -> Self {
        Self {
            title,
            url,
            published,
            dated: true,
        }
    }

    pub fn undated(title: String, url: String, fetched_at: DateTime<Utc>) -> Self {
        Self {
            title,
            url,
            published: fetched_at,
            dated: false,
        }
    }

    pub fn dedup_key(&self) -> (String, String) {
        (self.url.clone(), self.title.clone())
    }
}
