use crate::errors::WatcherResult;

/// Fetches the raw HTML of a listing page.
#[cfg_attr(test, mockall::automock)]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the decoded body. Non-success statuses are errors.
    fn fetch(&self, url: &str) -> WatcherResult<String>;
}
