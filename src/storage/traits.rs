use std::path::PathBuf;

use crate::errors::WatcherResult;

/// Destination for rendered feeds.
#[cfg_attr(test, mockall::automock)]
pub trait FeedStore: Send + Sync {
    /// Replace the feed stored under `name` and return where it went.
    fn write(&self, name: &str, xml: &str) -> WatcherResult<PathBuf>;
}
