pub mod fs;
pub mod traits;

pub use fs::FsFeedStore;
pub use traits::FeedStore;

#[cfg(test)]
pub use traits::MockFeedStore;
