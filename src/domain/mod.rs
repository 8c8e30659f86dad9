pub mod feed;
pub mod item;
pub mod source;

pub use feed::{FeedDocument, FeedEntry, FeedLink, LinkRel};
pub use item::RawItem;
pub use source::{SelectorRules, SourceConfig};
