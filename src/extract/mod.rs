//! Turning listing-page HTML into [`RawItem`](crate::domain::RawItem)s.
//!
//! - [`url`]: href resolution against a source's base URL
//! - [`date`]: loose year-month-day detection
//! - [`page`]: selector-driven item extraction with dedup

pub mod date;
pub mod page;
pub mod url;

pub use date::parse_date;
pub use page::{extract_items, PageExtractor, MAX_CANDIDATES};
pub use url::resolve_url;
