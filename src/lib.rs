//! Watches accounting-standard announcement listings and republishes each
//! one as an RSS feed.
//!
//! Each run fetches every configured listing page once, extracts title,
//! link and date from its list items, and rewrites `<name>.xml` from
//! scratch. A failing source is logged and skipped.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod services;
pub mod sources;
pub mod storage;
