pub mod feed_builder;
pub mod run_service;

pub use feed_builder::{entry_id, FeedBuilder, MAX_ENTRIES};
pub use run_service::{collect, RunReport, RunService, SourceOutcome, SourceReport};
