pub mod http;
pub mod registry;
pub mod traits;

pub use http::HttpFetcher;
pub use registry::SourceRegistry;
pub use traits::PageFetcher;

#[cfg(test)]
pub use traits::MockPageFetcher;
