use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid environment variable {name}: {reason}")]
    InvalidEnvVar { name: String, reason: String },

    // Source errors
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Duplicate source name: {0}")]
    DuplicateSource(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    // Output errors
    #[error("Feed rendering failed: {0}")]
    FeedRender(String),

    #[error("RSS error: {0}")]
    Rss(#[from] rss::Error),

    // Parsing errors
    #[error("Sources file parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WatcherResult<T> = Result<T, WatcherError>;
