use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{WatcherError, WatcherResult};

pub const DEFAULT_OUT_DIR: &str = "feeds";
pub const DEFAULT_PUBLISH_BASE: &str = "https://ceceliahappyday.github.io/feeds";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; StandardsWatcher/1.0)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where `<name>.xml` files are written.
    pub out_dir: PathBuf,
    /// Optional JSON source list; the built-in list is used when unset.
    pub sources_path: Option<PathBuf>,
    /// Public location of the output directory, used for self links.
    pub publish_base: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            sources_path: None,
            publish_base: DEFAULT_PUBLISH_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> WatcherResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> WatcherResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout = match get("WATCHER_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_timeout(&raw)?),
            None => defaults.timeout,
        };

        Ok(Self {
            out_dir: get("WATCHER_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.out_dir),
            sources_path: get("WATCHER_SOURCES").map(PathBuf::from),
            publish_base: get("WATCHER_PUBLISH_BASE").unwrap_or(defaults.publish_base),
            timeout,
            user_agent: get("WATCHER_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}

fn parse_timeout(raw: &str) -> WatcherResult<u64> {
    let invalid = |reason: &str| WatcherError::InvalidEnvVar {
        name: "WATCHER_TIMEOUT_SECS".to_string(),
        reason: format!("{} (got `{}`)", reason, raw),
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero")),
        Ok(secs) => Ok(secs),
        Err(_) => Err(invalid("must be a whole number of seconds")),
    }
}
