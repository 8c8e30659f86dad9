use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::Config;
use crate::errors::{WatcherError, WatcherResult};
use crate::sources::traits::PageFetcher;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> WatcherResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.into())
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> WatcherResult<Self> {
        Self::new(config.timeout, config.user_agent.clone())
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> WatcherResult<String> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatcherError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        debug!(%url, bytes = body.len(), "Fetched listing page");

        Ok(body)
    }
}
