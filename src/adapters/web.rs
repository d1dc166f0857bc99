//! HTTP page fetcher

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use tokio::runtime::Runtime;

use super::html::extract_text;
use crate::config::FetchConfig;
use crate::core::ports::{FetchMode, PageFetcher};

/// Fetches pages over HTTP(S) with reqwest
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    runtime: Arc<Runtime>,
}

impl HttpPageFetcher {
    /// Fetcher using the timeout and User-Agent from `config`
    pub fn new(config: &FetchConfig, runtime: Arc<Runtime>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, runtime })
    }

    async fn get(&self, url: &str) -> anyhow::Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("request failed")
            );
        }
        Ok(response.text().await?)
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch(&self, url: &str, mode: FetchMode) -> anyhow::Result<String> {
        log::debug!("fetching {url} ({mode})");
        let body = self.runtime.block_on(self.get(url))?;
        Ok(match mode {
            FetchMode::Text => extract_text(&body),
            FetchMode::Html => body,
        })
    }
}
