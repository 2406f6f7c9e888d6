// src/news/fetch.rs
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};

use crate::news::types::{FeedFetcher, FeedSource};

pub const FEED_ACCEPT: &str =
    "application/rss+xml, application/atom+xml, text/xml, application/xml, */*";
pub const DEFAULT_USER_AGENT: &str = "spanishtvshows.com/1.0 (+rust)";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(9);

/// Plain GET per feed: one attempt, bounded by the client timeout, always revalidated
/// upstream.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("building feed http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, source: &FeedSource) -> Result<String> {
        let resp = self
            .client
            .get(&source.url)
            .header(ACCEPT, FEED_ACCEPT)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .with_context(|| format!("GET {}", source.url))?
            .error_for_status()
            .with_context(|| format!("GET {}", source.url))?;

        resp.text()
            .await
            .with_context(|| format!("reading body of {}", source.url))
    }
}
