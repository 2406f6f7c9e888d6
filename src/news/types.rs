// src/news/types.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A named upstream RSS/Atom endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Parser output, before date parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFeedItem {
    pub title: String,
    pub link: String,
    pub pub_date: Option<String>, // RFC-822 or ISO-8601, as delivered
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedItem {
    pub title: String,
    pub link: String,
    pub time: i64, // unix millis, 0 = undated
    pub source: String,
}

/// One headline as served by `/api/news`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub source: String,
}

impl From<&NormalizedItem> for NewsItem {
    fn from(it: &NormalizedItem) -> Self {
        Self {
            title: it.title.clone(),
            link: it.link.clone(),
            source: it.source.clone(),
        }
    }
}

#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Raw response body for `source`. Any error counts as "no items" for this run.
    async fn fetch(&self, source: &FeedSource) -> Result<String>;
}
