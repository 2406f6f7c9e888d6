// src/news/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::news::cache::CachePolicy;
use crate::news::fetch::DEFAULT_USER_AGENT;
use crate::news::filter::DAY_MS;
use crate::news::types::FeedSource;

pub const ENV_NEWS_CONFIG_PATH: &str = "NEWS_CONFIG_PATH";
pub const DEFAULT_NEWS_CONFIG_PATH: &str = "config/news.toml";

fn default_limit() -> usize {
    18
}
fn default_per_source_cap() -> usize {
    10
}
fn default_max_age_days() -> u64 {
    14
}
fn default_fetch_timeout_secs() -> u64 {
    9
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Built-in feed list: Google News queries first, then two TV trade feeds.
pub fn default_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource::new(
            "Google News: Spanish TV shows",
            "https://news.google.com/rss/search?q=Spanish%20TV%20series%20Netflix%20OR%20Telemundo%20OR%20Univision%20OR%20ViX&hl=en-US&gl=US&ceid=US:en",
        ),
        FeedSource::new(
            "Google News: Telemundo",
            "https://news.google.com/rss/search?q=Telemundo%20series%20OR%20telenovela%20OR%20reality%20show&hl=en-US&gl=US&ceid=US:en",
        ),
        FeedSource::new(
            "Google News: Univision + ViX",
            "https://news.google.com/rss/search?q=Univision%20OR%20ViX%20series%20OR%20telenovela&hl=en-US&gl=US&ceid=US:en",
        ),
        FeedSource::new(
            "Google News: Netflix Spain / Latin",
            "https://news.google.com/rss/search?q=Netflix%20Spain%20series%20OR%20Latin%20American%20series&hl=en-US&gl=US&ceid=US:en",
        ),
        FeedSource::new(
            "Google News: HBO Max Latino",
            "https://news.google.com/rss/search?q=HBO%20Max%20Latin%20American%20series%20OR%20Spanish-language%20series&hl=en-US&gl=US&ceid=US:en",
        ),
        FeedSource::new("Deadline TV", "https://deadline.com/v/tv/feed/"),
        FeedSource::new("Variety TV", "https://variety.com/v/tv/feed/"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Merge order is the order of this list.
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedSource>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_per_source_cap")]
    pub per_source_cap: usize,
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub cache: CachePolicy,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            feeds: default_feeds(),
            limit: default_limit(),
            per_source_cap: default_per_source_cap(),
            max_age_days: default_max_age_days(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
            cache: CachePolicy::default(),
        }
    }
}

impl NewsConfig {
    pub fn with_feeds(feeds: Vec<FeedSource>) -> Self {
        Self {
            feeds,
            ..Self::default()
        }
    }

    pub fn max_age_ms(&self) -> i64 {
        i64::try_from(self.max_age_days)
            .unwrap_or(i64::MAX / DAY_MS)
            .saturating_mul(DAY_MS)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_from(path: &Path) -> Result<NewsConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading news config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let cfg = parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing news config {}", path.display()))?;
    Ok(clean(cfg))
}

/// Load config using env var + fallbacks:
/// 1) $NEWS_CONFIG_PATH
/// 2) config/news.toml
/// 3) config/news.json
/// 4) built-in defaults
pub fn load_default() -> Result<NewsConfig> {
    if let Ok(p) = std::env::var(ENV_NEWS_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_from(&pb);
        }
        return Err(anyhow!("{ENV_NEWS_CONFIG_PATH} points to non-existent path"));
    }
    let toml_p = PathBuf::from(DEFAULT_NEWS_CONFIG_PATH);
    if toml_p.exists() {
        return load_from(&toml_p);
    }
    let json_p = PathBuf::from("config/news.json");
    if json_p.exists() {
        return load_from(&json_p);
    }
    Ok(NewsConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<NewsConfig> {
    match hint_ext {
        "toml" => Ok(toml::from_str(s)?),
        "json" => Ok(serde_json::from_str(s)?),
        _ => serde_json::from_str(s)
            .map_err(anyhow::Error::from)
            .or_else(|_| toml::from_str(s).map_err(anyhow::Error::from))
            .map_err(|_| anyhow!("unsupported news config format")),
    }
}

/// Trim feed entries, drop unusable or duplicate ones, and restore defaults for zeroed limits.
fn clean(mut cfg: NewsConfig) -> NewsConfig {
    let mut names = HashSet::new();
    let mut feeds = Vec::with_capacity(cfg.feeds.len());
    for f in cfg.feeds {
        let name = f.name.trim().to_string();
        let url = f.url.trim().to_string();
        if name.is_empty() || !is_absolute_http_url(&url) {
            tracing::warn!(
                target: "news",
                name = %name,
                url = %url,
                "skipping unusable feed entry"
            );
            continue;
        }
        if !names.insert(name.clone()) {
            tracing::warn!(target: "news", name = %name, "skipping duplicate feed name");
            continue;
        }
        feeds.push(FeedSource { name, url });
    }
    cfg.feeds = feeds;

    if cfg.limit == 0 {
        cfg.limit = default_limit();
    }
    if cfg.per_source_cap == 0 {
        cfg.per_source_cap = default_per_source_cap();
    }
    if cfg.max_age_days == 0 {
        cfg.max_age_days = default_max_age_days();
    }
    if cfg.fetch_timeout_secs == 0 {
        cfg.fetch_timeout_secs = default_fetch_timeout_secs();
    }
    if cfg.user_agent.trim().is_empty() {
        cfg.user_agent = default_user_agent();
    }
    cfg
}

fn is_absolute_http_url(s: &str) -> bool {
    reqwest::Url::parse(s)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}
