// src/news/mod.rs
//! News aggregation pipeline: fetch → parse → sanitize → filter → round-robin merge.
//!
//! Every per-source failure (network, timeout, non-2xx, malformed XML) degrades to an
//! empty contribution for that source; [`aggregate`] itself cannot fail.

pub mod cache;
pub mod config;
pub mod fetch;
pub mod filter;
pub mod merge;
pub mod parse;
pub mod sanitize;
pub mod types;
pub mod xml;

use futures::future::join_all;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;

use crate::news::config::NewsConfig;
use crate::news::types::{FeedFetcher, FeedSource, NewsItem, NormalizedItem};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "news_fetch_errors_total",
            "Feed sources that contributed nothing because fetch or parse failed."
        );
        describe_counter!("news_items_parsed_total", "Items parsed from feeds.");
        describe_counter!(
            "news_items_filtered_total",
            "Items dropped as invalid or stale."
        );
        describe_counter!("news_items_served_total", "Items returned after the merge.");
        describe_histogram!("news_fetch_ms", "Feed fetch time in milliseconds.");
        describe_gauge!(
            "news_last_run_ts",
            "Unix ts when the aggregation last ran."
        );
    });
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Fetch, parse and normalize one source. Failures are logged and yield no items.
pub async fn collect_source(fetcher: &dyn FeedFetcher, source: &FeedSource) -> Vec<NormalizedItem> {
    let t0 = std::time::Instant::now();
    let body = match fetcher.fetch(source).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(target: "news", source = %source.name, error = ?e, "feed fetch failed");
            counter!("news_fetch_errors_total", "stage" => "fetch").increment(1);
            return Vec::new();
        }
    };
    histogram!("news_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

    let raw = match parse::parse_feed(&body, &source.name) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(
                target: "news",
                source = %source.name,
                error = ?e,
                "feed xml did not parse"
            );
            counter!("news_fetch_errors_total", "stage" => "parse").increment(1);
            return Vec::new();
        }
    };
    counter!("news_items_parsed_total").increment(raw.len() as u64);
    tracing::debug!(target: "news", source = %source.name, items = raw.len(), "feed parsed");

    raw.into_iter().map(filter::normalize).collect()
}

/// Fetch every source concurrently and wait for all of them. Output keeps `feeds` order.
pub async fn collect_all(
    fetcher: &dyn FeedFetcher,
    feeds: &[FeedSource],
) -> Vec<(String, Vec<NormalizedItem>)> {
    let pending = feeds.iter().map(|source| async move {
        let items = collect_source(fetcher, source).await;
        (source.name.clone(), items)
    });
    join_all(pending).await
}

/// Filter each source (validity, freshness, cap) and merge round-robin.
pub fn select(
    per_source: Vec<(String, Vec<NormalizedItem>)>,
    cfg: &NewsConfig,
    now_ms: i64,
) -> Vec<NewsItem> {
    let max_age_ms = cfg.max_age_ms();
    let filtered: Vec<(String, Vec<NormalizedItem>)> = per_source
        .into_iter()
        .map(|(name, items)| {
            let (kept, dropped) =
                filter::filter_items(items, now_ms, max_age_ms, cfg.per_source_cap);
            counter!("news_items_filtered_total").increment(dropped as u64);
            (name, kept)
        })
        .collect();

    merge::round_robin_merge(&filtered, cfg.limit)
}

pub async fn aggregate(cfg: &NewsConfig, fetcher: &dyn FeedFetcher) -> Vec<NewsItem> {
    aggregate_at(cfg, fetcher, now_ms()).await
}

/// [`aggregate`] with an explicit clock.
pub async fn aggregate_at(
    cfg: &NewsConfig,
    fetcher: &dyn FeedFetcher,
    now_ms: i64,
) -> Vec<NewsItem> {
    ensure_metrics_described();

    let per_source = collect_all(fetcher, &cfg.feeds).await;
    let sources_with_data = per_source.iter().filter(|(_, v)| !v.is_empty()).count();
    let items = select(per_source, cfg, now_ms);

    counter!("news_items_served_total").increment(items.len() as u64);
    gauge!("news_last_run_ts").set((now_ms / 1000) as f64);
    tracing::info!(
        target: "news",
        feeds = cfg.feeds.len(),
        sources_with_data,
        items = items.len(),
        "news aggregated"
    );
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::filter::DAY_MS;
    use anyhow::{anyhow, Result};

    struct FixedFetcher;

    #[async_trait::async_trait]
    impl FeedFetcher for FixedFetcher {
        async fn fetch(&self, source: &FeedSource) -> Result<String> {
            match source.name.as_str() {
                "ok" => Ok(r#"<rss><channel>
                    <item><title>One &amp;amp; only</title><link>https://ok.test/1</link></item>
                </channel></rss>"#
                    .to_string()),
                "broken" => Ok("<rss><channel>".to_string()),
                _ => Err(anyhow!("connection refused")),
            }
        }
    }

    #[tokio::test]
    async fn failing_sources_contribute_nothing() {
        let cfg = NewsConfig::with_feeds(vec![
            FeedSource::new("down", "https://down.test/rss"),
            FeedSource::new("broken", "https://broken.test/rss"),
            FeedSource::new("ok", "https://ok.test/rss"),
        ]);
        let items = aggregate_at(&cfg, &FixedFetcher, 100 * DAY_MS).await;
        assert_eq!(
            items,
            vec![NewsItem {
                title: "One & only".into(),
                link: "https://ok.test/1".into(),
                source: "ok".into(),
            }]
        );
    }

    #[tokio::test]
    async fn collect_all_keeps_feed_order() {
        let feeds = vec![
            FeedSource::new("ok", "https://ok.test/rss"),
            FeedSource::new("down", "https://down.test/rss"),
        ];
        let per = collect_all(&FixedFetcher, &feeds).await;
        let names: Vec<_> = per.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["ok", "down"]);
        assert_eq!(per[0].1.len(), 1);
        assert!(per[1].1.is_empty());
    }
}
