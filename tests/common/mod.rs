// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Router,
};

use spanish_tv_news::news::types::{FeedFetcher, FeedSource};

pub const RSS_XML: &str = include_str!("../fixtures/google_news_rss.xml");
pub const ATOM_XML: &str = include_str!("../fixtures/variety_atom.xml");

/// 2025-10-15T12:00:00Z, the "today" the fixtures are dated against.
pub const FIXTURE_NOW_MS: i64 = 1_760_529_600_000;

/// In-memory fetcher: feed name → body; unknown names fail like a dead host.
#[derive(Default)]
pub struct StubFetcher {
    pub bodies: HashMap<String, String>,
}

impl StubFetcher {
    pub fn with(mut self, name: &str, body: &str) -> Self {
        self.bodies.insert(name.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl FeedFetcher for StubFetcher {
    async fn fetch(&self, source: &FeedSource) -> Result<String> {
        self.bodies
            .get(&source.name)
            .cloned()
            .ok_or_else(|| anyhow!("connection refused: {}", source.url))
    }
}

/// Local upstream with healthy, failing, hanging and garbage feeds.
pub async fn spawn_feed_server() -> SocketAddr {
    let app = Router::new()
        .route(
            "/rss.xml",
            get(|| async { ([(header::CONTENT_TYPE, "application/rss+xml")], RSS_XML) }),
        )
        .route(
            "/atom.xml",
            get(|| async { ([(header::CONTENT_TYPE, "application/atom+xml")], ATOM_XML) }),
        )
        .route(
            "/fail.xml",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, RSS_XML) }),
        )
        .route(
            "/slow.xml",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                RSS_XML
            }),
        )
        .route("/garbage.xml", get(|| async { "<rss><channel><item>" }))
        .route("/echo.xml", get(echo_request_headers));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local feed server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve feeds");
    });
    addr
}

/// One-item RSS feed whose title reports the request headers the fetcher sent.
async fn echo_request_headers(headers: HeaderMap) -> String {
    let get = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string()
    };
    format!(
        "<rss><channel><item>\
         <title>{} | {} | {}</title><link>https://echo.test/</link>\
         </item></channel></rss>",
        get(header::ACCEPT),
        get(header::USER_AGENT),
        get(header::CACHE_CONTROL),
    )
}

pub fn feed(addr: SocketAddr, name: &str, path: &str) -> FeedSource {
    FeedSource::new(name, format!("http://{addr}{path}"))
}
