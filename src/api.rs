// src/api.rs
use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::keywords;
use crate::news::{
    self,
    config::NewsConfig,
    fetch::HttpFetcher,
    types::{FeedFetcher, NewsItem},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<NewsConfig>,
    pub fetcher: Arc<dyn FeedFetcher>,
}

impl AppState {
    pub fn new(config: NewsConfig, fetcher: Arc<dyn FeedFetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    /// Production wiring: real HTTP fetcher built from the config's UA and timeout.
    pub fn from_config(config: NewsConfig) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(&config.user_agent, config.fetch_timeout())?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/news", get(latest_news))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct NewsQuery {
    #[serde(default)]
    q: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsResponse {
    pub items: Vec<NewsItem>,
}

/// Always 200: upstream trouble shows up as fewer (or zero) items, never as an error.
/// A query string that does not deserialize is served unfiltered.
async fn latest_news(
    State(state): State<AppState>,
    query: Result<Query<NewsQuery>, QueryRejection>,
) -> impl IntoResponse {
    let q = match query {
        Ok(Query(query)) => query.q,
        Err(rejection) => {
            tracing::debug!(target: "news", error = %rejection, "ignoring unusable news query");
            None
        }
    };

    let mut items = news::aggregate(&state.config, state.fetcher.as_ref()).await;
    if let Some(q) = q.as_deref() {
        items.retain(|it| keywords::matches_query(&it.title, q));
    }

    (
        [(header::CACHE_CONTROL, state.config.cache.header_value())],
        Json(NewsResponse { items }),
    )
}
