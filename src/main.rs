//! SpanishTVShows news service — binary entrypoint.
//! Boots the Axum HTTP server on Shuttle: loads the feed config, wires the real HTTP
//! fetcher into the router, and exposes Prometheus metrics.

use shuttle_axum::ShuttleAxum;
use spanish_tv_news::{api, metrics::Metrics, news, telemetry};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // This enables NEWS_CONFIG_PATH / NEWS_DEV_LOG from .env.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    telemetry::enable_dev_tracing();

    let config = news::config::load_default()?;
    tracing::info!(
        target: "news",
        feeds = config.feeds.len(),
        limit = config.limit,
        cache = %config.cache.header_value(),
        "news config loaded"
    );

    let state = api::AppState::from_config(config)?;
    let metrics = Metrics::init()?;
    let router = api::router(state).merge(metrics.router());

    Ok(router.into())
}
