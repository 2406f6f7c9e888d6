// src/telemetry.rs
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_NEWS_DEV_LOG: &str = "NEWS_DEV_LOG";

fn is_dev_env() -> bool {
    cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        )
}

/// Compact tracing logs for the server, development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - NEWS_DEV_LOG=1
pub fn enable_dev_tracing() {
    let dev_flag = std::env::var(ENV_NEWS_DEV_LOG)
        .ok()
        .is_some_and(|v| v == "1");
    if !(dev_flag && is_dev_env()) {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("news=info,warn"));

    // The hosting runtime may already have installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

/// Always-on stderr logging for command-line tools.
pub fn init_cli_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("news=info,warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
