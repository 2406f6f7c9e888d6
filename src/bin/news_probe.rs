//! One-shot aggregation against the configured feeds, printed to stdout.
//!
//! Usage: news_probe [--json | --text] [--config PATH]

use std::path::PathBuf;

use anyhow::{bail, Context};
use spanish_tv_news::api::NewsResponse;
use spanish_tv_news::keywords::bracket_keywords;
use spanish_tv_news::news::{self, config, fetch::HttpFetcher};
use spanish_tv_news::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    telemetry::init_cli_tracing();

    let mut text = false;
    let mut config_path: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => text = false,
            "--text" => text = true,
            "--config" => {
                config_path = Some(PathBuf::from(args.next().context("--config needs a path")?))
            }
            other => bail!("unknown argument `{other}` (expected --json, --text, --config PATH)"),
        }
    }

    let cfg = match config_path {
        Some(p) => config::load_from(&p)?,
        None => config::load_default()?,
    };
    let fetcher = HttpFetcher::new(&cfg.user_agent, cfg.fetch_timeout())?;
    let items = news::aggregate(&cfg, &fetcher).await;

    if text {
        for (i, it) in items.iter().enumerate() {
            println!("{:>2}. {}  ({})", i + 1, bracket_keywords(&it.title), it.source);
            println!("    {}", it.link);
        }
        if items.is_empty() {
            println!("no headlines");
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&NewsResponse { items })?);
    }
    Ok(())
}
