// src/news/cache.rs
use serde::{Deserialize, Serialize};

fn default_s_maxage() -> u64 {
    900
}
fn default_swr() -> u64 {
    3600
}

/// Edge caching directive for the aggregated response. Declarative only: nothing is
/// cached in-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    #[serde(default = "default_s_maxage")]
    pub s_maxage_secs: u64,
    #[serde(default = "default_swr")]
    pub stale_while_revalidate_secs: u64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            s_maxage_secs: default_s_maxage(),
            stale_while_revalidate_secs: default_swr(),
        }
    }
}

impl CachePolicy {
    pub fn header_value(&self) -> String {
        format!(
            "s-maxage={}, stale-while-revalidate={}",
            self.s_maxage_secs, self.stale_while_revalidate_secs
        )
    }
}
