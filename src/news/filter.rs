// src/news/filter.rs
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::news::sanitize::sanitize;
use crate::news::types::{NormalizedItem, RawFeedItem};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Parse an RSS/Atom date into unix millis. `0` means absent or unparseable.
pub fn parse_time_ms(raw: Option<&str>) -> i64 {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };

    if let Some(dt) = parse_rfc2822_lenient(s) {
        return dt.timestamp_millis();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.timestamp_millis();
    }
    // ISO-8601 with a compact `+hhmm` offset.
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return dt.timestamp_millis();
    }
    // ISO-8601 without offset: read as UTC.
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive.and_utc().timestamp_millis();
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// Feeds get the weekday wrong often enough that a mismatch must not void the date.
/// A trailing `UTC` zone is read as `GMT`.
fn parse_rfc2822_lenient(s: &str) -> Option<DateTime<FixedOffset>> {
    let gmt;
    let s = match s.strip_suffix(" UTC") {
        Some(head) => {
            gmt = format!("{head} GMT");
            gmt.as_str()
        }
        None => s,
    };
    DateTime::parse_from_rfc2822(s).ok().or_else(|| {
        let (_, rest) = s.split_once(',')?;
        DateTime::parse_from_rfc2822(rest.trim()).ok()
    })
}

pub fn normalize(raw: RawFeedItem) -> NormalizedItem {
    NormalizedItem {
        title: sanitize(&raw.title),
        link: sanitize(&raw.link),
        time: parse_time_ms(raw.pub_date.as_deref()),
        source: raw.source,
    }
}

/// Undated items (`time == 0`) never expire.
pub fn is_fresh(time_ms: i64, now_ms: i64, max_age_ms: i64) -> bool {
    time_ms == 0 || now_ms - time_ms < max_age_ms
}

/// Validity + freshness filter, then the per-source cap. Feed order is preserved.
/// Returns the kept items and how many were dropped before capping.
pub fn filter_items(
    items: Vec<NormalizedItem>,
    now_ms: i64,
    max_age_ms: i64,
    per_source_cap: usize,
) -> (Vec<NormalizedItem>, usize) {
    let total = items.len();
    let mut kept: Vec<NormalizedItem> = items
        .into_iter()
        .filter(|it| !it.title.is_empty() && !it.link.is_empty())
        .filter(|it| is_fresh(it.time, now_ms, max_age_ms))
        .collect();
    let dropped = total - kept.len();
    kept.truncate(per_source_cap);
    (kept, dropped)
}
