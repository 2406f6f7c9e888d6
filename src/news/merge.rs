// src/news/merge.rs
//! Round-robin interleave with link dedup.
//!
//! Each round visits sources in configured order and takes at most one unseen item
//! from each. A round that emits nothing ends the merge, so exhausted (or fully
//! duplicate) sources cannot spin forever.

use std::collections::HashSet;

use crate::news::types::{NewsItem, NormalizedItem};

/// Read position inside one source's item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceCursor<'a> {
    pub items: &'a [NormalizedItem],
    pub next: usize,
}

impl<'a> SourceCursor<'a> {
    pub fn new(items: &'a [NormalizedItem]) -> Self {
        Self { items, next: 0 }
    }

    /// First item at or after `next` whose link has not been emitted, together with
    /// the cursor moved past it. Skipped duplicates are consumed for good.
    pub fn next_unseen(self, seen: &HashSet<String>) -> (Self, Option<&'a NormalizedItem>) {
        let found = self.items[self.next..]
            .iter()
            .position(|it| {
                let key = it.link.trim();
                !key.is_empty() && !seen.contains(key)
            })
            .map(|offset| self.next + offset);

        match found {
            Some(i) => (
                Self {
                    next: i + 1,
                    ..self
                },
                Some(&self.items[i]),
            ),
            None => (
                Self {
                    next: self.items.len(),
                    ..self
                },
                None,
            ),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.items.len()
    }
}

/// One pass over all cursors. Returns the advanced cursors and whether anything was
/// emitted. Stops early once `out` holds `limit` items.
pub fn merge_round<'a>(
    cursors: Vec<SourceCursor<'a>>,
    seen: &mut HashSet<String>,
    out: &mut Vec<NewsItem>,
    limit: usize,
) -> (Vec<SourceCursor<'a>>, bool) {
    let mut progressed = false;
    let next = cursors
        .into_iter()
        .map(|cursor| {
            if out.len() >= limit {
                return cursor;
            }
            let (cursor, picked) = cursor.next_unseen(seen);
            if let Some(item) = picked {
                seen.insert(item.link.trim().to_string());
                out.push(NewsItem::from(item));
                progressed = true;
            }
            cursor
        })
        .collect();
    (next, progressed)
}

/// Interleave per-source lists (in the given order) into at most `limit` items.
pub fn round_robin_merge(
    per_source: &[(String, Vec<NormalizedItem>)],
    limit: usize,
) -> Vec<NewsItem> {
    let mut cursors: Vec<SourceCursor<'_>> = per_source
        .iter()
        .map(|(_, items)| SourceCursor::new(items))
        .collect();
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(limit.min(64));

    while out.len() < limit {
        let (advanced, progressed) = merge_round(cursors, &mut seen, &mut out, limit);
        cursors = advanced;
        if !progressed {
            break;
        }
    }
    out
}
