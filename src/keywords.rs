// src/keywords.rs
//! Streaming-brand keywords in headlines: highlighting and the title search filter.

use once_cell::sync::Lazy;
use regex::Regex;

pub const KEYWORDS: &[&str] = &[
    "Netflix",
    "HBO",
    "HBO Max",
    "Max",
    "Telemundo",
    "Univision",
    "ViX",
    "Vix",
    "Prime Video",
    "Amazon",
    "Disney+",
    "Disney Plus",
    "Apple TV+",
    "Apple TV Plus",
];

// Longest first so "HBO Max" wins over "HBO".
static KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    let mut sorted: Vec<&str> = KEYWORDS.to_vec();
    sorted.sort_by_key(|k| std::cmp::Reverse(k.len()));
    let alternation = sorted
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)(?:{alternation})")).expect("keyword regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub keyword: bool,
}

/// Split a title into plain and keyword segments, in order. Empty pieces are omitted.
pub fn highlight(title: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in KEYWORD_RE.find_iter(title) {
        if m.start() > last {
            out.push(Segment {
                text: title[last..m.start()].to_string(),
                keyword: false,
            });
        }
        out.push(Segment {
            text: m.as_str().to_string(),
            keyword: true,
        });
        last = m.end();
    }
    if last < title.len() {
        out.push(Segment {
            text: title[last..].to_string(),
            keyword: false,
        });
    }
    out
}

/// Plain-text rendering with keywords wrapped in brackets.
pub fn bracket_keywords(title: &str) -> String {
    highlight(title)
        .into_iter()
        .map(|s| if s.keyword { format!("[{}]", s.text) } else { s.text })
        .collect()
}

/// Case-insensitive substring match; a blank query matches everything.
pub fn matches_query(title: &str, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    q.is_empty() || title.to_lowercase().contains(&q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_keyword_wins() {
        let segs = highlight("New hbo max drama beats Netflix");
        assert_eq!(
            segs,
            vec![
                Segment {
                    text: "New ".into(),
                    keyword: false,
                },
                Segment {
                    text: "hbo max".into(),
                    keyword: true,
                },
                Segment {
                    text: " drama beats ".into(),
                    keyword: false,
                },
                Segment {
                    text: "Netflix".into(),
                    keyword: true,
                },
            ]
        );
    }

    #[test]
    fn brackets_and_plain_titles() {
        assert_eq!(bracket_keywords("Disney+ and ViX"), "[Disney+] and [ViX]");
        assert_eq!(bracket_keywords("Nothing here"), "Nothing here");
        assert!(highlight("").is_empty());
    }

    #[test]
    fn query_is_case_insensitive_and_blank_matches() {
        assert!(matches_query("Telemundo renews novela", "TELEMUNDO"));
        assert!(matches_query("anything", "   "));
        assert!(!matches_query("Netflix", "hbo"));
    }
}
