// src/news/parse.rs
//! RSS 2.0 / Atom → [`RawFeedItem`].

use anyhow::Result;

use crate::news::sanitize::sanitize;
use crate::news::types::RawFeedItem;
use crate::news::xml::{parse_document, Element};

/// How a field shows up under its parent element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Absent,
    /// Plain character data (`<title>Foo</title>`, numbers included).
    Scalar(&'a str),
    /// The same name repeated; resolved through the first occurrence.
    Repeated(&'a Element),
    /// Attributes and/or child elements, possibly with its own text.
    Node(&'a Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Missing,
    Text(String),
}

impl Extracted {
    pub fn into_string(self) -> String {
        match self {
            Extracted::Missing => String::new(),
            Extracted::Text(s) => s,
        }
    }

    fn or_else(self, f: impl FnOnce() -> Extracted) -> Extracted {
        match self {
            Extracted::Missing => f(),
            text => text,
        }
    }
}

/// Classify the `name` field of `parent`.
pub fn field<'a>(parent: &'a Element, name: &str) -> FieldValue<'a> {
    let mut matches = parent.children.iter().filter(|c| c.name == name);
    match (matches.next(), matches.next()) {
        (None, _) => FieldValue::Absent,
        (Some(first), Some(_)) => FieldValue::Repeated(first),
        (Some(only), None) => classify(only),
    }
}

fn classify(el: &Element) -> FieldValue<'_> {
    if el.has_structure() {
        FieldValue::Node(el)
    } else {
        FieldValue::Scalar(&el.text)
    }
}

/// Resolve any field shape to text.
pub fn pick_text(value: FieldValue<'_>) -> Extracted {
    match value {
        FieldValue::Absent => Extracted::Missing,
        FieldValue::Scalar(s) => non_empty(s),
        FieldValue::Repeated(first) => pick_text(classify(first)),
        FieldValue::Node(el) => non_empty(&el.text)
            .or_else(|| pick_text(field(el, "text")))
            .or_else(|| pick_text(field(el, "content"))),
    }
}

fn non_empty(s: &str) -> Extracted {
    let t = s.trim();
    if t.is_empty() {
        Extracted::Missing
    } else {
        Extracted::Text(t.to_string())
    }
}

fn text_of(parent: &Element, name: &str) -> Extracted {
    pick_text(field(parent, name))
}

/// Parse a feed document. Unknown document types yield an empty list; malformed XML
/// is an error the caller is expected to swallow.
pub fn parse_feed(xml: &str, source: &str) -> Result<Vec<RawFeedItem>> {
    let root = parse_document(xml)?;

    let items: Vec<RawFeedItem> = match root.name.as_str() {
        "rss" => root
            .child("channel")
            .map(|ch| {
                ch.children_named("item")
                    .map(|it| rss_item(it, source))
                    .collect()
            })
            .unwrap_or_default(),
        "feed" => root
            .children_named("entry")
            .map(|en| atom_entry(en, source))
            .collect(),
        other => {
            tracing::debug!(target: "news", source, root = other, "unsupported feed root");
            Vec::new()
        }
    };

    Ok(items
        .into_iter()
        .filter(|it| !it.title.is_empty() && !it.link.is_empty())
        .collect())
}

fn rss_item(it: &Element, source: &str) -> RawFeedItem {
    let link = match sanitize(&text_of(it, "link").into_string()) {
        l if l.is_empty() => sanitize(&text_of(it, "guid").into_string()),
        l => l,
    };
    let pub_date = text_of(it, "pubDate")
        .or_else(|| text_of(it, "published"))
        .or_else(|| text_of(it, "updated"));

    RawFeedItem {
        title: sanitize(&text_of(it, "title").into_string()),
        link,
        pub_date: match pub_date {
            Extracted::Text(s) => Some(s),
            Extracted::Missing => None,
        },
        source: source.to_string(),
    }
}

fn atom_entry(en: &Element, source: &str) -> RawFeedItem {
    let pub_date = text_of(en, "published").or_else(|| text_of(en, "updated"));

    RawFeedItem {
        title: sanitize(&text_of(en, "title").into_string()),
        link: sanitize(&atom_link(en)),
        pub_date: match pub_date {
            Extracted::Text(s) => Some(s),
            Extracted::Missing => None,
        },
        source: source.to_string(),
    }
}

/// Prefer `rel="alternate"` (or no rel), then any link with an href, then link text.
fn atom_link(en: &Element) -> String {
    let with_href = || {
        en.children_named("link")
            .filter(|l| l.attr("href").is_some_and(|h| !h.trim().is_empty()))
    };

    with_href()
        .find(|l| matches!(l.attr("rel"), None | Some("alternate")))
        .or_else(|| with_href().next())
        .and_then(|l| l.attr("href"))
        .map(|h| h.trim().to_string())
        .unwrap_or_else(|| text_of(en, "link").into_string())
}
