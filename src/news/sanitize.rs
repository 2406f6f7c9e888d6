// src/news/sanitize.rs
//! Entity decoding and whitespace folding for feed titles and links.
//!
//! Only a fixed set of named entities is decoded; anything else that looks like a
//! reference is left verbatim so legitimate text (`AT&T;`, `R&D`) survives.

use once_cell::sync::OnceCell;
use regex::Regex;

const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("quot", '"'),
    ("apos", '\''),
    ("lt", '<'),
    ("gt", '>'),
    ("nbsp", '\u{00A0}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("hellip", '\u{2026}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
];

// Longest body we try to decode: "#x10FFFF" / "#1114111".
const MAX_REF_LEN: usize = 8;

/// Decode entities, collapse whitespace runs (NBSP included) to one space, trim.
///
/// Decoding runs until nothing changes, so `sanitize(sanitize(x)) == sanitize(x)`;
/// double-escaped input such as `&amp;amp;` ends up as a bare `&`.
pub fn sanitize(s: &str) -> String {
    let mut cur = decode_entities_once(s);
    loop {
        let next = decode_entities_once(&cur);
        if next == cur {
            break;
        }
        cur = next;
    }

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));
    re_ws.replace_all(&cur, " ").trim().to_string()
}

/// Single left-to-right decoding pass.
pub fn decode_entities_once(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_REF_LEN)
            .and_then(|end| decode_reference(&after[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// `body` is the text between `&` and `;`.
fn decode_reference(body: &str) -> Option<char> {
    let Some(num) = body.strip_prefix('#') else {
        return NAMED_ENTITIES
            .iter()
            .find(|(name, _)| *name == body)
            .map(|(_, c)| *c);
    };

    let code = match num.strip_prefix(['x', 'X']) {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u32::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) => {
            num.parse::<u32>().ok()?
        }
        None => return None,
    };

    char::from_u32(code).filter(|c| *c != '\0')
}
