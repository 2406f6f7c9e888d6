// tests/news_parse.rs
use spanish_tv_news::news::parse::parse_feed;

const RSS_XML: &str = include_str!("fixtures/google_news_rss.xml");
const ATOM_XML: &str = include_str!("fixtures/variety_atom.xml");

#[test]
fn rss_fixture_yields_titled_linked_items() {
    let items = parse_feed(RSS_XML, "Google News: Telemundo").expect("rss parses");

    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            r#"Telemundo renews "La Reina del Sur" for a fourth season - Variety"#,
            "Netflix\u{2019}s new telenovela tops the charts",
            "ViX orders docuseries on Mexican boxing",
            "Classic novela roundup",
            "Undated Univision schedule note",
        ],
        "blank-title and link-less items must be dropped"
    );
    assert!(items.iter().all(|i| i.source == "Google News: Telemundo"));

    // Multi-line <link> text is trimmed.
    assert_eq!(items[1].link, "https://news.example.test/articles/netflix-telenovela");
    // guid stands in for a missing <link>.
    assert_eq!(items[2].link, "https://news.example.test/articles/vix-boxing");
    assert_eq!(items[0].pub_date.as_deref(), Some("Tue, 14 Oct 2025 18:30:00 GMT"));
    assert_eq!(items[4].pub_date, None);
}

#[test]
fn atom_fixture_resolves_links_and_dates() {
    let items = parse_feed(ATOM_XML, "Variety TV").expect("atom parses");
    assert_eq!(items.len(), 3, "untitled entry must be dropped");

    // Title carried with a type attribute, double-escaped in the source.
    assert_eq!(items[0].title, "Hello & World");
    assert_eq!(items[0].link, "https://variety.example.test/tv/hello-world");
    assert_eq!(items[0].pub_date.as_deref(), Some("2025-10-15T07:00:00Z"));

    assert_eq!(items[1].title, "HBO Max picks up Colombian thriller \u{2014} first look");
    assert_eq!(items[1].link, "https://variety.example.test/tv/hbo-max-thriller");
    // No <published>: falls back to <updated>.
    assert_eq!(items[1].pub_date.as_deref(), Some("2025-10-12T16:45:00+02:00"));

    // Only a non-primary link available: first href wins.
    assert_eq!(items[2].link, "https://variety.example.test/media/comedy.jpg");
}

#[test]
fn single_item_channel_parses() {
    let xml = r#"<rss version="2.0"><channel><title>x</title>
        <item>
          <title>Only one</title><link>https://one.test/</link>
          <published>2025-10-01T00:00:00Z</published>
        </item>
    </channel></rss>"#;
    let items = parse_feed(xml, "S").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].pub_date.as_deref(), Some("2025-10-01T00:00:00Z"));
}

#[test]
fn malformed_xml_is_an_error_not_a_panic() {
    assert!(parse_feed("<rss><channel><item><title>x</title></channel></rss>", "S").is_err());
    assert!(parse_feed("", "S").is_err());
    assert!(parse_feed("<<<>>>", "S").is_err());
}

#[test]
fn channel_without_items_is_empty() {
    assert!(parse_feed("<rss><channel/></rss>", "S").unwrap().is_empty());
    assert!(parse_feed("<rss/>", "S").unwrap().is_empty());
    assert!(parse_feed("<feed/>", "S").unwrap().is_empty());
}

#[test]
fn pathologically_nested_feed_is_rejected() {
    let depth = 100_000;
    let xml = format!(
        "<rss><channel><item><title>{}{}</title>\
         <link>https://deep.test/</link></item></channel></rss>",
        "<a>".repeat(depth),
        "</a>".repeat(depth),
    );
    assert!(parse_feed(&xml, "S").is_err());
}
