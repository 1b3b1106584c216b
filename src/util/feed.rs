use anyhow::{anyhow, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// One `<item>` pulled out of an RSS feed.
#[derive(Debug, Clone, Default)]
pub struct RssItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published: String,
}

impl RssItem {
    /// Title and description joined, the text sentiment scoring runs over.
    pub fn full_text(&self) -> String {
        if self.description.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.description)
        }
    }
}

/// Parses an RSS XML feed into [`RssItem`]s.
///
/// Extracts `<item>` elements, pulling `<title>`, `<link>`, `<description>`
/// and `<pubDate>` fields. HTML tags inside descriptions are stripped. Stops
/// after `max_items` items have been collected.
pub fn parse_rss_feed(xml: &str, max_items: usize) -> Result<Vec<RssItem>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut in_item = false;
    let mut in_description = false;
    let mut current_tag = String::new();
    let mut item = RssItem::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("").to_string();
                if name == "item" {
                    in_item = true;
                    in_description = false;
                    item = RssItem::default();
                } else if name == "description" && in_item {
                    in_description = true;
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("");
                if name == "description" {
                    in_description = false;
                }
                if name == "item" && in_item {
                    in_item = false;
                    if !item.title.is_empty() {
                        items.push(std::mem::take(&mut item));
                        if items.len() >= max_items {
                            break;
                        }
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    if in_description {
                        // Accumulate all text nodes inside <description>,
                        // including those emitted after nested tags like <b>.
                        if !item.description.is_empty() {
                            item.description.push(' ');
                        }
                        item.description.push_str(&text);
                    } else {
                        match current_tag.as_str() {
                            "title" => item.title = text,
                            "link" => item.link = text,
                            "pubDate" => item.published = text,
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_item && in_description {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    item.description = strip_html(&text);
                } else if in_item && current_tag == "title" {
                    item.title = strip_html(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(anyhow!("Failed to parse RSS feed because {:?}", e)),
            _ => {}
        }
    }

    Ok(items)
}

/// Strips HTML tags from a string and normalizes whitespace.
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
<title>channel title</title>
<item>
  <title>Quarterly results beat estimates</title>
  <link>https://example.com/a</link>
  <description><![CDATA[Profit <b>rose</b> 12% on strong demand.]]></description>
  <pubDate>Mon, 24 Aug 2026 10:00:00 GMT</pubDate>
</item>
<item>
  <title>Second story</title>
  <link>https://example.com/b</link>
  <description>Plain description</description>
</item>
</channel></rss>"#;

    #[test]
    fn test_parse_rss_feed() {
        let items = parse_rss_feed(FEED, 10).expect("feed should parse");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Quarterly results beat estimates");
        assert_eq!(items[0].link, "https://example.com/a");
        assert_eq!(items[0].description, "Profit rose 12% on strong demand.");
        assert_eq!(items[0].published, "Mon, 24 Aug 2026 10:00:00 GMT");
        assert_eq!(
            items[0].full_text(),
            "Quarterly results beat estimates Profit rose 12% on strong demand."
        );
        assert_eq!(items[1].description, "Plain description");
    }

    #[test]
    fn test_parse_rss_feed_limit() {
        let items = parse_rss_feed(FEED, 1).expect("feed should parse");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_html("no tags  here"), "no tags here");
    }
}
