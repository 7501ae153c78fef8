use feed_rs::model::Entry;
use feed_rs::parser;
use swipeflix_models::{NewsItem, NewsSource};
use tracing::debug;

use crate::error::SourceError;

/// Parse an RSS or Atom document into news items attributed to `source`.
///
/// Entries without a title are dropped. Items keep document order.
pub fn parse_feed(source: &NewsSource, body: &[u8]) -> Result<Vec<NewsItem>, SourceError> {
    let feed = parser::parse(body)
        .map_err(|e| SourceError::Decode(format!("{}: {}", source.name, e)))?;

    let items: Vec<NewsItem> = feed
        .entries
        .into_iter()
        .filter_map(|entry| convert_entry(source, entry))
        .collect();

    debug!("Parsed {} entries from {}", items.len(), source.name);
    Ok(items)
}

fn convert_entry(source: &NewsSource, entry: Entry) -> Option<NewsItem> {
    let title = entry
        .title
        .as_ref()
        .map(|t| strip_html(&t.content))
        .filter(|t| !t.is_empty())?;

    let raw_description = entry
        .summary
        .as_ref()
        .map(|s| s.content.clone())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.clone()))
        .unwrap_or_default();

    let image_url = entry_image(&entry).or_else(|| first_img_src(&raw_description));
    let link = entry.links.first().map(|l| l.href.clone());

    Some(NewsItem {
        title,
        description: strip_html(&raw_description),
        image_url,
        source: source.name.clone(),
        published_at: entry.published.or(entry.updated),
        link,
    })
}

/// Image from media:content, media:thumbnail, or an image enclosure link.
fn entry_image(entry: &Entry) -> Option<String> {
    for media in &entry.media {
        for content in &media.content {
            let is_image = content
                .content_type
                .as_ref()
                .map(|ct| ct.to_string().starts_with("image/"))
                .unwrap_or(false);
            if is_image {
                if let Some(url) = &content.url {
                    return Some(url.to_string());
                }
            }
        }
        if let Some(thumbnail) = media.thumbnails.first() {
            return Some(thumbnail.image.uri.clone());
        }
    }

    entry
        .links
        .iter()
        .find(|l| {
            l.media_type
                .as_deref()
                .map(|t| t.starts_with("image/"))
                .unwrap_or(false)
        })
        .map(|l| l.href.clone())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.as_deref()).and_then(first_img_src))
}

/// `src` attribute of the first `<img>` tag in an HTML fragment.
fn first_img_src(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let tag_start = lower.find("<img")?;
    let tag_end = lower[tag_start..].find('>').map(|i| tag_start + i)?;
    let tag = &html[tag_start..tag_end];
    let tag_lower = &lower[tag_start..tag_end];

    let attr = tag_lower.find("src=")?;
    let rest = &tag[attr + 4..];
    let quote = rest.chars().next()?;
    let value = if quote == '"' || quote == '\'' {
        let inner = &rest[1..];
        &inner[..inner.find(quote)?]
    } else {
        rest.split_whitespace().next()?
    };

    let value = decode_entities(value.trim());
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

const BLOCK_TAGS: &[&str] = &[
    "p", "br", "div", "li", "ul", "ol", "blockquote", "h1", "h2", "h3", "h4", "h5", "h6", "tr",
];

/// Remove tags, decode entities and collapse whitespace.
///
/// Only block-level tags separate words; inline runs such as
/// `<b>Dune</b>'s` stay joined.
pub fn strip_html(input: &str) -> String {
    let mut text = String::with_capacity(input.len());
    let mut tag = String::new();
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                if is_block_tag(&tag) {
                    text.push(' ');
                }
            }
            _ if in_tag => tag.push(c),
            _ => text.push(c),
        }
    }

    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_block_tag(tag: &str) -> bool {
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}

fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        match after.find(';').filter(|&end| end <= 10) {
            Some(end) => {
                let entity = &after[1..end];
                match decode_entity(entity) {
                    Some(c) => out.push(c),
                    None => out.push_str(&after[..=end]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "hellip" => Some('…'),
        "mdash" => Some('—'),
        "ndash" => Some('–'),
        "lsquo" => Some('‘'),
        "rsquo" => Some('’'),
        "ldquo" => Some('“'),
        "rdquo" => Some('”'),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn source() -> NewsSource {
        NewsSource::new("Collider", "https://collider.com/feed/")
    }

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Collider</title>
    <link>https://collider.com</link>
    <description>Movie news</description>
    <item>
      <title>Dune &amp; Beyond</title>
      <link>https://collider.com/dune</link>
      <description><![CDATA[<p>First look at <b>Dune</b>&#8217;s sequel.</p><img src="https://img.example/dune.jpg" />]]></description>
      <pubDate>Tue, 05 Mar 2024 14:30:00 GMT</pubDate>
      <guid>dune-1</guid>
    </item>
    <item>
      <title>Casting news</title>
      <link>https://collider.com/casting</link>
      <description>Plain text</description>
      <enclosure url="https://img.example/cast.png" length="100" type="image/png" />
      <guid>cast-1</guid>
    </item>
    <item>
      <description>No title, dropped</description>
      <guid>none</guid>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>FirstShowing</title>
  <id>urn:firstshowing</id>
  <updated>2024-03-06T10:00:00Z</updated>
  <entry>
    <title>Trailer watch</title>
    <id>urn:trailer-watch</id>
    <link href="https://firstshowing.net/trailer"/>
    <updated>2024-03-06T10:00:00Z</updated>
    <summary>New   trailer
      is out</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_items() {
        let items = parse_feed(&source(), RSS.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);

        let dune = &items[0];
        assert_eq!(dune.title, "Dune & Beyond");
        assert_eq!(dune.description, "First look at Dune’s sequel.");
        assert_eq!(dune.image_url.as_deref(), Some("https://img.example/dune.jpg"));
        assert_eq!(dune.source, "Collider");
        assert_eq!(dune.link.as_deref(), Some("https://collider.com/dune"));
        assert_eq!(
            dune.published_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap())
        );

        let casting = &items[1];
        assert_eq!(casting.image_url.as_deref(), Some("https://img.example/cast.png"));
        assert!(casting.published_at.is_none());
    }

    #[test]
    fn test_parse_atom_uses_updated_date() {
        let items = parse_feed(&source(), ATOM.as_bytes()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "New trailer is out");
        assert_eq!(items[0].link.as_deref(), Some("https://firstshowing.net/trailer"));
        assert_eq!(
            items[0].published_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_garbage_is_decode_error() {
        let result = parse_feed(&source(), b"this is not xml at all");
        assert!(matches!(result, Err(SourceError::Decode(_))));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello&nbsp;<i>world</i></p>"), "Hello world");
        assert_eq!(strip_html("Tom &#x26; Jerry &unknown; ok"), "Tom & Jerry &unknown; ok");
        assert_eq!(strip_html("a & b"), "a & b");
    }

    #[test]
    fn test_strip_html_keeps_inline_runs_together() {
        assert_eq!(
            strip_html("<p>See <a href=\"x\">Dune</a>, then <b>Dune</b>&#8217;s sequel.</p>"),
            "See Dune, then Dune’s sequel."
        );
        assert_eq!(strip_html("One<br/>Two<BR>Three</p><p>Four"), "One Two Three Four");
        assert_eq!(strip_html("<li>a</li><li>b</li>"), "a b");
    }

    #[test]
    fn test_first_img_src() {
        assert_eq!(
            first_img_src(r#"<div><IMG class="x" SRC='https://a/b.jpg'></div>"#).as_deref(),
            Some("https://a/b.jpg")
        );
        assert_eq!(first_img_src("<p>no image</p>"), None);
    }
}
