// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::FeedError;
use crate::store::{Enclosure, Episode, FeedDocument, FeedMetadata, ItunesInfo};
use crate::text::plain_text;

/// Parse RSS feed XML bytes into the canonical document.
///
/// Items keep feed order; at most `max_items` are kept.
pub fn parse_feed(
    xml_bytes: &[u8],
    feed_url: &str,
    max_items: usize,
) -> Result<FeedDocument, FeedError> {
    let channel = rss::Channel::read_from(xml_bytes)?;
    Ok(normalize_channel(&channel, feed_url, max_items))
}

/// Map an already parsed channel to the canonical document
pub fn normalize_channel(channel: &rss::Channel, feed_url: &str, max_items: usize) -> FeedDocument {
    let items = channel
        .items()
        .iter()
        .take(max_items)
        .map(normalize_item)
        .collect();

    FeedDocument::ok(feed_metadata(channel, feed_url), items)
}

fn feed_metadata(channel: &rss::Channel, feed_url: &str) -> FeedMetadata {
    let itunes = channel.itunes_ext();

    let image = channel
        .image()
        .map(|img| img.url().to_string())
        .or_else(|| itunes.and_then(|ext| ext.image().map(String::from)))
        .unwrap_or_default();

    let author = itunes
        .and_then(|ext| ext.author().map(String::from))
        .or_else(|| channel.managing_editor().map(String::from))
        .unwrap_or_default();

    FeedMetadata {
        url: feed_url.to_string(),
        title: channel.title().to_string(),
        link: channel.link().to_string(),
        author,
        description: channel.description().to_string(),
        image,
    }
}

fn normalize_item(item: &rss::Item) -> Episode {
    let itunes = item.itunes_ext();

    let content = item
        .content()
        .or_else(|| item.description())
        .map(String::from);

    let description = item
        .description()
        .or_else(|| item.content())
        .or_else(|| itunes.and_then(|ext| ext.summary()))
        .map(plain_text)
        .filter(|text| !text.is_empty());

    let author = item
        .author()
        .map(String::from)
        .or_else(|| itunes.and_then(|ext| ext.author().map(String::from)))
        .or_else(|| {
            item.dublin_core_ext()
                .and_then(|dc| dc.creators().first().cloned())
        });

    Episode {
        title: item.title().unwrap_or_default().to_string(),
        pub_date: item.pub_date().map(String::from),
        link: item.link().map(String::from),
        guid: item.guid().map(|g| g.value().to_string()),
        author,
        thumbnail: itunes.and_then(|ext| ext.image().map(String::from)),
        description,
        content,
        enclosure: item.enclosure().map(|enclosure| Enclosure {
            url: enclosure.url().to_string(),
            mime_type: Some(enclosure.mime_type().to_string()).filter(|s| !s.is_empty()),
        }),
        categories: item
            .categories()
            .iter()
            .map(|c| c.name().to_string())
            .collect(),
        itunes: itunes.map(|ext| ItunesInfo {
            episode_type: ext.episode_type().map(String::from),
            summary: ext.summary().map(String::from),
            image: ext.image().map(String::from),
            duration: ext.duration().map(String::from),
            episode: ext.episode().map(String::from),
            season: ext.season().map(String::from),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_URL: &str = "https://example.com/feed.xml";

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Test Podcast</title>
    <description>A test podcast for unit testing</description>
    <link>https://example.com</link>
    <itunes:author>Test Author</itunes:author>
    <itunes:image href="https://example.com/image.jpg"/>
    <item>
      <title>Supplements #1</title>
      <description><![CDATA[<p>First <b>episode</b> &amp; more</p>]]></description>
      <content:encoded><![CDATA[<p>Full notes</p><br><br><p>Part two</p>]]></content:encoded>
      <link>https://open.spotify.com/episode/1</link>
      <pubDate>Mon, 01 Jan 2024 12:00:00 +0000</pubDate>
      <guid>ep1-guid</guid>
      <category>Health</category>
      <enclosure url="https://example.com/ep1.mp3" length="1234567" type="audio/mpeg"/>
      <itunes:image href="https://example.com/ep1.jpg"/>
      <itunes:episodeType>full</itunes:episodeType>
      <itunes:duration>30:00</itunes:duration>
      <itunes:episode>1</itunes:episode>
    </item>
    <item>
      <title>Trailer</title>
      <itunes:episodeType>trailer</itunes:episodeType>
    </item>
    <item>
      <title>Episode 3</title>
      <enclosure url="https://example.com/ep3.mp3" type="audio/mpeg"/>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parse_feed_extracts_feed_metadata() {
        let doc = parse_feed(SAMPLE_FEED.as_bytes(), FEED_URL, 200).unwrap();

        assert!(doc.is_ok());
        assert_eq!(doc.feed.url, FEED_URL);
        assert_eq!(doc.feed.title, "Test Podcast");
        assert_eq!(doc.feed.author, "Test Author");
        assert_eq!(doc.feed.image, "https://example.com/image.jpg");
    }

    #[test]
    fn parse_feed_maps_item_fields() {
        let doc = parse_feed(SAMPLE_FEED.as_bytes(), FEED_URL, 200).unwrap();
        let ep = &doc.items[0];

        assert_eq!(ep.title, "Supplements #1");
        assert_eq!(ep.pub_date.as_deref(), Some("Mon, 01 Jan 2024 12:00:00 +0000"));
        assert_eq!(ep.link.as_deref(), Some("https://open.spotify.com/episode/1"));
        assert_eq!(ep.guid.as_deref(), Some("ep1-guid"));
        assert_eq!(ep.thumbnail.as_deref(), Some("https://example.com/ep1.jpg"));
        assert_eq!(ep.description.as_deref(), Some("First episode & more"));
        assert_eq!(
            ep.content.as_deref(),
            Some("<p>Full notes</p><br><br><p>Part two</p>")
        );
        assert_eq!(ep.categories, vec!["Health"]);

        let enclosure = ep.enclosure.as_ref().unwrap();
        assert_eq!(enclosure.url, "https://example.com/ep1.mp3");
        assert_eq!(enclosure.mime_type.as_deref(), Some("audio/mpeg"));

        let itunes = ep.itunes.as_ref().unwrap();
        assert_eq!(itunes.episode_type.as_deref(), Some("full"));
        assert_eq!(itunes.duration.as_deref(), Some("30:00"));
        assert_eq!(itunes.episode.as_deref(), Some("1"));
    }

    #[test]
    fn parse_feed_keeps_escaped_less_than_in_description() {
        let feed = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Test Podcast</title>
    <item>
      <title>Vitamin D</title>
      <description>Werte &lt; 20 ng/ml gelten als Mangel</description>
    </item>
  </channel>
</rss>"#;

        let doc = parse_feed(feed.as_bytes(), FEED_URL, 200).unwrap();

        assert_eq!(
            doc.items[0].description.as_deref(),
            Some("Werte < 20 ng/ml gelten als Mangel")
        );
    }

    #[test]
    fn parse_feed_keeps_items_without_enclosure_in_order() {
        let doc = parse_feed(SAMPLE_FEED.as_bytes(), FEED_URL, 200).unwrap();

        let titles: Vec<_> = doc.items.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Supplements #1", "Trailer", "Episode 3"]);
        assert!(doc.items[1].enclosure.is_none());
        assert!(doc.items[2].description.is_none());
    }

    #[test]
    fn parse_feed_caps_item_count() {
        let doc = parse_feed(SAMPLE_FEED.as_bytes(), FEED_URL, 2).unwrap();

        let titles: Vec<_> = doc.items.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Supplements #1", "Trailer"]);
    }

    #[test]
    fn parse_feed_rejects_non_rss() {
        let result = parse_feed(b"<html><body>nope</body></html>", FEED_URL, 200);
        assert!(matches!(result, Err(FeedError::ParseFailed(_))));
    }
}
