// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::Utc;
use serde_json::{Value, json};

use crate::config::SiteConfig;
use crate::error::TemplateError;

use super::share::share_section;
use super::template::{self, Field, Template};
use super::view::EpisodeView;
use super::escape_attr;

/// Placeholders every episode template must contain
pub const EPISODE_REQUIRED: &[&str] = &[
    template::EPISODE_TITLE,
    template::EPISODE_DATE,
    template::EPISODE_DESCRIPTION,
    template::EPISODE_URL,
    template::EPISODE_IMAGE_URL,
    template::EPISODE_CONTENT,
];

/// Render the standalone page for one episode
pub fn render_episode_page(
    template: &Template,
    view: &EpisodeView,
    config: &SiteConfig,
) -> Result<String, TemplateError> {
    let fields = [
        Field::required(template::EPISODE_TITLE, escape_attr(&view.title)),
        Field::required(template::EPISODE_DATE, escape_attr(&view.date_label)),
        Field::required(
            template::EPISODE_DESCRIPTION,
            escape_attr(&view.meta_description),
        ),
        Field::required(template::EPISODE_URL, escape_attr(&view.url)),
        Field::required(template::EPISODE_IMAGE_URL, escape_attr(&view.image_url)),
        Field::optional(
            template::EPISODE_AUDIO_URL,
            escape_attr(view.audio_url.as_deref().unwrap_or_default()),
        ),
        Field::required(template::EPISODE_CONTENT, view.content_html.clone()),
        Field::optional(template::JSON_LD_SCHEMA, json_ld(view, config)),
        Field::optional(
            template::SHARE_BUTTONS,
            share_section(&config.share_platforms, &view.url, &view.title),
        ),
    ];

    template.render(&fields)
}

/// schema.org `PodcastEpisode` description, safe to embed in a script tag
pub fn json_ld(view: &EpisodeView, config: &SiteConfig) -> String {
    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "PodcastEpisode",
        "name": view.title,
        "description": view.summary,
        "url": view.url,
        "image": view.image_url,
        "partOfSeries": {
            "@type": "PodcastSeries",
            "name": config.podcast_name,
            "url": config.home_url(),
        },
    });

    if let Some(published) = view.published {
        schema["datePublished"] = Value::String(published.with_timezone(&Utc).to_rfc3339());
    }
    if let Some(audio_url) = &view.audio_url {
        schema["associatedMedia"] = json!({
            "@type": "MediaObject",
            "contentUrl": audio_url,
        });
    }

    serde_json::to_string_pretty(&schema)
        .unwrap_or_default()
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Enclosure, Episode};

    const TEMPLATE: &str = r#"<html><head><title>%%EPISODE_TITEL%%</title>
<meta name="description" content="%%EPISODE_BESCHREIBUNG%%">
<link rel="canonical" href="%%EPISODE_URL%%">
<meta property="og:image" content="%%EPISODE_BILD_URL%%">
<script type="application/ld+json">%%JSON_LD_SCHEMA%%</script></head>
<body><h1>%%EPISODE_TITEL%%</h1><time>%%EPISODE_DATUM%%</time>
<audio src="%%EPISODE_AUDIO_URL%%"></audio>
<article>%%EPISODE_INHALT%%</article>
<!-- SHARE-BUTTONS-PLACEHOLDER --></body></html>"#;

    fn make_view(episode: &Episode) -> EpisodeView {
        EpisodeView::new(episode, &SiteConfig::default())
    }

    fn full_episode() -> Episode {
        Episode {
            title: "Folge 1: Schlaf".to_string(),
            pub_date: Some("Mon, 01 Jan 2024 12:00:00 +0100".to_string()),
            description: Some("Alles zum Thema Schlaf".to_string()),
            content: Some("<p>Notizen</p>".to_string()),
            enclosure: Some(Enclosure {
                url: "https://example.com/1.mp3".to_string(),
                mime_type: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn renders_all_placeholders() {
        let config = SiteConfig::default();
        let template = Template::new("episode", TEMPLATE);
        let view = make_view(&full_episode());

        let html = render_episode_page(&template, &view, &config).unwrap();

        assert!(!html.contains("%%"));
        assert!(!html.contains("SHARE-BUTTONS-PLACEHOLDER"));
        assert!(html.contains("<title>Folge 1: Schlaf</title>"));
        assert!(html.contains("<time>1. Januar 2024</time>"));
        assert!(html.contains(r#"<audio src="https://example.com/1.mp3">"#));
        assert!(html.contains("<article><p>Notizen</p></article>"));
        assert!(html.contains("Episode teilen:"));
    }

    #[test]
    fn missing_thumbnail_uses_default_image() {
        let config = SiteConfig::default();
        let template = Template::new("episode", TEMPLATE);
        let view = make_view(&full_episode());

        let html = render_episode_page(&template, &view, &config).unwrap();

        assert!(html.contains(&format!(r#"content="{}""#, config.default_image)));
        assert!(!html.contains(r#"content="""#));
    }

    #[test]
    fn missing_required_placeholder_fails() {
        let config = SiteConfig::default();
        let template = Template::new("episode", "<h1>%%EPISODE_TITEL%%</h1>");
        let view = make_view(&full_episode());

        let result = render_episode_page(&template, &view, &config);
        assert!(matches!(result, Err(TemplateError::MissingPlaceholder { .. })));
    }

    #[test]
    fn json_ld_describes_episode() {
        let config = SiteConfig::default();
        let view = make_view(&full_episode());

        let schema: Value = serde_json::from_str(&json_ld(&view, &config)).unwrap();

        assert_eq!(schema["@type"], "PodcastEpisode");
        assert_eq!(schema["name"], "Folge 1: Schlaf");
        assert_eq!(schema["datePublished"], "2024-01-01T11:00:00+00:00");
        assert_eq!(schema["associatedMedia"]["contentUrl"], "https://example.com/1.mp3");
        assert_eq!(schema["partOfSeries"]["name"], "Wissens-Akku");
    }

    #[test]
    fn json_ld_cannot_close_script_tag() {
        let config = SiteConfig::default();
        let episode = Episode {
            title: "</script><script>alert(1)</script>".to_string(),
            ..Default::default()
        };

        let schema = json_ld(&make_view(&episode), &config);

        assert!(!schema.contains("</script>"));
        assert!(!schema.contains("datePublished"));
        assert!(!schema.contains("associatedMedia"));
    }
}
