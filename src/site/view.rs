// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset};

use crate::config::SiteConfig;
use crate::slug::slugify;
use crate::store::Episode;
use crate::text::{format_date_long, plain_text, title_categories, truncate};

/// Everything the cards and pages need about one episode, derived once.
///
/// Missing or broken fields are replaced by fallbacks here; `degraded`
/// records which ones so the caller can report them.
#[derive(Debug, Clone)]
pub struct EpisodeView {
    pub title: String,
    pub slug: String,
    pub url: String,
    pub published: Option<DateTime<FixedOffset>>,
    /// Display date, empty when the feed date is unusable
    pub date_label: String,
    /// Markup-free summary, untruncated
    pub summary: String,
    pub card_summary: String,
    pub meta_description: String,
    /// Artwork, or the site default
    pub image_url: String,
    pub audio_url: Option<String>,
    /// Full notes as HTML
    pub content_html: String,
    pub categories: Vec<String>,
    /// Listen link on Spotify: the episode link, else the show page
    pub spotify_url: String,
    pub degraded: Vec<&'static str>,
}

impl EpisodeView {
    pub fn new(episode: &Episode, config: &SiteConfig) -> Self {
        let mut degraded = Vec::new();

        let slug = slugify(&episode.title);
        if slug.is_empty() {
            degraded.push("title yields an empty slug");
        }

        let published = episode.published_at();
        if published.is_none() {
            degraded.push("missing or unparseable publish date");
        }

        let audio_url = episode.audio_url().map(String::from);
        if audio_url.is_none() {
            degraded.push("missing enclosure");
        }

        let image_url = match episode.image() {
            Some(url) => url.to_string(),
            None => config.default_image.clone(),
        };

        let summary = plain_text(episode.summary_source());
        let card_summary = if summary.is_empty() {
            config.missing_summary.clone()
        } else {
            truncate(&summary, config.card_summary_length, &config.ellipsis)
        };

        let content_html = match episode.content.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(content) => content.replace("<br><br>", "</p><p>"),
            None => format!("<p>{}</p>", html_escape::encode_text(&summary)),
        };

        Self {
            title: episode.title.clone(),
            url: config.episode_url(&slug),
            slug,
            published,
            date_label: published.as_ref().map(format_date_long).unwrap_or_default(),
            card_summary,
            meta_description: truncate(&summary, config.meta_description_length, ""),
            summary,
            image_url,
            audio_url,
            content_html,
            categories: title_categories(&episode.title, &config.category_exclusions),
            spotify_url: episode
                .link
                .clone()
                .filter(|link| !link.trim().is_empty())
                .unwrap_or_else(|| config.platforms.spotify.clone()),
            degraded,
        }
    }
}
