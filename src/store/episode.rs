// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::Reverse;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::text::parse_date;

/// A single podcast episode in its canonical, serializable shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Plain-text summary (markup already stripped by the normalizer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Full show notes, may contain markup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosure: Option<Enclosure>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itunes: Option<ItunesInfo>,
}

/// The audio file attached to an episode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// iTunes namespace fields that the generator cares about
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
}

impl Episode {
    /// Publish date, if present and parseable
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        self.pub_date.as_deref().and_then(parse_date)
    }

    /// Feed-declared episode type (`full`, `trailer`, `bonus`), if any
    pub fn episode_type(&self) -> Option<&str> {
        self.itunes
            .as_ref()
            .and_then(|itunes| itunes.episode_type.as_deref())
    }

    /// Whether this is a regular episode.
    ///
    /// Feeds that never declare an episode type count every item as full.
    pub fn is_full_episode(&self) -> bool {
        self.episode_type()
            .is_none_or(|kind| kind.eq_ignore_ascii_case("full"))
    }

    /// Episode artwork, falling back to the iTunes image
    pub fn image<'a>(&'a self) -> Option<&'a str> {
        let non_blank = |url: Option<&'a str>| url.filter(|u| !u.trim().is_empty());

        non_blank(self.thumbnail.as_deref())
            .or_else(|| non_blank(self.itunes.as_ref().and_then(|i| i.image.as_deref())))
    }

    /// Audio URL, if the enclosure carries a non-empty one
    pub fn audio_url(&self) -> Option<&str> {
        self.enclosure
            .as_ref()
            .map(|e| e.url.as_str())
            .filter(|url| !url.trim().is_empty())
    }

    /// Raw summary text: description, then iTunes summary, then content
    pub fn summary_source(&self) -> &str {
        fn non_empty(s: &Option<String>) -> Option<&str> {
            s.as_deref().filter(|s| !s.trim().is_empty())
        }

        non_empty(&self.description)
            .or_else(|| self.itunes.as_ref().and_then(|i| non_empty(&i.summary)))
            .or_else(|| non_empty(&self.content))
            .unwrap_or("")
    }
}

/// Sort episodes newest first.
///
/// Stable, so episodes with equal dates keep feed order. Episodes without a
/// parseable date sink to the end.
pub fn sort_newest_first(episodes: &mut [Episode]) {
    episodes.sort_by_key(|episode| Reverse(episode.published_at()));
}
