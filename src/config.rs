// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::slug::page_stem;

/// Site-wide settings shared by the generator, the proxy and the client
/// renderer. Every field has a default, so a config file only lists what
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute site root without trailing slash
    pub base_url: String,
    pub podcast_name: String,
    pub feed_url: String,
    /// Image used when an episode has no artwork
    pub default_image: String,
    /// Directory (and URL segment) holding the episode pages
    pub episodes_dir: String,
    /// File name of the generated episode list page
    pub list_page: String,
    pub platforms: PlatformLinks,
    pub share_platforms: Vec<SharePlatform>,
    /// Character budget for card summaries
    pub card_summary_length: usize,
    /// Character budget for the per-episode meta description
    pub meta_description_length: usize,
    pub ellipsis: String,
    /// Card text for episodes without any summary
    pub missing_summary: String,
    /// Title prefixes that never become a category (the show name)
    pub category_exclusions: Vec<String>,
    /// Drop trailers and bonus items when the feed labels episode types
    pub only_full_episodes: bool,
    /// Fixed pages listed in the sitemap besides home and episodes
    pub static_pages: Vec<StaticPage>,
    pub listen_behaviour: ListenBehaviour,
    /// How long a cached episode list stays fresh in the browser
    pub cache_freshness_secs: u64,
    /// Bound on the live proxy request in the browser
    pub live_timeout_secs: u64,
    /// Site-relative path of the live feed proxy
    pub live_endpoint: String,
    /// Site-relative path of the bundled episode store
    pub local_store_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.wissens-akku.com".to_string(),
            podcast_name: "Wissens-Akku".to_string(),
            feed_url: "https://anchor.fm/s/107c46c58/podcast/rss".to_string(),
            default_image: "https://www.wissens-akku.com/Bilder/wissenakku-logo.png".to_string(),
            episodes_dir: "episoden".to_string(),
            list_page: "episoden.html".to_string(),
            platforms: PlatformLinks::default(),
            share_platforms: vec![
                SharePlatform::Facebook,
                SharePlatform::WhatsApp,
                SharePlatform::Telegram,
            ],
            card_summary_length: 150,
            meta_description_length: 160,
            ellipsis: "...".to_string(),
            missing_summary: "Keine Zusammenfassung verfügbar.".to_string(),
            category_exclusions: vec!["Wissens-Akku".to_string()],
            only_full_episodes: true,
            static_pages: vec![
                StaticPage::new("impressum.html", "yearly", 0.3),
                StaticPage::new("datenschutz.html", "yearly", 0.3),
            ],
            listen_behaviour: ListenBehaviour::PlatformModal,
            cache_freshness_secs: 60 * 60,
            live_timeout_secs: 8,
            live_endpoint: "/.netlify/functions/rss-proxy".to_string(),
            local_store_path: "assets/js/episodes.json".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn home_url(&self) -> String {
        format!("{}/", self.root())
    }

    /// Absolute URL of a site-relative path
    pub fn page_url(&self, path: &str) -> String {
        format!("{}/{}", self.root(), path.trim_start_matches('/'))
    }

    pub fn list_page_url(&self) -> String {
        self.page_url(&self.list_page)
    }

    /// Canonical URL of the page generated for `slug`
    pub fn episode_url(&self, slug: &str) -> String {
        self.page_url(&format!("{}/{}.html", self.episodes_dir, page_stem(slug)))
    }

    pub fn cache_freshness(&self) -> Duration {
        Duration::from_secs(self.cache_freshness_secs)
    }

    pub fn live_timeout(&self) -> Duration {
        Duration::from_secs(self.live_timeout_secs)
    }
}

/// Show pages on the listening platforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformLinks {
    pub spotify: String,
    pub apple: String,
    pub youtube: String,
}

impl Default for PlatformLinks {
    fn default() -> Self {
        Self {
            spotify: "https://open.spotify.com/show/4cvMLk6acssF3L31vMHy9H".to_string(),
            apple: "https://podcasts.apple.com/de/podcast/wissens-akku/id1833243965".to_string(),
            youtube: "https://www.youtube.com/@Wissens-Akku".to_string(),
        }
    }
}

/// Platforms offered as share links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Facebook,
    WhatsApp,
    Telegram,
    X,
    LinkedIn,
}

/// What a card's listen control does in the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenBehaviour {
    /// Open the platform-choice modal
    PlatformModal,
    /// Open the episode's Spotify link (or the show page) directly
    DirectLink,
}

/// A fixed page listed in the sitemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPage {
    /// Site-relative path
    pub path: String,
    pub changefreq: String,
    pub priority: f32,
}

impl StaticPage {
    pub fn new(path: &str, changefreq: &str, priority: f32) -> Self {
        Self {
            path: path.to_string(),
            changefreq: changefreq.to_string(),
            priority,
        }
    }
}
