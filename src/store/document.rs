// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use super::episode::Episode;

/// Status value of a successfully produced document
pub const STATUS_OK: &str = "ok";

/// Podcast-level metadata, attached once per document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedMetadata {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

/// The episode store document: `{status, feed, items}`.
///
/// The feed normalizer produces it, the static generator and the live proxy
/// consume it, and the browser loader receives it over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedDocument {
    pub status: String,
    #[serde(default)]
    pub feed: FeedMetadata,
    #[serde(default)]
    pub items: Vec<Episode>,
}

impl FeedDocument {
    /// Create a successful document
    pub fn ok(feed: FeedMetadata, items: Vec<Episode>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            feed,
            items,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}
