// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::sync::Arc;

/// Events emitted while fetching, building and serving, for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Feed is being fetched from URL
    FetchingFeed { url: String },

    /// Feed bytes are being parsed (URL or local file)
    ParsingFeed { source: String },

    /// Feed has been normalized
    FeedParsed {
        podcast_title: String,
        /// Items present in the feed
        total_items: usize,
        /// Items kept after applying the item cap
        kept_items: usize,
    },

    /// The episode store was written to disk
    StoreWritten { path: PathBuf, episodes: usize },

    /// Both templates contain every required placeholder
    TemplatesValidated,

    /// An episode had unusable fields and was rendered with fallbacks
    EpisodeDegraded { episode_title: String, reason: String },

    /// Two episodes produced the same slug; the later one wins
    SlugCollision { slug: String, episode_title: String },

    /// A generated file was written
    PageWritten { path: PathBuf },

    /// The sitemap was written
    SitemapWritten { path: PathBuf, entries: usize },

    /// Episode pages from an earlier build that no longer have an episode.
    /// They are left in place.
    StalePagesDetected { paths: Vec<PathBuf> },

    /// Static build finished
    BuildCompleted {
        episode_pages: usize,
        list_cards: usize,
    },

    /// The live feed proxy answered a request
    ProxyServed { items: usize },

    /// The live feed proxy failed to produce a feed
    ProxyFailed { error: String },

    /// A step of the browser acquisition chain failed and the next one is tried
    EpisodeSourceFailed { stage: &'static str, error: String },

    /// The browser renderer obtained its episode list
    EpisodesLoaded { origin: &'static str, episodes: usize },
}

/// Trait for reporting progress events.
///
/// Implementations can use this to display spinners, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

/// Collects every event it receives. Used by tests to assert on reporting.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: std::sync::Mutex<Vec<ProgressEvent>>,
}

#[cfg(test)]
impl ProgressReporter for RecordingReporter {
    fn report(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}
