// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use chrono::NaiveDate;

use crate::config::SiteConfig;
use crate::error::UpdateError;
use crate::feed::FeedNormalizer;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::site::{SiteTemplates, WriteSummary, build_site};
use crate::store::{EpisodeStore, FeedDocument};

/// Inputs of a static build besides the episode store
#[derive(Debug, Clone, Copy)]
pub struct SiteBuild<'a> {
    pub templates: &'a SiteTemplates,
    pub output_dir: &'a Path,
    pub config: &'a SiteConfig,
    /// Date used as `lastmod` for pages without a date of their own
    pub generated_on: NaiveDate,
}

/// Result of a full update run
#[derive(Debug, Clone)]
pub struct UpdateResult {
    /// Episodes saved to the store
    pub stored_episodes: usize,
    pub build: WriteSummary,
}

/// Normalize the feed and replace the episode store with the result
pub async fn fetch_store<C: HttpClient>(
    normalizer: &FeedNormalizer<C>,
    feed_source: &str,
    store: &EpisodeStore,
    reporter: &SharedProgressReporter,
) -> Result<FeedDocument, UpdateError> {
    let document = normalizer.normalize(feed_source, reporter).await?;

    store.save(&document)?;
    reporter.report(ProgressEvent::StoreWritten {
        path: store.path().to_path_buf(),
        episodes: document.items.len(),
    });

    Ok(document)
}

/// Fetch the feed, save the store and rebuild the site.
///
/// The templates are checked before anything is fetched, so a broken
/// template leaves both the store and the site untouched.
pub async fn update_site<C: HttpClient>(
    normalizer: &FeedNormalizer<C>,
    feed_source: &str,
    store: &EpisodeStore,
    build: &SiteBuild<'_>,
    reporter: &SharedProgressReporter,
) -> Result<UpdateResult, UpdateError> {
    build.templates.validate()?;

    let document = fetch_store(normalizer, feed_source, store, reporter).await?;
    let summary = build_site(
        store,
        build.templates,
        build.output_dir,
        build.config,
        build.generated_on,
        reporter,
    )?;

    Ok(UpdateResult {
        stored_episodes: document.items.len(),
        build: summary,
    })
}
