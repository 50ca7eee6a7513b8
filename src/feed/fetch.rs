// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use url::Url;

use crate::error::FeedError;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::store::FeedDocument;

use super::parse::normalize_channel;

/// Default cap on the number of feed items kept
pub const DEFAULT_MAX_ITEMS: usize = 200;

/// Default bound on a feed request
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Options for feed normalization
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Maximum number of items kept from the feed
    pub max_items: usize,
    /// Upper bound for the whole feed request
    pub timeout: Duration,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Fetches a podcast feed and maps it to the canonical episode document
#[derive(Clone)]
pub struct FeedNormalizer<C> {
    client: C,
    options: NormalizeOptions,
}

impl<C: HttpClient> FeedNormalizer<C> {
    pub fn new(client: C, options: NormalizeOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize a feed from a URL or a local RSS file.
    ///
    /// Nothing is written; the caller decides whether to persist the result.
    pub async fn normalize(
        &self,
        feed_source: &str,
        reporter: &SharedProgressReporter,
    ) -> Result<FeedDocument, FeedError> {
        let (bytes, feed_url) = if is_url(feed_source) {
            reporter.report(ProgressEvent::FetchingFeed {
                url: feed_source.to_string(),
            });

            let feed_url = Url::parse(feed_source)?.to_string();
            let bytes = fetch_feed_bytes(&self.client, &feed_url, self.options.timeout).await?;
            (bytes.to_vec(), feed_url)
        } else {
            let path = Path::new(feed_source);
            (read_feed_file(path)?, file_path_to_url(path))
        };

        reporter.report(ProgressEvent::ParsingFeed {
            source: feed_source.to_string(),
        });

        let channel = rss::Channel::read_from(bytes.as_slice())?;
        let document = normalize_channel(&channel, &feed_url, self.options.max_items);

        reporter.report(ProgressEvent::FeedParsed {
            podcast_title: document.feed.title.clone(),
            total_items: channel.items().len(),
            kept_items: document.items.len(),
        });

        Ok(document)
    }
}

/// Fetch raw feed bytes, failing on transport errors, non-2xx statuses and
/// when `timeout` elapses first
pub async fn fetch_feed_bytes<C: HttpClient>(
    client: &C,
    url: &str,
    timeout: Duration,
) -> Result<Bytes, FeedError> {
    let response = tokio::time::timeout(timeout, client.get(url))
        .await
        .map_err(|_| FeedError::Timeout {
            url: url.to_string(),
            after: timeout,
        })?
        .map_err(|e| FeedError::FetchFailed {
            url: url.to_string(),
            source: e,
        })?;

    if !response.is_success() {
        return Err(FeedError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    Ok(response.body)
}

/// Read raw feed bytes from a local file (without parsing)
pub fn read_feed_file(path: &Path) -> Result<Vec<u8>, FeedError> {
    std::fs::read(path).map_err(|e| FeedError::FileReadFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Construct a file:// URL for a local file path
pub fn file_path_to_url(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    Url::from_file_path(&absolute)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| format!("file://{}", absolute.display()))
}

/// Determine if a string is a URL or a file path
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
