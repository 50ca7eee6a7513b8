// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when fetching or parsing RSS feeds
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to fetch feed from {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Fetching {url} timed out after {}s", after.as_secs_f32())]
    Timeout { url: String, after: Duration },

    #[error("Failed to read feed file {path}: {source}")]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse RSS feed: {0}")]
    ParseFailed(#[from] rss::Error),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors that can occur when reading or writing the episode store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No episode store found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read episode store {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write episode store {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse episode store JSON in {path}: {source}")]
    JsonParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize episode store: {0}")]
    JsonSerializeFailed(#[from] serde_json::Error),
}

/// Errors raised while loading or rendering HTML templates
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template '{template}' is missing required placeholder {placeholder}")]
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("Failed to read template {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a static site build
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors encountered by the client-side episode loader.
///
/// None of these ever reach the page: the loader degrades through its
/// fallback chain and turns the final failure into an empty state.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request to {url} timed out after {}s", after.as_secs_f32())]
    Timeout { url: String, after: Duration },

    #[error("Invalid episode JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Episode data from {url} reported status '{status}'")]
    StatusNotOk { url: String, status: String },

    #[error("Local episode file not found at {0}")]
    NotFound(String),
}

/// Errors that can occur when loading the site configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors that abort a fetch-and-build run
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),
}

impl From<TemplateError> for UpdateError {
    fn from(e: TemplateError) -> Self {
        UpdateError::Build(BuildError::Template(e))
    }
}
