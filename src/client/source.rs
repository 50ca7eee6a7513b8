// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;

use crate::config::SiteConfig;
use crate::error::LoadError;
use crate::http::HttpClient;
use crate::store::FeedDocument;

/// Where the browser renderer gets episode documents from
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    /// Ask the live feed proxy. Fails unless the document reports `ok`.
    async fn fetch_live(&self) -> Result<FeedDocument, LoadError>;

    /// Fetch the episode store bundled with the site
    async fn fetch_local(&self) -> Result<FeedDocument, LoadError>;

    /// Address `fetch_live` asks
    fn live_url(&self) -> &str;
}

/// Episode source backed by HTTP requests against the site
pub struct HttpEpisodeSource<C> {
    client: C,
    live_url: String,
    local_url: String,
}

impl<C: HttpClient> HttpEpisodeSource<C> {
    pub fn new(client: C, live_url: impl Into<String>, local_url: impl Into<String>) -> Self {
        Self {
            client,
            live_url: live_url.into(),
            local_url: local_url.into(),
        }
    }

    /// Proxy endpoint and bundled store as configured for the site
    pub fn from_config(client: C, config: &SiteConfig) -> Self {
        Self::new(
            client,
            config.page_url(&config.live_endpoint),
            config.page_url(&config.local_store_path),
        )
    }

    pub fn local_url(&self) -> &str {
        &self.local_url
    }

    async fn get_document(&self, url: &str) -> Result<FeedDocument, LoadError> {
        let response = self.client.get(url).await.map_err(|e| LoadError::Fetch {
            url: url.to_string(),
            source: e,
        })?;

        if !response.is_success() {
            return Err(LoadError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| LoadError::Parse {
            url: url.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl<C: HttpClient> EpisodeSource for HttpEpisodeSource<C> {
    fn live_url(&self) -> &str {
        &self.live_url
    }

    async fn fetch_live(&self) -> Result<FeedDocument, LoadError> {
        let document = self.get_document(&self.live_url).await?;

        if !document.is_ok() {
            return Err(LoadError::StatusNotOk {
                url: self.live_url.clone(),
                status: document.status,
            });
        }

        Ok(document)
    }

    async fn fetch_local(&self) -> Result<FeedDocument, LoadError> {
        match self.get_document(&self.local_url).await {
            Err(LoadError::HttpStatus { url, status: 404 }) => Err(LoadError::NotFound(url)),
            other => other,
        }
    }
}
