// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::store::Episode;

/// Storage key of the serialized episode list
pub const CACHE_KEY: &str = "episodes_cache";

/// Storage key of the snapshot time, in milliseconds since the epoch
pub const CACHE_TIMESTAMP_KEY: &str = "episodes_cache_timestamp";

/// Session-scoped string storage (the browser's `sessionStorage`)
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: String);

    fn remove_item(&self, key: &str);
}

/// In-memory session storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: String) {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value);
    }

    fn remove_item(&self, key: &str) {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
    }
}

/// Episode list snapshot kept in session storage with a freshness window
pub struct EpisodeCache<S> {
    storage: S,
    freshness: Duration,
}

impl<S: SessionStorage> EpisodeCache<S> {
    pub fn new(storage: S, freshness: Duration) -> Self {
        Self { storage, freshness }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The cached episodes, if a snapshot younger than the freshness window
    /// exists at `now`.
    ///
    /// Expired or unreadable snapshots are discarded.
    pub fn fresh(&self, now: DateTime<Utc>) -> Option<Vec<Episode>> {
        let stored_at = self
            .storage
            .get_item(CACHE_TIMESTAMP_KEY)?
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis);

        let Some(stored_at) = stored_at else {
            self.clear();
            return None;
        };

        let age = now.signed_duration_since(stored_at).to_std().ok();
        if !age.is_some_and(|age| age < self.freshness) {
            self.clear();
            return None;
        }

        let episodes = self
            .storage
            .get_item(CACHE_KEY)
            .and_then(|json| serde_json::from_str(&json).ok());

        if episodes.is_none() {
            self.clear();
        }
        episodes
    }

    /// Replace the snapshot with `episodes`, stamped `now`
    pub fn store(&self, episodes: &[Episode], now: DateTime<Utc>) -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(episodes)?;

        self.storage.set_item(CACHE_KEY, json);
        self.storage
            .set_item(CACHE_TIMESTAMP_KEY, now.timestamp_millis().to_string());
        Ok(())
    }

    pub fn clear(&self) {
        self.storage.remove_item(CACHE_KEY);
        self.storage.remove_item(CACHE_TIMESTAMP_KEY);
    }
}
