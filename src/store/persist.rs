// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

use super::document::FeedDocument;

/// Suffix of the temporary file a save goes through before being renamed
const PARTIAL_SUFFIX: &str = ".partial";

/// The on-disk episode store: a single JSON document
#[derive(Debug, Clone)]
pub struct EpisodeStore {
    path: PathBuf,
}

impl EpisodeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Replace the stored document.
    ///
    /// The JSON is written next to the target and renamed over it, so a
    /// concurrent reader sees either the old or the new document.
    pub fn save(&self, document: &FeedDocument) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::WriteFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let partial = partial_path(&self.path);
        std::fs::write(&partial, json).map_err(|e| StoreError::WriteFailed {
            path: partial.clone(),
            source: e,
        })?;

        std::fs::rename(&partial, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&partial);
            StoreError::WriteFailed {
                path: self.path.clone(),
                source: e,
            }
        })
    }

    /// Read the stored document
    pub fn load(&self) -> Result<FeedDocument, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(self.path.clone()),
            _ => StoreError::ReadFailed {
                path: self.path.clone(),
                source: e,
            },
        })?;

        serde_json::from_str(&content).map_err(|e| StoreError::JsonParseFailed {
            path: self.path.clone(),
            source: e,
        })
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Episode, FeedMetadata};
    use tempfile::tempdir;

    fn make_document() -> FeedDocument {
        FeedDocument::ok(
            FeedMetadata {
                url: "https://example.com/feed.xml".to_string(),
                title: "Test Podcast".to_string(),
                ..Default::default()
            },
            vec![Episode {
                title: "Folge 1".to_string(),
                ..Default::default()
            }],
        )
    }

    #[test]
    fn save_then_load_returns_document() {
        let dir = tempdir().unwrap();
        let store = EpisodeStore::new(dir.path().join("assets/js/episodes.json"));

        store.save(&make_document()).unwrap();

        assert!(store.exists());
        assert_eq!(store.load().unwrap(), make_document());
    }

    #[test]
    fn save_leaves_no_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("episodes.json");
        let store = EpisodeStore::new(&path);

        store.save(&make_document()).unwrap();

        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn save_replaces_previous_document() {
        let dir = tempdir().unwrap();
        let store = EpisodeStore::new(dir.path().join("episodes.json"));

        store.save(&make_document()).unwrap();
        let empty = FeedDocument::ok(FeedMetadata::default(), vec![]);
        store.save(&empty).unwrap();

        assert!(store.load().unwrap().items.is_empty());
    }

    #[test]
    fn load_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = EpisodeStore::new(dir.path().join("missing.json"));

        assert!(matches!(store.load(), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn load_invalid_json_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("episodes.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = EpisodeStore::new(&path).load();
        assert!(matches!(result, Err(StoreError::JsonParseFailed { .. })));
    }
}
