// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::error::BuildError;
use crate::progress::{ProgressEvent, SharedProgressReporter};

use super::generate::SiteArtifacts;

pub const SITEMAP_FILENAME: &str = "sitemap.xml";

const PARTIAL_SUFFIX: &str = "partial";

/// Outcome of writing a generated site to disk
#[derive(Debug, Clone, Default)]
pub struct WriteSummary {
    pub episode_pages: usize,
    /// Episode pages from earlier builds with no episode any more. They are
    /// reported, never deleted.
    pub stale_pages: Vec<PathBuf>,
}

/// Write all artifacts below `output_dir`.
///
/// Layout: `<list_page>`, `<episodes_dir>/<slug>.html` and `sitemap.xml`.
/// Each file goes through a temporary sibling and a rename.
pub fn write_site(
    artifacts: &SiteArtifacts,
    output_dir: &Path,
    config: &SiteConfig,
    reporter: &SharedProgressReporter,
) -> Result<WriteSummary, BuildError> {
    let episodes_dir = output_dir.join(&config.episodes_dir);
    create_dir(&episodes_dir)?;

    let stale_pages = find_stale_pages(&episodes_dir, artifacts);
    if !stale_pages.is_empty() {
        reporter.report(ProgressEvent::StalePagesDetected {
            paths: stale_pages.clone(),
        });
    }

    for (file_name, html) in &artifacts.episode_pages {
        let path = episodes_dir.join(file_name);
        write_atomic(&path, html)?;
        reporter.report(ProgressEvent::PageWritten { path });
    }

    let list_path = output_dir.join(&config.list_page);
    write_atomic(&list_path, &artifacts.list_page)?;
    reporter.report(ProgressEvent::PageWritten { path: list_path });

    let sitemap_path = output_dir.join(SITEMAP_FILENAME);
    write_atomic(&sitemap_path, &artifacts.sitemap)?;
    reporter.report(ProgressEvent::SitemapWritten {
        path: sitemap_path,
        entries: artifacts.sitemap.matches("<url>").count(),
    });

    Ok(WriteSummary {
        episode_pages: artifacts.episode_pages.len(),
        stale_pages,
    })
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
    std::fs::create_dir_all(path).map_err(|e| BuildError::CreateDirectoryFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write `content` to a `.partial` sibling and rename it over `path`
fn write_atomic(path: &Path, content: &str) -> Result<(), BuildError> {
    let partial = path.with_extension(match path.extension() {
        Some(ext) => format!("{}.{PARTIAL_SUFFIX}", ext.to_string_lossy()),
        None => PARTIAL_SUFFIX.to_string(),
    });

    std::fs::write(&partial, content).map_err(|e| BuildError::WriteFailed {
        path: partial.clone(),
        source: e,
    })?;

    std::fs::rename(&partial, path).map_err(|e| {
        let _ = std::fs::remove_file(&partial);
        BuildError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// `.html` files in the episode directory that this build does not produce
fn find_stale_pages(episodes_dir: &Path, artifacts: &SiteArtifacts) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(episodes_dir) else {
        return vec![];
    };

    let mut stale: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
        .filter(|path| {
            path.file_name()
                .map(|name| !artifacts.episode_pages.contains_key(&*name.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();

    stale.sort();
    stale
}
