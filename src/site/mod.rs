// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static page generation: list page, episode pages and sitemap.

mod card;
mod generate;
mod page;
mod share;
mod sitemap;
pub mod template;
mod view;
mod write;

use std::borrow::Cow;
use std::path::Path;

use chrono::NaiveDate;

pub use card::{ListenAffordance, render_card, seo_list};
pub use generate::{LIST_REQUIRED, SiteArtifacts, SiteTemplates, generate, page_file_name};
pub use page::{EPISODE_REQUIRED, json_ld, render_episode_page};
pub use share::{share_row, share_section};
pub use sitemap::{SitemapEntry, render_sitemap};
pub use template::{Field, Template};
pub use view::EpisodeView;
pub use write::{SITEMAP_FILENAME, WriteSummary, write_site};

use crate::config::SiteConfig;
use crate::error::BuildError;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::store::EpisodeStore;

/// Load the episode store, render the site and write it to `output_dir`.
///
/// Nothing is written unless every page rendered.
pub fn build_site(
    store: &EpisodeStore,
    templates: &SiteTemplates,
    output_dir: &Path,
    config: &SiteConfig,
    generated_on: NaiveDate,
    reporter: &SharedProgressReporter,
) -> Result<WriteSummary, BuildError> {
    let document = store.load()?;
    let artifacts = generate(&document, templates, config, generated_on, reporter)?;
    let summary = write_site(&artifacts, output_dir, config, reporter)?;

    reporter.report(ProgressEvent::BuildCompleted {
        episode_pages: summary.episode_pages,
        list_cards: artifacts.card_count,
    });

    Ok(summary)
}

/// Escape for HTML text and double-quoted attribute values
pub(crate) fn escape_attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Escape for HTML (and XML) text content
pub(crate) fn escape_text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}
