// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;

use crate::config::SiteConfig;
use crate::error::TemplateError;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::slug::page_stem;
use crate::store::{FeedDocument, sort_newest_first};

use super::card::{ListenAffordance, render_card, seo_list};
use super::page::{EPISODE_REQUIRED, render_episode_page};
use super::sitemap::{SitemapEntry, render_sitemap};
use super::template::{self, Field, Template};
use super::view::EpisodeView;

/// Placeholders every list template must contain
pub const LIST_REQUIRED: &[&str] = &[template::EPISODE_GRID];

/// The list-page and episode-page templates
#[derive(Debug, Clone)]
pub struct SiteTemplates {
    pub list: Template,
    pub episode: Template,
}

impl SiteTemplates {
    pub fn load(list_path: &Path, episode_path: &Path) -> Result<Self, TemplateError> {
        Ok(Self {
            list: Template::from_file(list_path)?,
            episode: Template::from_file(episode_path)?,
        })
    }

    /// Check both templates for their required placeholders
    pub fn validate(&self) -> Result<(), TemplateError> {
        self.list.require(LIST_REQUIRED)?;
        self.episode.require(EPISODE_REQUIRED)
    }
}

/// Everything a build produces, still in memory
#[derive(Debug, Clone, PartialEq)]
pub struct SiteArtifacts {
    pub list_page: String,
    /// Episode page HTML keyed by file name (`<slug>.html`)
    pub episode_pages: BTreeMap<String, String>,
    pub sitemap: String,
    /// Number of cards on the list page
    pub card_count: usize,
}

/// Render the list page, one page per episode and the sitemap.
///
/// Templates are validated before anything is rendered. Episodes with
/// broken fields are rendered with fallbacks instead of failing the build.
/// The output depends only on the inputs; `generated_on` is the one
/// time-dependent value (sitemap `lastmod` of non-episode pages).
pub fn generate(
    document: &FeedDocument,
    templates: &SiteTemplates,
    config: &SiteConfig,
    generated_on: NaiveDate,
    reporter: &SharedProgressReporter,
) -> Result<SiteArtifacts, TemplateError> {
    templates.validate()?;
    reporter.report(ProgressEvent::TemplatesValidated);

    let mut episodes: Vec<_> = document
        .items
        .iter()
        .filter(|episode| !config.only_full_episodes || episode.is_full_episode())
        .cloned()
        .collect();
    sort_newest_first(&mut episodes);

    let views: Vec<EpisodeView> = episodes
        .iter()
        .map(|episode| EpisodeView::new(episode, config))
        .collect();

    let mut episode_pages = BTreeMap::new();
    let mut cards = Vec::with_capacity(views.len());

    for view in &views {
        for reason in &view.degraded {
            reporter.report(ProgressEvent::EpisodeDegraded {
                episode_title: view.title.clone(),
                reason: reason.to_string(),
            });
        }

        let html = render_episode_page(&templates.episode, view, config)?;
        if episode_pages.insert(page_file_name(&view.slug), html).is_some() {
            reporter.report(ProgressEvent::SlugCollision {
                slug: view.slug.clone(),
                episode_title: view.title.clone(),
            });
        }

        cards.push(render_card(view, ListenAffordance::EpisodePage, config));
    }

    let list_page = templates.list.render(&[
        Field::required(template::EPISODE_GRID, cards.join("\n")),
        Field::optional(template::SEO_CONTENT, seo_list(&views)),
    ])?;

    Ok(SiteArtifacts {
        list_page,
        episode_pages,
        sitemap: render_sitemap(&sitemap_entries(&views, config, generated_on)),
        card_count: cards.len(),
    })
}

/// File name of the page generated for `slug`
pub fn page_file_name(slug: &str) -> String {
    format!("{}.html", page_stem(slug))
}

fn sitemap_entries(
    views: &[EpisodeView],
    config: &SiteConfig,
    generated_on: NaiveDate,
) -> Vec<SitemapEntry> {
    let mut entries = vec![
        SitemapEntry::new(config.home_url(), generated_on, "weekly", 1.0),
        SitemapEntry::new(config.list_page_url(), generated_on, "daily", 0.9),
    ];

    let mut seen = HashSet::new();
    for view in views {
        if seen.insert(view.url.as_str()) {
            let lastmod = view
                .published
                .map(|date| date.date_naive())
                .unwrap_or(generated_on);
            entries.push(SitemapEntry::new(view.url.clone(), lastmod, "monthly", 0.8));
        }
    }

    entries.extend(config.static_pages.iter().map(|page| {
        SitemapEntry::new(
            config.page_url(&page.path),
            generated_on,
            &page.changefreq,
            page.priority,
        )
    }));

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{NoopReporter, RecordingReporter};
    use crate::store::{Enclosure, Episode, FeedMetadata, ItunesInfo};
    use std::sync::Arc;

    const LIST_TEMPLATE: &str =
        "<main><div id=\"grid\"><!-- EPISODE-GRID-PLACEHOLDER --></div><noscript><!-- SEO-CONTENT-PLACEHOLDER --></noscript></main>";
    const EPISODE_TEMPLATE: &str = "<h1>%%EPISODE_TITEL%%</h1><time>%%EPISODE_DATUM%%</time><meta content=\"%%EPISODE_BESCHREIBUNG%%\"><link href=\"%%EPISODE_URL%%\"><img src=\"%%EPISODE_BILD_URL%%\"><audio src=\"%%EPISODE_AUDIO_URL%%\"></audio>%%EPISODE_INHALT%%<script>%%JSON_LD_SCHEMA%%</script>";

    fn templates() -> SiteTemplates {
        SiteTemplates {
            list: Template::new("list", LIST_TEMPLATE),
            episode: Template::new("episode", EPISODE_TEMPLATE),
        }
    }

    fn episode(title: &str, date: &str) -> Episode {
        Episode {
            title: title.to_string(),
            pub_date: Some(date.to_string()),
            description: Some(format!("Über {title}")),
            enclosure: Some(Enclosure {
                url: format!("https://example.com/{title}.mp3"),
                mime_type: Some("audio/mpeg".to_string()),
            }),
            ..Default::default()
        }
    }

    fn document() -> FeedDocument {
        FeedDocument::ok(
            FeedMetadata::default(),
            vec![
                episode("Mitte", "Thu, 01 Feb 2024 12:00:00 +0000"),
                episode("Alt", "Mon, 01 Jan 2024 12:00:00 +0000"),
                episode("Neu", "Fri, 01 Mar 2024 12:00:00 +0000"),
            ],
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn run(document: &FeedDocument) -> SiteArtifacts {
        generate(
            document,
            &templates(),
            &SiteConfig::default(),
            today(),
            &NoopReporter::shared(),
        )
        .unwrap()
    }

    #[test]
    fn renders_one_page_per_episode() {
        let artifacts = run(&document());

        let names: Vec<_> = artifacts.episode_pages.keys().cloned().collect();
        assert_eq!(names, vec!["alt.html", "mitte.html", "neu.html"]);
        assert_eq!(artifacts.card_count, 3);
        assert!(artifacts.episode_pages["neu.html"].contains("<h1>Neu</h1>"));
    }

    #[test]
    fn list_page_orders_newest_first() {
        let artifacts = run(&document());
        let list = &artifacts.list_page;

        let neu = list.find("episoden/neu.html").unwrap();
        let mitte = list.find("episoden/mitte.html").unwrap();
        let alt = list.find("episoden/alt.html").unwrap();
        assert!(neu < mitte && mitte < alt);
        assert!(!list.contains("EPISODE-GRID-PLACEHOLDER"));
        assert!(list.contains("seo-episode-list"));
    }

    #[test]
    fn generation_is_idempotent() {
        assert_eq!(run(&document()), run(&document()));
    }

    #[test]
    fn sitemap_lists_home_list_episodes_and_static_pages() {
        let artifacts = run(&document());
        let sitemap = &artifacts.sitemap;

        assert_eq!(sitemap.matches("<url>").count(), 2 + 3 + 2);
        assert!(sitemap.contains("<loc>https://www.wissens-akku.com/</loc>"));
        assert!(sitemap.contains("<loc>https://www.wissens-akku.com/episoden.html</loc>"));
        assert!(sitemap.contains("<loc>https://www.wissens-akku.com/impressum.html</loc>"));
        assert!(sitemap.contains("<lastmod>2024-03-01</lastmod>"));
        assert!(sitemap.contains("<lastmod>2024-03-15</lastmod>"));
    }

    #[test]
    fn skips_trailers_when_configured() {
        let mut doc = document();
        doc.items[0].itunes = Some(ItunesInfo {
            episode_type: Some("trailer".to_string()),
            ..Default::default()
        });

        let artifacts = run(&doc);
        assert!(!artifacts.episode_pages.contains_key("mitte.html"));

        let config = SiteConfig {
            only_full_episodes: false,
            ..Default::default()
        };
        let artifacts =
            generate(&doc, &templates(), &config, today(), &NoopReporter::shared()).unwrap();
        assert!(artifacts.episode_pages.contains_key("mitte.html"));
    }

    #[test]
    fn malformed_episode_is_rendered_with_fallbacks() {
        let mut doc = document();
        doc.items.push(Episode {
            title: "Kaputt".to_string(),
            pub_date: Some("kein Datum".to_string()),
            ..Default::default()
        });

        let reporter = Arc::new(RecordingReporter::default());
        let shared: SharedProgressReporter = reporter.clone();
        let artifacts =
            generate(&doc, &templates(), &SiteConfig::default(), today(), &shared).unwrap();

        let page = &artifacts.episode_pages["kaputt.html"];
        assert!(page.contains(&SiteConfig::default().default_image));
        assert!(page.contains("<audio src=\"\">"));

        let events = reporter.events.lock().unwrap();
        let degraded = events
            .iter()
            .filter(|e| {
                matches!(e, ProgressEvent::EpisodeDegraded { episode_title, .. }
                    if episode_title == "Kaputt")
            })
            .count();
        assert_eq!(degraded, 2);
    }

    #[test]
    fn colliding_slugs_keep_last_page_and_report() {
        let doc = FeedDocument::ok(
            FeedMetadata::default(),
            vec![
                episode("Schlaf!", "Fri, 01 Mar 2024 12:00:00 +0000"),
                episode("Schlaf?", "Mon, 01 Jan 2024 12:00:00 +0000"),
            ],
        );

        let reporter = Arc::new(RecordingReporter::default());
        let shared: SharedProgressReporter = reporter.clone();
        let artifacts =
            generate(&doc, &templates(), &SiteConfig::default(), today(), &shared).unwrap();

        assert_eq!(artifacts.episode_pages.len(), 1);
        assert!(artifacts.episode_pages["schlaf.html"].contains("Schlaf?"));
        assert_eq!(artifacts.card_count, 2);
        assert_eq!(artifacts.sitemap.matches("episoden/schlaf.html").count(), 1);

        let events = reporter.events.lock().unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, ProgressEvent::SlugCollision { slug, .. } if slug == "schlaf")));
    }

    #[test]
    fn missing_grid_placeholder_fails_before_rendering() {
        let templates = SiteTemplates {
            list: Template::new("list", "<main></main>"),
            episode: Template::new("episode", EPISODE_TEMPLATE),
        };

        let result = generate(
            &document(),
            &templates,
            &SiteConfig::default(),
            today(),
            &NoopReporter::shared(),
        );

        assert!(matches!(
            result,
            Err(TemplateError::MissingPlaceholder { placeholder, .. })
                if placeholder == template::EPISODE_GRID
        ));
    }

    #[test]
    fn empty_store_still_renders_list_page() {
        let artifacts = run(&FeedDocument::ok(FeedMetadata::default(), vec![]));

        assert!(artifacts.episode_pages.is_empty());
        assert_eq!(artifacts.list_page.matches("episode-card").count(), 0);
        assert_eq!(artifacts.sitemap.matches("<url>").count(), 4);
    }
}
