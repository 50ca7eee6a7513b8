// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::LoadError;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::store::{Episode, sort_newest_first};

use super::cache::{EpisodeCache, SessionStorage};
use super::consent::ConsentProvider;
use super::source::EpisodeSource;

pub const NO_CONSENT_MESSAGE: &str = "Die angezeigten Folgen sind eventuell nicht die neusten. Akzeptiere Marketing-Cookies, um die aktuellsten Episoden zu sehen.";
pub const LIVE_FAILED_MESSAGE: &str =
    "Die neuesten Folgen konnten nicht geladen werden. Anzeige aus dem Cache.";
pub const LOAD_FAILED_MESSAGE: &str =
    "Episoden konnten nicht geladen werden. Bitte versuche es später erneut.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: &'static str,
}

/// The notice above the grid explaining degraded data
#[derive(Debug, Default)]
pub struct InfoBanner {
    current: Option<Banner>,
}

impl InfoBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, kind: BannerKind, message: &'static str) {
        self.current = Some(Banner { kind, message });
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn render(&self) -> String {
        match &self.current {
            None => r#"<div id="episode-update-info" class="hidden"></div>"#.to_string(),
            Some(banner) => {
                let class = match banner.kind {
                    BannerKind::Info => "banner-info",
                    BannerKind::Error => "banner-error",
                };
                format!(
                    r#"<div id="episode-update-info" class="{class}"><p>{}</p></div>"#,
                    html_escape::encode_text(banner.message)
                )
            }
        }
    }
}

/// Which step of the acquisition chain produced the episodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Cache,
    Live,
    Local,
    /// Every step failed
    Unavailable,
}

impl DataOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataOrigin::Cache => "cache",
            DataOrigin::Live => "live",
            DataOrigin::Local => "local",
            DataOrigin::Unavailable => "unavailable",
        }
    }
}

/// Episodes obtained by [`EpisodeLoader::load`], newest first
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub episodes: Vec<Episode>,
    pub origin: DataOrigin,
}

/// Acquires the episode list: fresh cache, then the live proxy when consent
/// allows, then the bundled store. Never fails; the banner tells the
/// visitor when the data may be stale or missing.
pub struct EpisodeLoader<S, P, T> {
    source: S,
    consent: P,
    cache: EpisodeCache<T>,
    live_timeout: Duration,
    reporter: SharedProgressReporter,
}

impl<S, P, T> EpisodeLoader<S, P, T>
where
    S: EpisodeSource,
    P: ConsentProvider,
    T: SessionStorage,
{
    pub fn new(
        source: S,
        consent: P,
        cache: EpisodeCache<T>,
        live_timeout: Duration,
        reporter: SharedProgressReporter,
    ) -> Self {
        Self {
            source,
            consent,
            cache,
            live_timeout,
            reporter,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &EpisodeCache<T> {
        &self.cache
    }

    pub async fn load(&self, banner: &mut InfoBanner, now: DateTime<Utc>) -> LoadOutcome {
        if let Some(episodes) = self.cache.fresh(now) {
            return self.finish(episodes, DataOrigin::Cache);
        }

        if self.consent.allows_live_fetch() {
            match self.fetch_live().await {
                Ok(mut episodes) => {
                    banner.hide();
                    sort_newest_first(&mut episodes);
                    if let Err(e) = self.cache.store(&episodes, now) {
                        self.report_failure("cache", e.to_string());
                    }
                    return self.finish(episodes, DataOrigin::Live);
                }
                Err(e) => {
                    self.report_failure("live", e.to_string());
                    banner.show(BannerKind::Error, LIVE_FAILED_MESSAGE);
                }
            }
        } else {
            banner.show(BannerKind::Info, NO_CONSENT_MESSAGE);
        }

        match self.source.fetch_local().await {
            Ok(document) => self.finish(document.items, DataOrigin::Local),
            Err(e) => {
                self.report_failure("local", e.to_string());
                banner.show(BannerKind::Error, LOAD_FAILED_MESSAGE);
                self.finish(Vec::new(), DataOrigin::Unavailable)
            }
        }
    }

    /// The live request, abandoned once the timeout fires. Dropping the
    /// request future cancels it, so a late response has no effect.
    async fn fetch_live(&self) -> Result<Vec<Episode>, LoadError> {
        let document = tokio::time::timeout(self.live_timeout, self.source.fetch_live())
            .await
            .map_err(|_| LoadError::Timeout {
                url: self.source.live_url().to_string(),
                after: self.live_timeout,
            })??;

        Ok(document.items)
    }

    fn finish(&self, mut episodes: Vec<Episode>, origin: DataOrigin) -> LoadOutcome {
        sort_newest_first(&mut episodes);

        self.reporter.report(ProgressEvent::EpisodesLoaded {
            origin: origin.as_str(),
            episodes: episodes.len(),
        });

        LoadOutcome { episodes, origin }
    }

    fn report_failure(&self, stage: &'static str, error: String) {
        self.reporter
            .report(ProgressEvent::EpisodeSourceFailed { stage, error });
    }
}
