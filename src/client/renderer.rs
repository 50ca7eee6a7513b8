// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;

use super::cache::SessionStorage;
use super::consent::ConsentProvider;
use super::grid::EpisodeGrid;
use super::loader::{DataOrigin, EpisodeLoader, InfoBanner};
use super::modal::{ListenAction, ListenLinks, ModalEvent, PlatformModal, listen_action};
use super::source::EpisodeSource;

/// The episode list page as the browser sees it: banner, grid and the
/// lazily mounted platform modal
pub struct EpisodeRenderer<S, P, T> {
    loader: EpisodeLoader<S, P, T>,
    config: SiteConfig,
    banner: InfoBanner,
    grid: EpisodeGrid,
    modal: PlatformModal,
    body: String,
}

impl<S, P, T> EpisodeRenderer<S, P, T>
where
    S: EpisodeSource,
    P: ConsentProvider,
    T: SessionStorage,
{
    pub fn new(loader: EpisodeLoader<S, P, T>, config: SiteConfig) -> Self {
        Self {
            loader,
            config,
            banner: InfoBanner::new(),
            grid: EpisodeGrid::new(),
            modal: PlatformModal::new(),
            body: String::new(),
        }
    }

    /// Acquire the episodes and fill the grid
    pub async fn render(&mut self, now: DateTime<Utc>) -> DataOrigin {
        let outcome = self.loader.load(&mut self.banner, now).await;
        self.grid.render(&outcome.episodes, &self.config);
        outcome.origin
    }

    /// A card's listen control was activated
    pub fn activate_listen(&mut self, links: ListenLinks) -> ListenAction {
        let action = listen_action(self.config.listen_behaviour, links);
        if let ListenAction::ShowModal(links) = &action {
            self.modal
                .handle(ModalEvent::ListenActivated(links.clone()), &mut self.body);
        }
        action
    }

    pub fn dismiss_modal(&mut self, event: ModalEvent) {
        self.modal.handle(event, &mut self.body);
    }

    pub fn banner(&self) -> &InfoBanner {
        &self.banner
    }

    pub fn grid(&self) -> &EpisodeGrid {
        &self.grid
    }

    pub fn modal(&self) -> &PlatformModal {
        &self.modal
    }

    /// Markup appended to the page body (the modal, once mounted)
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn loader(&self) -> &EpisodeLoader<S, P, T> {
        &self.loader
    }
}
