// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The "listen on..." platform chooser.
//!
//! One modal per page. It is injected into the page body the first time a
//! listen control is activated and reused afterwards.

use crate::config::{ListenBehaviour, SiteConfig};
use crate::site::EpisodeView;

/// Element id of the injected modal
pub const MODAL_ID: &str = "platform-modal";

const MODAL_MARKUP: &str = r#"<div id="platform-modal" class="modal hidden" role="dialog" aria-modal="true">
    <div class="modal-panel">
        <button id="close-platform-modal" type="button" aria-label="Schließen">&times;</button>
        <h3>Hören auf...</h3>
        <div id="platform-links"></div>
    </div>
</div>"#;

/// Deep links offered for one episode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenLinks {
    pub spotify: String,
    pub apple: String,
    pub youtube: String,
}

impl ListenLinks {
    /// The episode's Spotify link (or the show page) plus the show pages on
    /// Apple Podcasts and YouTube
    pub fn for_episode(view: &EpisodeView, config: &SiteConfig) -> Self {
        Self {
            spotify: view.spotify_url.clone(),
            apple: config.platforms.apple.clone(),
            youtube: config.platforms.youtube.clone(),
        }
    }

    /// `(label, url)` for every non-empty link, in display order
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Spotify", self.spotify.as_str()),
            ("Apple Podcasts", self.apple.as_str()),
            ("YouTube", self.youtube.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Hidden,
    Visible,
}

/// User interactions the modal reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    /// A card's listen control was activated
    ListenActivated(ListenLinks),
    CloseButton,
    /// Click on the dimmed area around the panel
    Backdrop,
    /// A platform link was opened in a new tab
    PlatformSelected,
}

/// What activating a listen control does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenAction {
    ShowModal(ListenLinks),
    OpenUrl(String),
}

/// Resolve a listen activation according to the configured behaviour
pub fn listen_action(behaviour: ListenBehaviour, links: ListenLinks) -> ListenAction {
    match behaviour {
        ListenBehaviour::PlatformModal => ListenAction::ShowModal(links),
        ListenBehaviour::DirectLink => ListenAction::OpenUrl(links.spotify),
    }
}

#[derive(Debug)]
pub struct PlatformModal {
    mounted: bool,
    state: ModalState,
    links: ListenLinks,
}

impl Default for PlatformModal {
    fn default() -> Self {
        Self {
            mounted: false,
            state: ModalState::Hidden,
            links: ListenLinks::default(),
        }
    }
}

impl PlatformModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject the modal markup at the end of `body`.
    ///
    /// Idempotent: nothing is added when this modal, or any other, is already
    /// part of the page. Returns whether markup was injected.
    pub fn mount(&mut self, body: &mut String) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;

        if body.contains(&format!(r#"id="{MODAL_ID}""#)) {
            return false;
        }

        body.push_str(MODAL_MARKUP);
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn links(&self) -> &ListenLinks {
        &self.links
    }

    pub fn open(&mut self, links: ListenLinks) {
        self.links = links;
        self.state = ModalState::Visible;
    }

    pub fn close(&mut self) {
        self.state = ModalState::Hidden;
    }

    /// Apply a user interaction, mounting into `body` on first use
    pub fn handle(&mut self, event: ModalEvent, body: &mut String) {
        match event {
            ModalEvent::ListenActivated(links) => {
                self.mount(body);
                self.open(links);
            }
            ModalEvent::CloseButton | ModalEvent::Backdrop | ModalEvent::PlatformSelected => {
                self.close();
            }
        }
    }

    /// Markup for the `#platform-links` container
    pub fn render_links(&self) -> String {
        self.links
            .entries()
            .into_iter()
            .map(|(label, url)| {
                format!(
                    r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="platform-link" aria-label="Auf {label} anhören">{label}</a>"#,
                    html_escape::encode_double_quoted_attribute(url)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modal_count(body: &str) -> usize {
        body.matches(&format!(r#"id="{MODAL_ID}""#)).count()
    }

    fn links() -> ListenLinks {
        ListenLinks {
            spotify: "https://open.spotify.com/episode/abc".to_string(),
            apple: "https://podcasts.apple.com/de/podcast/x".to_string(),
            youtube: String::new(),
        }
    }

    #[test]
    fn mount_injects_once() {
        let mut body = "<main></main>".to_string();
        let mut modal = PlatformModal::new();

        assert!(modal.mount(&mut body));
        assert!(!modal.mount(&mut body));
        assert_eq!(modal_count(&body), 1);
    }

    #[test]
    fn second_modal_reuses_existing_markup() {
        let mut body = String::new();
        PlatformModal::new().mount(&mut body);

        let mut other = PlatformModal::new();
        assert!(!other.mount(&mut body));
        assert!(other.is_mounted());
        assert_eq!(modal_count(&body), 1);
    }

    #[test]
    fn first_listen_mounts_lazily_and_opens() {
        let mut body = String::new();
        let mut modal = PlatformModal::new();
        assert!(!modal.is_mounted());
        assert_eq!(modal.state(), ModalState::Hidden);

        modal.handle(ModalEvent::ListenActivated(links()), &mut body);

        assert!(modal.is_mounted());
        assert_eq!(modal.state(), ModalState::Visible);
        assert!(body.contains(MODAL_ID));
    }

    #[test]
    fn every_dismissal_hides_the_modal() {
        for dismissal in [
            ModalEvent::CloseButton,
            ModalEvent::Backdrop,
            ModalEvent::PlatformSelected,
        ] {
            let mut body = String::new();
            let mut modal = PlatformModal::new();

            modal.handle(ModalEvent::ListenActivated(links()), &mut body);
            modal.handle(dismissal, &mut body);

            assert_eq!(modal.state(), ModalState::Hidden);
        }

        let mut body = String::new();
        let mut modal = PlatformModal::new();
        modal.handle(ModalEvent::ListenActivated(links()), &mut body);
        modal.handle(ModalEvent::ListenActivated(ListenLinks::default()), &mut body);
        assert_eq!(modal.state(), ModalState::Visible);
        assert_eq!(modal_count(&body), 1);
    }

    #[test]
    fn only_non_empty_links_are_rendered() {
        let mut modal = PlatformModal::new();
        modal.open(links());

        let html = modal.render_links();
        assert!(html.contains("Spotify"));
        assert!(html.contains("Apple Podcasts"));
        assert!(!html.contains("YouTube"));
    }

    #[test]
    fn links_for_episode_fall_back_to_show_page() {
        let config = SiteConfig::default();
        let view = EpisodeView::new(&Default::default(), &config);

        let links = ListenLinks::for_episode(&view, &config);
        assert_eq!(links.spotify, config.platforms.spotify);
        assert_eq!(links.entries().len(), 3);
    }

    #[test]
    fn direct_link_skips_the_modal() {
        let action = listen_action(ListenBehaviour::DirectLink, links());
        assert_eq!(
            action,
            ListenAction::OpenUrl("https://open.spotify.com/episode/abc".to_string())
        );

        let action = listen_action(ListenBehaviour::PlatformModal, links());
        assert_eq!(action, ListenAction::ShowModal(links()));
    }
}
