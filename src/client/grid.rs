// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::SiteConfig;
use crate::site::{EpisodeView, ListenAffordance, render_card};
use crate::store::{Episode, sort_newest_first};

/// Placeholder shown until the first render
pub const LOADING_SPINNER: &str =
    r#"<div class="episode-grid-loading"><div class="spinner"></div></div>"#;

/// Shown when there is nothing to list
pub const EMPTY_STATE: &str =
    r#"<div class="episode-grid-empty"><p>Keine Episoden gefunden.</p></div>"#;

/// The card grid on the episode list page
#[derive(Debug, Clone)]
pub struct EpisodeGrid {
    content: String,
    cards: usize,
}

impl Default for EpisodeGrid {
    fn default() -> Self {
        Self {
            content: LOADING_SPINNER.to_string(),
            cards: 0,
        }
    }
}

impl EpisodeGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything in the grid, spinner included, with one card per
    /// episode, newest first
    pub fn render(&mut self, episodes: &[Episode], config: &SiteConfig) {
        let mut episodes: Vec<Episode> = episodes
            .iter()
            .filter(|episode| !config.only_full_episodes || episode.is_full_episode())
            .cloned()
            .collect();
        sort_newest_first(&mut episodes);

        self.cards = episodes.len();
        if episodes.is_empty() {
            self.content = EMPTY_STATE.to_string();
            return;
        }

        let listen = ListenAffordance::from(config.listen_behaviour);
        self.content = episodes
            .iter()
            .map(|episode| render_card(&EpisodeView::new(episode, config), listen, config))
            .collect::<Vec<_>>()
            .join("\n");
    }

    pub fn html(&self) -> &str {
        &self.content
    }

    pub fn card_count(&self) -> usize {
        self.cards
    }

    pub fn is_loading(&self) -> bool {
        self.content == LOADING_SPINNER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListenBehaviour;
    use crate::store::ItunesInfo;

    fn episode(title: &str, date: &str) -> Episode {
        Episode {
            title: title.to_string(),
            pub_date: Some(date.to_string()),
            description: Some(format!("Worum es in {title} geht")),
            ..Default::default()
        }
    }

    #[test]
    fn starts_with_spinner() {
        let grid = EpisodeGrid::new();
        assert!(grid.is_loading());
        assert_eq!(grid.card_count(), 0);
    }

    #[test]
    fn render_replaces_spinner_with_sorted_cards() {
        let mut grid = EpisodeGrid::new();
        let episodes = vec![
            episode("Schlaf #1", "Mon, 01 Jan 2024 12:00:00 +0000"),
            episode("Schlaf #2", "Mon, 01 Apr 2024 12:00:00 +0000"),
        ];

        grid.render(&episodes, &SiteConfig::default());

        assert!(!grid.is_loading());
        assert!(!grid.html().contains("spinner"));
        assert_eq!(grid.card_count(), 2);

        let newer = grid.html().find("Schlaf #2").unwrap();
        let older = grid.html().find("Schlaf #1").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn cards_follow_listen_behaviour() {
        let episodes = vec![episode("Folge", "Mon, 01 Jan 2024 12:00:00 +0000")];

        let mut grid = EpisodeGrid::new();
        grid.render(&episodes, &SiteConfig::default());
        assert!(grid.html().contains("data-apple-url"));

        let config = SiteConfig {
            listen_behaviour: ListenBehaviour::DirectLink,
            ..Default::default()
        };
        grid.render(&episodes, &config);
        assert!(!grid.html().contains("data-apple-url"));
        assert!(grid.html().contains(r#"rel="noopener noreferrer" class="listen-button""#));
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let mut grid = EpisodeGrid::new();
        grid.render(&[], &SiteConfig::default());

        assert_eq!(grid.html(), EMPTY_STATE);
        assert_eq!(grid.card_count(), 0);
    }

    #[test]
    fn trailers_are_left_out() {
        let mut trailer = episode("Trailer", "Mon, 01 Jan 2024 12:00:00 +0000");
        trailer.itunes = Some(ItunesInfo {
            episode_type: Some("trailer".to_string()),
            ..Default::default()
        });

        let mut grid = EpisodeGrid::new();
        grid.render(&[trailer], &SiteConfig::default());

        assert_eq!(grid.html(), EMPTY_STATE);
    }

    #[test]
    fn rerender_clears_previous_cards() {
        let mut grid = EpisodeGrid::new();
        grid.render(
            &[episode("Erste", "Mon, 01 Jan 2024 12:00:00 +0000")],
            &SiteConfig::default(),
        );
        grid.render(
            &[episode("Zweite", "Mon, 01 Jan 2024 12:00:00 +0000")],
            &SiteConfig::default(),
        );

        assert!(!grid.html().contains("Erste"));
        assert!(grid.html().contains("Zweite"));
    }
}
