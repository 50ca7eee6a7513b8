// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::{ListenBehaviour, SiteConfig};

use super::share::share_row;
use super::view::EpisodeView;
use super::{escape_attr, escape_text};

/// What the card's listen control points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenAffordance {
    /// Link to the generated episode page
    EpisodePage,
    /// Button carrying the platform links for the choice modal
    PlatformModal,
    /// Link straight to the episode on Spotify
    DirectLink,
}

impl From<ListenBehaviour> for ListenAffordance {
    fn from(behaviour: ListenBehaviour) -> Self {
        match behaviour {
            ListenBehaviour::PlatformModal => ListenAffordance::PlatformModal,
            ListenBehaviour::DirectLink => ListenAffordance::DirectLink,
        }
    }
}

/// Render one episode card for a grid
pub fn render_card(view: &EpisodeView, listen: ListenAffordance, config: &SiteConfig) -> String {
    let url = escape_attr(&view.url);

    format!(
        r#"<div class="episode-card" data-category="{category}">
    <h3 class="episode-title"><a href="{url}">{title}</a></h3>
    <p class="episode-summary">{summary}</p>
    <div class="episode-actions">
        {share}
        {listen}
    </div>
</div>"#,
        category = escape_attr(&view.categories.join(" ")),
        title = escape_text(&view.title),
        summary = escape_text(&view.card_summary),
        share = share_row(&config.share_platforms, &view.url, &view.title),
        listen = listen_control(view, listen, config, &url),
    )
}

fn listen_control(
    view: &EpisodeView,
    listen: ListenAffordance,
    config: &SiteConfig,
    page_url: &str,
) -> String {
    match listen {
        ListenAffordance::EpisodePage => format!(
            r#"<a href="{page_url}" class="listen-button">Details ansehen &amp; anhören</a>"#
        ),
        ListenAffordance::PlatformModal => format!(
            r#"<button type="button" class="listen-button" data-spotify-url="{}" data-apple-url="{}" data-youtube-url="{}">Jetzt anhören</button>"#,
            escape_attr(&view.spotify_url),
            escape_attr(&config.platforms.apple),
            escape_attr(&config.platforms.youtube),
        ),
        ListenAffordance::DirectLink => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="listen-button">Jetzt anhören</a>"#,
            escape_attr(&view.spotify_url),
        ),
    }
}

/// Plain linked list of every episode, for crawlers
pub fn seo_list(views: &[EpisodeView]) -> String {
    let items: String = views
        .iter()
        .map(|view| {
            format!(
                "\n    <li><a href=\"{}\">{}</a></li>",
                escape_attr(&view.url),
                escape_text(&view.title)
            )
        })
        .collect();

    format!("<ul class=\"seo-episode-list\">{items}\n</ul>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Episode;

    fn make_view(title: &str) -> EpisodeView {
        let episode = Episode {
            title: title.to_string(),
            description: Some("Kurze Beschreibung".to_string()),
            link: Some("https://open.spotify.com/episode/xyz".to_string()),
            ..Default::default()
        };
        EpisodeView::new(&episode, &SiteConfig::default())
    }

    #[test]
    fn static_card_links_to_episode_page() {
        let config = SiteConfig::default();
        let card = render_card(&make_view("Schlaf #3"), ListenAffordance::EpisodePage, &config);

        assert!(card.contains(r#"data-category="Schlaf""#));
        assert!(card.contains(r#"<a href="https://www.wissens-akku.com/episoden/schlaf-3.html" class="listen-button">"#));
        assert!(card.contains("Kurze Beschreibung"));
        assert!(card.contains("share-facebook"));
    }

    #[test]
    fn modal_card_carries_platform_links() {
        let config = SiteConfig::default();
        let card = render_card(&make_view("Folge"), ListenAffordance::PlatformModal, &config);

        assert!(card.contains(r#"data-spotify-url="https://open.spotify.com/episode/xyz""#));
        assert!(card.contains(&format!(r#"data-apple-url="{}""#, config.platforms.apple)));
        assert!(card.contains(&format!(r#"data-youtube-url="{}""#, config.platforms.youtube)));
        assert!(card.contains("<button"));
    }

    #[test]
    fn direct_link_card_opens_spotify() {
        let config = SiteConfig::default();
        let card = render_card(&make_view("Folge"), ListenAffordance::DirectLink, &config);

        assert!(card.contains(r#"<a href="https://open.spotify.com/episode/xyz" target="_blank""#));
        assert!(!card.contains("<button"));
    }

    #[test]
    fn card_escapes_title_markup() {
        let config = SiteConfig::default();
        let view = make_view("<script>x</script>");
        let card = render_card(&view, ListenAffordance::EpisodePage, &config);

        assert!(!card.contains("<script>"));
        assert!(card.contains("&lt;script&gt;"));
    }

    #[test]
    fn listen_behaviour_maps_to_affordance() {
        assert_eq!(
            ListenAffordance::from(ListenBehaviour::PlatformModal),
            ListenAffordance::PlatformModal
        );
        assert_eq!(
            ListenAffordance::from(ListenBehaviour::DirectLink),
            ListenAffordance::DirectLink
        );
    }

    #[test]
    fn seo_list_links_every_episode() {
        let list = seo_list(&[make_view("Eins"), make_view("Zwei")]);

        assert!(list.contains(r#"<li><a href="https://www.wissens-akku.com/episoden/eins.html">Eins</a></li>"#));
        assert!(list.contains(">Zwei</a>"));
    }
}
