// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use url::form_urlencoded::byte_serialize;

use crate::config::SharePlatform;

use super::escape_attr;

impl SharePlatform {
    pub fn label(&self) -> &'static str {
        match self {
            SharePlatform::Facebook => "Facebook",
            SharePlatform::WhatsApp => "WhatsApp",
            SharePlatform::Telegram => "Telegram",
            SharePlatform::X => "X",
            SharePlatform::LinkedIn => "LinkedIn",
        }
    }

    /// Sharing intent for a page, with every parameter URL-encoded
    pub fn share_url(&self, page_url: &str, title: &str) -> String {
        let url = encode(page_url);
        match self {
            SharePlatform::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={url}")
            }
            SharePlatform::WhatsApp => format!(
                "https://api.whatsapp.com/send?text={}",
                encode(&format!("{title} {page_url}"))
            ),
            SharePlatform::Telegram => {
                format!("https://t.me/share/url?url={url}&text={}", encode(title))
            }
            SharePlatform::X => format!(
                "https://twitter.com/intent/tweet?url={url}&text={}",
                encode(title)
            ),
            SharePlatform::LinkedIn => {
                format!("https://www.linkedin.com/sharing/share-offsite/?url={url}")
            }
        }
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Compact row of share links used on cards
pub fn share_row(platforms: &[SharePlatform], page_url: &str, title: &str) -> String {
    if platforms.is_empty() {
        return String::new();
    }

    let links: String = platforms
        .iter()
        .map(|platform| {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="share-link share-{}" aria-label="Auf {} teilen">{}</a>"#,
                escape_attr(&platform.share_url(page_url, title)),
                platform.label().to_lowercase(),
                platform.label(),
                platform.label(),
            )
        })
        .collect();

    format!(
        r#"<div class="share-row"><span class="share-heading">Teilen:</span>{links}</div>"#
    )
}

/// Share section injected into an episode page
pub fn share_section(platforms: &[SharePlatform], page_url: &str, title: &str) -> String {
    if platforms.is_empty() {
        return String::new();
    }

    let links: Vec<String> = platforms
        .iter()
        .map(|platform| {
            format!(
                r#"    <a href="{}" target="_blank" rel="noopener noreferrer" class="share-button share-{}"><span>{}</span></a>"#,
                escape_attr(&platform.share_url(page_url, title)),
                platform.label().to_lowercase(),
                platform.label(),
            )
        })
        .collect();

    format!(
        "<section id=\"share\" class=\"episode-share\">\n  <h2>Episode teilen:</h2>\n  <div class=\"share-buttons\">\n{}\n  </div>\n</section>",
        links.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://example.com/episoden/folge-1.html";

    #[test]
    fn share_urls_encode_parameters() {
        assert_eq!(
            SharePlatform::Facebook.share_url(PAGE, "Folge 1"),
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fexample.com%2Fepisoden%2Ffolge-1.html"
        );
        assert_eq!(
            SharePlatform::Telegram.share_url(PAGE, "Schlaf & Co"),
            "https://t.me/share/url?url=https%3A%2F%2Fexample.com%2Fepisoden%2Ffolge-1.html&text=Schlaf+%26+Co"
        );
        assert_eq!(
            SharePlatform::WhatsApp.share_url(PAGE, "Folge"),
            "https://api.whatsapp.com/send?text=Folge+https%3A%2F%2Fexample.com%2Fepisoden%2Ffolge-1.html"
        );
    }

    #[test]
    fn share_row_escapes_ampersands_in_href() {
        let row = share_row(&[SharePlatform::Telegram], PAGE, "Folge");

        assert!(row.contains("&amp;text=Folge"));
        assert!(row.contains("Auf Telegram teilen"));
    }

    #[test]
    fn empty_platform_list_renders_nothing() {
        assert_eq!(share_row(&[], PAGE, "x"), "");
        assert_eq!(share_section(&[], PAGE, "x"), "");
    }

    #[test]
    fn share_section_lists_every_platform() {
        let section = share_section(
            &[SharePlatform::Facebook, SharePlatform::X, SharePlatform::LinkedIn],
            PAGE,
            "Folge",
        );

        assert!(section.contains("share-facebook"));
        assert!(section.contains("share-x"));
        assert!(section.contains("share-linkedin"));
        assert!(section.contains("Episode teilen:"));
    }
}
