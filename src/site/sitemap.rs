// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveDate;

use super::escape_text;

/// One `<url>` entry of the sitemap
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: String,
    pub priority: f32,
}

impl SitemapEntry {
    pub fn new(
        loc: impl Into<String>,
        lastmod: NaiveDate,
        changefreq: &str,
        priority: f32,
    ) -> Self {
        Self {
            loc: loc.into(),
            lastmod,
            changefreq: changefreq.to_string(),
            priority,
        }
    }
}

/// Render a sitemaps.org `urlset` document
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_text(&entry.loc),
            entry.lastmod.format("%Y-%m-%d"),
            escape_text(&entry.changefreq),
            entry.priority,
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}
