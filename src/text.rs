// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plain-text helpers shared by the static generator and the client renderer.

use chrono::{DateTime, FixedOffset, Locale};

/// Parse a feed date, accepting RFC 2822 and a few common deviations
pub fn parse_date(date_str: &str) -> Option<DateTime<FixedOffset>> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc2822(date_str) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt);
    }

    let formats = [
        "%a, %d %b %Y %H:%M:%S %z",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%d %H:%M:%S %z",
    ];

    formats
        .iter()
        .find_map(|format| DateTime::parse_from_str(date_str, format).ok())
}

/// Long German date, e.g. `1. Januar 2024`
pub fn format_date_long(date: &DateTime<FixedOffset>) -> String {
    date.format_localized("%-d. %B %Y", Locale::de_DE).to_string()
}

/// Remove markup tags.
///
/// A `<` opens a tag only when a letter, `/`, `!` or `?` follows it; any
/// other `<` is kept as text. An unterminated tag swallows the rest of the
/// input.
pub fn strip_markup(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        match (in_tag, c) {
            (false, '<') if chars.peek().is_some_and(|&next| opens_tag(next)) => in_tag = true,
            (false, c) => result.push(c),
            (true, '>') => in_tag = false,
            (true, _) => {}
        }
    }

    result
}

fn opens_tag(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?')
}

/// Markup-free, entity-decoded text with whitespace runs collapsed
pub fn plain_text(html: &str) -> String {
    let stripped = strip_markup(html);
    let decoded = html_escape::decode_html_entities(&stripped);

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to at most `budget` characters, appending `ellipsis` when
/// anything was removed
pub fn truncate(text: &str, budget: usize, ellipsis: &str) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }

    let cut: String = text.chars().take(budget).collect();
    format!("{}{}", cut.trim_end(), ellipsis)
}

/// Derive categories from a `"<Category> #<n>"` title.
///
/// The text before the first `#` is split into capitalised words. Titles
/// without a marker, or whose prefix matches one of `excluded`
/// (case-insensitive), have no category.
pub fn title_categories(title: &str, excluded: &[String]) -> Vec<String> {
    let Some((prefix, _)) = title.trim().split_once('#') else {
        return vec![];
    };

    let prefix = prefix.trim();
    if prefix.is_empty() || excluded.iter().any(|e| e.eq_ignore_ascii_case(prefix)) {
        return vec![];
    }

    prefix.split_whitespace().map(capitalize).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
