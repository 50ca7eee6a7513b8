// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! URL-safe identifiers for episode titles.
//!
//! This is the only slug algorithm in the crate. The static generator, the
//! sitemap and the client-side cards all go through [`slugify`], so a link
//! produced by one of them always resolves to a page written by another.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Stem used for an episode page whose title slugifies to nothing
const EMPTY_SLUG_STEM: &str = "episode";

/// Turn an episode title into a URL-safe slug.
///
/// German umlauts and ß are transliterated first (`ä` → `ae`), every other
/// accented Latin letter loses its diacritics. The result only contains
/// lowercase ASCII word characters and single hyphens, never a leading or
/// trailing hyphen.
pub fn slugify(title: &str) -> String {
    let folded: String = transliterate_german(title)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let lowered = folded.to_lowercase();
    let hyphenated = hyphenate_whitespace(lowered.trim());

    let word_chars: String = hyphenated
        .chars()
        .filter(|c| is_word_char(*c) || *c == '-')
        .collect();

    collapse_hyphens(&word_chars)
}

/// File stem for an episode page.
///
/// Empty slugs still need a valid path, so they map to a fixed stem. Every
/// untitled episode therefore shares one page (last write wins).
pub fn page_stem(slug: &str) -> &str {
    if slug.is_empty() { EMPTY_SLUG_STEM } else { slug }
}

fn transliterate_german(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            'ß' => out.push_str("ss"),
            'ẞ' => out.push_str("SS"),
            other => out.push(other),
        }
    }

    out
}

/// ASCII word characters, matching `\w` in a non-unicode regex
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replace every run of whitespace with a single hyphen
fn hyphenate_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                result.push('-');
                in_whitespace = true;
            }
        } else {
            result.push(c);
            in_whitespace = false;
        }
    }

    result
}

/// Collapse hyphen runs and strip them from both ends
fn collapse_hyphens(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last_was_hyphen = false;

    for c in s.chars() {
        if c == '-' {
            if !last_was_hyphen {
                result.push('-');
            }
            last_was_hyphen = true;
        } else {
            result.push(c);
            last_was_hyphen = false;
        }
    }

    result.trim_matches('-').to_string()
}
