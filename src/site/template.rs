// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placeholder substitution for the HTML templates.
//!
//! Templates are plain HTML with named tokens (`%%EPISODE_TITEL%%`) and
//! comment markers for whole blocks (`<!-- EPISODE-GRID-PLACEHOLDER -->`).

use std::path::Path;

use crate::error::TemplateError;

pub const EPISODE_GRID: &str = "<!-- EPISODE-GRID-PLACEHOLDER -->";
pub const SEO_CONTENT: &str = "<!-- SEO-CONTENT-PLACEHOLDER -->";
pub const SHARE_BUTTONS: &str = "<!-- SHARE-BUTTONS-PLACEHOLDER -->";

pub const EPISODE_TITLE: &str = "%%EPISODE_TITEL%%";
pub const EPISODE_DATE: &str = "%%EPISODE_DATUM%%";
pub const EPISODE_DESCRIPTION: &str = "%%EPISODE_BESCHREIBUNG%%";
pub const EPISODE_URL: &str = "%%EPISODE_URL%%";
pub const EPISODE_IMAGE_URL: &str = "%%EPISODE_BILD_URL%%";
pub const EPISODE_AUDIO_URL: &str = "%%EPISODE_AUDIO_URL%%";
pub const EPISODE_CONTENT: &str = "%%EPISODE_INHALT%%";
pub const JSON_LD_SCHEMA: &str = "%%JSON_LD_SCHEMA%%";

/// A value to substitute for a placeholder
#[derive(Debug, Clone)]
pub struct Field {
    pub placeholder: &'static str,
    pub value: String,
    /// Rendering fails when a required placeholder is absent from the template
    pub required: bool,
}

impl Field {
    pub fn required(placeholder: &'static str, value: impl Into<String>) -> Self {
        Self {
            placeholder,
            value: value.into(),
            required: true,
        }
    }

    pub fn optional(placeholder: &'static str, value: impl Into<String>) -> Self {
        Self {
            placeholder,
            value: value.into(),
            required: false,
        }
    }
}

/// An HTML template with named placeholders
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Read a template file; its file name becomes the template name
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|e| TemplateError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fail on the first placeholder in `required` that the template lacks
    pub fn require(&self, required: &[&str]) -> Result<(), TemplateError> {
        match required.iter().find(|p| !self.source.contains(**p)) {
            Some(missing) => Err(self.missing(missing)),
            None => Ok(()),
        }
    }

    /// Substitute every occurrence of each field's placeholder.
    ///
    /// The template is scanned once, so placeholder-looking text inside a
    /// substituted value is never expanded again.
    pub fn render(&self, fields: &[Field]) -> Result<String, TemplateError> {
        if let Some(missing) = fields
            .iter()
            .find(|f| f.required && !self.source.contains(f.placeholder))
        {
            return Err(self.missing(missing.placeholder));
        }

        let mut output = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some((pos, field)) = next_placeholder(rest, fields) {
            output.push_str(&rest[..pos]);
            output.push_str(&field.value);
            rest = &rest[pos + field.placeholder.len()..];
        }
        output.push_str(rest);

        Ok(output)
    }

    fn missing(&self, placeholder: &str) -> TemplateError {
        TemplateError::MissingPlaceholder {
            template: self.name.clone(),
            placeholder: placeholder.to_string(),
        }
    }
}

/// Earliest placeholder occurrence in `text`
fn next_placeholder<'a>(text: &str, fields: &'a [Field]) -> Option<(usize, &'a Field)> {
    fields
        .iter()
        .filter_map(|field| text.find(field.placeholder).map(|pos| (pos, field)))
        .min_by_key(|(pos, _)| *pos)
}
