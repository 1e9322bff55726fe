//! Canonical release name shared by every generated file.
//!
//! Layout: `Title (Year) S01E02 - LANGUAGES - SOURCE - RESOLUTION - CODEC`.
//! Unknown segments are left out together with their separator.

use crate::reconcile::NormalizedMetadata;
use serde::Serialize;
use std::fmt;
use torrentmate_common::paths::is_legal_filename_char;

const SEPARATOR: &str = " - ";

/// A release base name, safe to use as a file name stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NamingToken(String);

impl NamingToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name for an artifact with the given extension.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for NamingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NamingToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct NamingOptions {
    /// Replaces the `+`-joined list when there is more than one audio language.
    pub multi_language_label: Option<String>,
}

/// Build the naming token for `meta`.
pub fn build_token(meta: &NormalizedMetadata, options: &NamingOptions) -> NamingToken {
    let mut head = sanitize(meta.title());
    if let Some(year) = meta.year() {
        head.push_str(&format!(" ({year})"));
    }
    if let Some(marker) = meta.episodes() {
        head.push(' ');
        head.push_str(&marker.to_string());
    }

    let technical = meta.technical();
    let segments = [
        language_segment(meta.audio_languages(), options),
        (!technical.source_hint.is_unknown()).then(|| technical.source_hint.to_string()),
        (!technical.resolution.is_unknown()).then(|| technical.resolution.to_string()),
        (!technical.video_codec.is_unknown()).then(|| technical.video_codec.to_string()),
    ];

    let mut token = head;
    for segment in segments.into_iter().flatten() {
        let segment = sanitize(&segment);
        if !segment.is_empty() {
            token.push_str(SEPARATOR);
            token.push_str(&segment);
        }
    }

    NamingToken(token)
}

fn language_segment(languages: &[String], options: &NamingOptions) -> Option<String> {
    match (languages.len(), options.multi_language_label.as_deref()) {
        (0, _) => None,
        (n, Some(label)) if n > 1 => Some(label.to_string()),
        _ => Some(languages.join("+")),
    }
}

/// Strip characters that are illegal in file names and collapse whitespace.
fn sanitize(segment: &str) -> String {
    let cleaned: String = segment.chars().filter(|c| is_legal_filename_char(*c)).collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
