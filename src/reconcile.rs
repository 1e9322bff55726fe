//! Merge of folder identity and technical metadata.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use torrentmate_av::{Resolution, SourceHint, TechnicalMetadata, VideoCodec};
use torrentmate_common::{Error, Result};
use torrentmate_parser::{ContentIdentity, ContentType, EpisodeMarker};

/// Non-fatal finding attached to a reconciled record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Advisory {
    /// Neither resolution nor source could be determined.
    LowConfidenceMetadata,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::LowConfidenceMetadata => {
                write!(f, "LowConfidenceMetadata: resolution and source are both unknown")
            }
        }
    }
}

/// Everything known about a release. Every generator reads from this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedMetadata {
    identity: ContentIdentity,
    technical: TechnicalMetadata,
    advisories: Vec<Advisory>,
}

impl NormalizedMetadata {
    pub fn identity(&self) -> &ContentIdentity {
        &self.identity
    }

    pub fn technical(&self) -> &TechnicalMetadata {
        &self.technical
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn content_type(&self) -> ContentType {
        self.identity.content_type()
    }

    pub fn title(&self) -> &str {
        self.identity.title()
    }

    pub fn year(&self) -> Option<u16> {
        self.identity.year()
    }

    pub fn episodes(&self) -> Option<&EpisodeMarker> {
        self.identity.episodes()
    }

    pub fn resolution(&self) -> Resolution {
        self.technical.resolution
    }

    pub fn video_codec(&self) -> &VideoCodec {
        &self.technical.video_codec
    }

    pub fn audio_languages(&self) -> &[String] {
        &self.technical.audio_languages
    }

    pub fn subtitle_languages(&self) -> &[String] {
        &self.technical.subtitle_languages
    }

    pub fn source_hint(&self) -> SourceHint {
        self.technical.source_hint
    }

    pub fn runtime_minutes(&self) -> Option<u32> {
        self.technical.runtime_minutes
    }
}

/// Combine the classifier's and the analyzer's view of `folder`.
///
/// # Errors
///
/// Returns [`Error::EmptyTitle`] if the identity has no usable title.
pub fn reconcile(
    folder: &Path,
    identity: ContentIdentity,
    technical: TechnicalMetadata,
) -> Result<NormalizedMetadata> {
    if identity.title().is_empty() {
        return Err(Error::empty_title(folder));
    }

    let mut advisories = Vec::new();
    if technical.resolution.is_unknown() && technical.source_hint.is_unknown() {
        tracing::warn!(
            "{:?}: {}",
            folder,
            Advisory::LowConfidenceMetadata
        );
        advisories.push(Advisory::LowConfidenceMetadata);
    }

    Ok(NormalizedMetadata {
        identity,
        technical,
        advisories,
    })
}
