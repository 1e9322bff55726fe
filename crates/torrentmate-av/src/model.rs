//! Canonical technical metadata.
//!
//! Every naming-relevant field has an explicit `Unknown` sentinel so that a
//! record is always fully populated, whatever the analyzer reported.

use serde::{Serialize, Serializer};
use std::fmt;

/// Video resolution class derived from the frame height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Resolution {
    #[serde(rename = "480p")]
    _480p,
    #[serde(rename = "576p")]
    _576p,
    #[serde(rename = "720p")]
    _720p,
    #[serde(rename = "1080p")]
    _1080p,
    #[serde(rename = "2160p")]
    _2160p,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Resolution {
    /// Classify a frame height. A zero height is treated as missing.
    pub fn from_height(height: u32) -> Self {
        match height {
            0 => Resolution::Unknown,
            h if h >= 2000 => Resolution::_2160p,
            h if h >= 1000 => Resolution::_1080p,
            h if h >= 700 => Resolution::_720p,
            h if h >= 500 => Resolution::_576p,
            _ => Resolution::_480p,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Resolution::Unknown)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::_480p => write!(f, "480p"),
            Resolution::_576p => write!(f, "576p"),
            Resolution::_720p => write!(f, "720p"),
            Resolution::_1080p => write!(f, "1080p"),
            Resolution::_2160p => write!(f, "2160p"),
            Resolution::Unknown => write!(f, "unknown"),
        }
    }
}

/// Acquisition method as conventionally encoded in release names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SourceHint {
    #[serde(rename = "BluRay")]
    BluRay,
    #[serde(rename = "WEB-DL")]
    WebDl,
    #[serde(rename = "WEBRip")]
    WebRip,
    #[serde(rename = "HDTV")]
    Hdtv,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

/// Substrings per source, in priority order. First hit wins.
const SOURCE_MARKERS: &[(SourceHint, &[&str])] = &[
    (SourceHint::BluRay, &["bluray", "blu-ray", "bdrip"]),
    (SourceHint::WebDl, &["web-dl", "webdl"]),
    (SourceHint::WebRip, &["webrip", "web-rip"]),
    (SourceHint::Hdtv, &["hdtv"]),
];

impl SourceHint {
    /// Detect the source from a file name (case-insensitive substring scan).
    ///
    /// ```
    /// use torrentmate_av::SourceHint;
    ///
    /// assert_eq!(SourceHint::from_file_name("Movie.2010.1080p.BluRay.x265.mkv"), SourceHint::BluRay);
    /// assert_eq!(SourceHint::from_file_name("show.s01e01.webrip.mkv"), SourceHint::WebRip);
    /// assert_eq!(SourceHint::from_file_name("movie.mkv"), SourceHint::Unknown);
    /// ```
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        SOURCE_MARKERS
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| lower.contains(m)))
            .map(|(source, _)| *source)
            .unwrap_or(SourceHint::Unknown)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SourceHint::Unknown)
    }
}

impl fmt::Display for SourceHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceHint::BluRay => write!(f, "BluRay"),
            SourceHint::WebDl => write!(f, "WEB-DL"),
            SourceHint::WebRip => write!(f, "WEBRip"),
            SourceHint::Hdtv => write!(f, "HDTV"),
            SourceHint::Unknown => write!(f, "unknown"),
        }
    }
}

/// Video codec label as shown in release names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum VideoCodec {
    /// A mapped label ("x264") or the analyzer's raw token.
    Named(String),
    #[default]
    Unknown,
}

impl VideoCodec {
    /// Build from a label; blank labels become the sentinel.
    pub fn new(label: impl AsRef<str>) -> Self {
        let label = label.as_ref().trim();
        if label.is_empty() {
            VideoCodec::Unknown
        } else {
            VideoCodec::Named(label.to_string())
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, VideoCodec::Unknown)
    }

    pub fn as_str(&self) -> &str {
        match self {
            VideoCodec::Named(label) => label,
            VideoCodec::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VideoCodec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Descriptive extras for release notes. Never used for naming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TechnicalDetails {
    /// Container format (e.g., "Matroska", "MPEG-4").
    pub container: Option<String>,
    /// File size in bytes as reported by the analyzer.
    pub file_size: Option<u64>,
    /// Width of the first video track in pixels.
    pub width: Option<u32>,
    /// Height of the first video track in pixels.
    pub height: Option<u32>,
    /// Overall bitrate in kb/s.
    pub overall_bitrate_kbps: Option<u64>,
    /// One label per audio track, e.g. "E-AC-3 6ch".
    pub audio_tracks: Vec<String>,
    /// One format per subtitle track, e.g. "UTF-8", "PGS".
    pub subtitle_formats: Vec<String>,
}

/// Canonical technical description of a release's representative file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TechnicalMetadata {
    pub resolution: Resolution,
    pub video_codec: VideoCodec,
    /// Normalized language codes in track order, without duplicates.
    pub audio_languages: Vec<String>,
    /// Normalized language codes in track order, without duplicates.
    pub subtitle_languages: Vec<String>,
    pub source_hint: SourceHint,
    pub runtime_minutes: Option<u32>,
    pub details: TechnicalDetails,
}

impl TechnicalMetadata {
    /// A record with every field at its sentinel.
    pub fn unknown() -> Self {
        Self::default()
    }
}
