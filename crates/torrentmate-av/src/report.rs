//! Conversion of raw mediainfo JSON into [`TechnicalMetadata`].
//!
//! Only the report's outer structure can fail: individual fields that are
//! missing, empty, or of an unexpected type degrade to their sentinel.

use crate::analyzer::RawTechnicalReport;
use crate::codec::map_video_codec;
use crate::language::collect_languages;
use crate::model::*;
use serde::{Deserialize, Deserializer};
use torrentmate_common::{Error, Result};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct MediaInfoOutput {
    media: Option<MediaInfoMedia>,
}

#[derive(Debug, Deserialize)]
struct MediaInfoMedia {
    track: Option<Vec<MediaInfoTrack>>,
}

#[derive(Debug, Default, Deserialize)]
struct MediaInfoTrack {
    #[serde(rename = "@type", default, deserialize_with = "lenient")]
    track_type: Option<String>,
    #[serde(rename = "Format", default, deserialize_with = "lenient")]
    format: Option<String>,
    #[serde(rename = "FileSize", default, deserialize_with = "lenient")]
    file_size: Option<String>,
    #[serde(rename = "Duration", default, deserialize_with = "lenient")]
    duration: Option<String>,
    #[serde(rename = "OverallBitRate", default, deserialize_with = "lenient")]
    overall_bitrate: Option<String>,
    #[serde(rename = "Width", default, deserialize_with = "lenient")]
    width: Option<String>,
    #[serde(rename = "Height", default, deserialize_with = "lenient")]
    height: Option<String>,
    #[serde(rename = "Channels", default, deserialize_with = "lenient")]
    channels: Option<String>,
    #[serde(rename = "Language", default, deserialize_with = "lenient")]
    language: Option<String>,
}

/// Accept strings and numbers; anything else reads as absent.
fn lenient<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Parse an analyzer report.
///
/// # Errors
///
/// Returns [`Error::MalformedTechnicalReport`] if the output is not JSON or
/// lacks the `media.track` structure.
pub fn parse_report(report: &RawTechnicalReport) -> Result<TechnicalMetadata> {
    let output: MediaInfoOutput = serde_json::from_str(&report.output)
        .map_err(|e| Error::malformed_report(&report.file, format!("invalid JSON: {e}")))?;

    let tracks = output
        .media
        .and_then(|m| m.track)
        .ok_or_else(|| Error::malformed_report(&report.file, "report has no media tracks"))?;

    let metadata = build_metadata(&report.file_name(), &tracks);
    debug!("Parsed technical metadata for {:?}: {:?}", report.file, metadata);
    Ok(metadata)
}

fn build_metadata(file_name: &str, tracks: &[MediaInfoTrack]) -> TechnicalMetadata {
    let general = tracks.iter().find(|t| is_type(t, "General"));
    let video = tracks.iter().find(|t| is_type(t, "Video"));
    let audio: Vec<&MediaInfoTrack> = tracks.iter().filter(|t| is_type(t, "Audio")).collect();
    let text: Vec<&MediaInfoTrack> = tracks.iter().filter(|t| is_type(t, "Text")).collect();

    let height = video.and_then(|v| v.height.as_deref()).and_then(parse_numeric::<u32>);
    let width = video.and_then(|v| v.width.as_deref()).and_then(parse_numeric::<u32>);

    let runtime_minutes = general
        .and_then(|g| g.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 60.0)
        .map(|secs| (secs / 60.0).floor() as u32);

    let details = TechnicalDetails {
        container: general.and_then(|g| g.format.clone()),
        file_size: general
            .and_then(|g| g.file_size.as_deref())
            .and_then(parse_numeric::<u64>),
        width,
        height,
        overall_bitrate_kbps: general
            .and_then(|g| g.overall_bitrate.as_deref())
            .and_then(parse_numeric::<f64>)
            .map(|bps| (bps / 1000.0) as u64),
        audio_tracks: audio.iter().filter_map(|t| audio_label(t)).collect(),
        subtitle_formats: text.iter().filter_map(|t| t.format.clone()).collect(),
    };

    TechnicalMetadata {
        resolution: height.map(Resolution::from_height).unwrap_or_default(),
        video_codec: map_video_codec(video.and_then(|v| v.format.as_deref())),
        audio_languages: collect_languages(audio.iter().map(|t| t.language.as_deref())),
        subtitle_languages: collect_languages(text.iter().map(|t| t.language.as_deref())),
        source_hint: SourceHint::from_file_name(file_name),
        runtime_minutes,
        details,
    }
}

fn is_type(track: &MediaInfoTrack, kind: &str) -> bool {
    track.track_type.as_deref() == Some(kind)
}

fn audio_label(track: &MediaInfoTrack) -> Option<String> {
    let format = track.format.as_deref()?;
    match track.channels.as_deref().and_then(parse_numeric::<u32>) {
        Some(ch) => Some(format!("{format} {ch}ch")),
        None => Some(format.to_string()),
    }
}

fn parse_numeric<T: std::str::FromStr>(s: &str) -> Option<T> {
    // Remove non-numeric suffixes like " pixels" or " channels"
    s.split_whitespace().next().and_then(|n| n.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::path::PathBuf;

    fn report(file: &str, output: &str) -> RawTechnicalReport {
        RawTechnicalReport {
            file: PathBuf::from(file),
            tool: "mediainfo".to_string(),
            output: output.to_string(),
        }
    }

    const INCEPTION: &str = r#"{
        "creatingLibrary": {"name": "MediaInfoLib", "version": "23.04"},
        "media": {
            "@ref": "/rel/Inception (2010)/Inception.2010.1080p.BluRay.x265.mkv",
            "track": [
                {"@type": "General", "Format": "Matroska", "FileSize": "9876543210",
                 "Duration": "8880.123", "OverallBitRate": "8897423"},
                {"@type": "Video", "Format": "HEVC", "Width": "1920", "Height": "1080"},
                {"@type": "Audio", "Format": "E-AC-3", "Channels": "6", "Language": "en"},
                {"@type": "Audio", "Format": "AC-3", "Channels": "2", "Language": "fr"},
                {"@type": "Audio", "Format": "AAC", "Channels": "2", "Language": "en"},
                {"@type": "Text", "Format": "UTF-8", "Language": "fr"},
                {"@type": "Text", "Format": "PGS"},
                {"@type": "Menu"}
            ]
        }
    }"#;

    #[test]
    fn test_parse_full_report() {
        let meta = parse_report(&report(
            "/rel/Inception (2010)/Inception.2010.1080p.BluRay.x265.mkv",
            INCEPTION,
        ))
        .unwrap();

        assert_eq!(meta.resolution, Resolution::_1080p);
        assert_eq!(meta.video_codec.as_str(), "x265");
        assert_eq!(meta.audio_languages, vec!["EN", "FR"]);
        assert_eq!(meta.subtitle_languages, vec!["FR"]);
        assert_eq!(meta.source_hint, SourceHint::BluRay);
        assert_eq!(meta.runtime_minutes, Some(148));

        assert_eq!(meta.details.container.as_deref(), Some("Matroska"));
        assert_eq!(meta.details.width, Some(1920));
        assert_eq!(meta.details.overall_bitrate_kbps, Some(8897));
        assert_eq!(
            meta.details.audio_tracks,
            vec!["E-AC-3 6ch", "AC-3 2ch", "AAC 2ch"]
        );
        assert_eq!(meta.details.subtitle_formats, vec!["UTF-8", "PGS"]);
    }

    #[test]
    fn test_source_hint_comes_from_file_name_only() {
        // "WEB-DL" only in the analyzer's title tag, not in the file name.
        let output = r#"{"media":{"track":[
            {"@type":"General","Title":"Movie WEB-DL"},
            {"@type":"Video","Format":"AVC","Height":"720"}
        ]}}"#;
        let meta = parse_report(&report("/rel/m/movie.mkv", output)).unwrap();
        assert_eq!(meta.source_hint, SourceHint::Unknown);
        assert_eq!(meta.video_codec.as_str(), "x264");
        assert_eq!(meta.resolution, Resolution::_720p);
    }

    #[test]
    fn test_missing_fields_degrade_to_sentinels() {
        let output = r#"{"media":{"track":[
            {"@type":"General"},
            {"@type":"Video","Height":"n/a"},
            {"@type":"Audio","Language":""},
            {"@type":"Audio"}
        ]}}"#;
        let meta = parse_report(&report("/rel/x/x.mkv", output)).unwrap();
        assert_eq!(meta.resolution, Resolution::Unknown);
        assert!(meta.video_codec.is_unknown());
        assert!(meta.audio_languages.is_empty());
        assert!(meta.subtitle_languages.is_empty());
        assert_eq!(meta.runtime_minutes, None);
    }

    #[test]
    fn test_numeric_json_values_accepted() {
        let output = r#"{"media":{"track":[
            {"@type":"General","Duration":5400.5},
            {"@type":"Video","Format":"AVC","Height":2160},
            {"@type":"Audio","Language":{"nested":true}}
        ]}}"#;
        let meta = parse_report(&report("/rel/x/x.mkv", output)).unwrap();
        assert_eq!(meta.resolution, Resolution::_2160p);
        assert_eq!(meta.runtime_minutes, Some(90));
        assert!(meta.audio_languages.is_empty());
    }

    #[test]
    fn test_empty_track_list_is_all_sentinels() {
        let meta = parse_report(&report("/rel/x/x.mkv", r#"{"media":{"track":[]}}"#)).unwrap();
        assert_eq!(meta, TechnicalMetadata::unknown());
    }

    #[test]
    fn test_malformed_reports() {
        for output in ["", "not json", r#"{"media":null}"#, r#"{"media":{}}"#, "[]"] {
            let err = parse_report(&report("/rel/x/x.mkv", output)).unwrap_err();
            assert_matches!(err, Error::MalformedTechnicalReport { .. }, "{output:?}");
        }
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric::<u32>("1920 pixels"), Some(1920));
        assert_eq!(parse_numeric::<u32>("1080"), Some(1080));
        assert_eq!(parse_numeric::<u32>("6 channels"), Some(6));
        assert_eq!(parse_numeric::<u32>("abc"), None);
    }
}
