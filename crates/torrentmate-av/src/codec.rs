//! Video format to release-name codec label mapping.

use crate::model::VideoCodec;
use phf::phf_map;

/// Analyzer format identifiers (uppercased) and their release-name labels.
static VIDEO_CODECS: phf::Map<&'static str, &'static str> = phf_map! {
    "AVC" => "x264",
    "H.264" => "x264",
    "H264" => "x264",
    "HEVC" => "x265",
    "H.265" => "x265",
    "H265" => "x265",
    "MPEG-4 VISUAL" => "XviD",
    "MPEG VIDEO" => "MPEG-2",
};

/// Map an analyzer video format to its codec label.
///
/// Unrecognized formats pass through unchanged; blank or missing formats
/// become [`VideoCodec::Unknown`].
///
/// ```
/// use torrentmate_av::codec::map_video_codec;
///
/// assert_eq!(map_video_codec(Some("HEVC")).as_str(), "x265");
/// assert_eq!(map_video_codec(Some("AV1")).as_str(), "AV1");
/// assert!(map_video_codec(None).is_unknown());
/// ```
pub fn map_video_codec(format: Option<&str>) -> VideoCodec {
    let Some(raw) = format.map(str::trim).filter(|f| !f.is_empty()) else {
        return VideoCodec::Unknown;
    };

    match VIDEO_CODECS.get(raw.to_uppercase().as_str()) {
        Some(label) => VideoCodec::new(*label),
        None => VideoCodec::new(raw),
    }
}
