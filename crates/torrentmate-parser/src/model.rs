//! Content identity types.

use serde::Serialize;
use std::fmt;

/// Kind of release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentType {
    Movie,
    Series,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Movie => write!(f, "Movie"),
            ContentType::Series => write!(f, "Series"),
        }
    }
}

/// Inclusive range of positive numbers; a single number has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NumberRange {
    pub start: u32,
    pub end: u32,
}

impl NumberRange {
    pub fn single(n: u32) -> Self {
        Self { start: n, end: n }
    }

    /// A range from two bounds; reversed bounds collapse to `start`.
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

/// Season/episode marker of a series release.
///
/// Renders in release-name form:
///
/// ```
/// use torrentmate_parser::{EpisodeMarker, NumberRange};
///
/// let m = EpisodeMarker::new(NumberRange::single(2), Some(NumberRange::single(5)));
/// assert_eq!(m.to_string(), "S02E05");
/// let m = EpisodeMarker::new(NumberRange::single(1), Some(NumberRange::new(1, 3)));
/// assert_eq!(m.to_string(), "S01E01-E03");
/// let m = EpisodeMarker::new(NumberRange::new(1, 3), None);
/// assert_eq!(m.to_string(), "S01-S03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EpisodeMarker {
    pub season: NumberRange,
    pub episode: Option<NumberRange>,
}

impl EpisodeMarker {
    pub fn new(season: NumberRange, episode: Option<NumberRange>) -> Self {
        Self { season, episode }
    }
}

impl fmt::Display for EpisodeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}", self.season.start)?;
        if !self.season.is_single() {
            return write!(f, "-S{:02}", self.season.end);
        }
        if let Some(episode) = self.episode {
            write!(f, "E{:02}", episode.start)?;
            if !episode.is_single() {
                write!(f, "-E{:02}", episode.end)?;
            }
        }
        Ok(())
    }
}

/// What a release folder contains, as far as its naming tells.
///
/// Built only by the classifier; the content type never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentIdentity {
    content_type: ContentType,
    title: String,
    year: Option<u16>,
    episodes: Option<EpisodeMarker>,
    media_file_count: usize,
    season_count: u32,
}

impl ContentIdentity {
    pub(crate) fn movie(title: String, year: Option<u16>, media_file_count: usize) -> Self {
        Self {
            content_type: ContentType::Movie,
            title,
            year,
            episodes: None,
            media_file_count,
            season_count: 0,
        }
    }

    pub(crate) fn series(
        title: String,
        year: Option<u16>,
        episodes: EpisodeMarker,
        media_file_count: usize,
        season_count: u32,
    ) -> Self {
        Self {
            content_type: ContentType::Series,
            title,
            year,
            episodes: Some(episodes),
            media_file_count,
            season_count: season_count.max(1),
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Normalized title; empty when the folder name had nothing usable.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> Option<u16> {
        self.year
    }

    /// Season/episode marker, present only for series.
    pub fn episodes(&self) -> Option<&EpisodeMarker> {
        self.episodes.as_ref()
    }

    /// Number of media files in the folder listing.
    pub fn media_file_count(&self) -> usize {
        self.media_file_count
    }

    /// Distinct seasons seen in the name and listing (0 for movies).
    pub fn season_count(&self) -> u32 {
        self.season_count
    }

    pub fn is_series(&self) -> bool {
        self.content_type == ContentType::Series
    }
}
