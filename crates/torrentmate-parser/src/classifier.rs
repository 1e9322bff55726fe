//! Movie vs. series classification.
//!
//! Classification is a single pass over an ordered rule list. Each rule
//! either produces a [`ContentIdentity`] or defers to the next one; the last
//! rule always matches, so classification never fails.

use crate::model::{ContentIdentity, EpisodeMarker, NumberRange};
use crate::patterns::{find_paren_year, find_series_marker, find_trailing_year};
use crate::title::normalize_title;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use torrentmate_common::paths::media_extensions;
use torrentmate_common::MediaFolder;
use tracing::debug;

/// Earliest year accepted as a release year.
pub const MIN_YEAR: u16 = 1888;

/// Which wins when a folder name carries both a parenthesized year and a
/// season/episode marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Precedence {
    #[default]
    MovieFirst,
    SeriesFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    ParenthesizedYear,
    NameMarker,
    TrailingYear,
    ListingMarker,
}

impl Rule {
    fn order(precedence: Precedence) -> &'static [Rule] {
        match precedence {
            Precedence::MovieFirst => &[
                Rule::ParenthesizedYear,
                Rule::NameMarker,
                Rule::TrailingYear,
                Rule::ListingMarker,
            ],
            Precedence::SeriesFirst => &[
                Rule::NameMarker,
                Rule::ListingMarker,
                Rule::ParenthesizedYear,
                Rule::TrailingYear,
            ],
        }
    }
}

/// What the classifier knows about a folder besides its name.
struct Listing {
    media_file_count: usize,
    seasons: BTreeSet<u32>,
}

/// Folder classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    precedence: Precedence,
    max_year: u16,
    extensions: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Classifier with movie-first precedence, the default media extensions,
    /// and years accepted up to next year.
    pub fn new() -> Self {
        let next_year = chrono::Local::now().year() + 1;
        Self {
            precedence: Precedence::default(),
            max_year: u16::try_from(next_year).unwrap_or(u16::MAX),
            extensions: media_extensions().iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Latest year accepted as a release year.
    pub fn with_max_year(mut self, max_year: u16) -> Self {
        self.max_year = max_year;
        self
    }

    /// Extensions counted as media files in the listing.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    fn plausible(&self, year: u16) -> bool {
        (MIN_YEAR..=self.max_year).contains(&year)
    }

    /// Classify a folder from its name and listing.
    pub fn classify(&self, folder: &MediaFolder) -> ContentIdentity {
        let mut seasons = BTreeSet::new();
        let entries = folder
            .directories()
            .chain(folder.media_files(&self.extensions));
        for entry in entries {
            if let Some(found) = find_series_marker(&entry.file_name()) {
                seasons.extend(found.marker.season.start..=found.marker.season.end);
            }
        }

        let listing = Listing {
            media_file_count: folder.media_files(&self.extensions).count(),
            seasons,
        };
        self.classify_with(&folder.name(), &listing)
    }

    /// Classify a bare folder name, without looking at any listing.
    pub fn classify_name(&self, name: &str) -> ContentIdentity {
        let listing = Listing {
            media_file_count: 0,
            seasons: BTreeSet::new(),
        };
        self.classify_with(name, &listing)
    }

    fn classify_with(&self, name: &str, listing: &Listing) -> ContentIdentity {
        for rule in Rule::order(self.precedence) {
            if let Some(identity) = self.apply(*rule, name, listing) {
                debug!(?rule, folder = %name, "Classified as {}", identity.content_type());
                return identity;
            }
        }

        debug!(folder = %name, "No pattern matched, falling back to movie");
        ContentIdentity::movie(normalize_title(name), None, listing.media_file_count)
    }

    fn apply(&self, rule: Rule, name: &str, listing: &Listing) -> Option<ContentIdentity> {
        match rule {
            Rule::ParenthesizedYear => {
                let found = find_paren_year(name, |y| self.plausible(y))?;
                if found.span && self.has_series_evidence(name, listing) {
                    return None;
                }
                Some(ContentIdentity::movie(
                    normalize_title(&name[..found.start]),
                    Some(found.year),
                    listing.media_file_count,
                ))
            }
            Rule::NameMarker => {
                let found = find_series_marker(name)?;
                let (title, year) = self.split_year(&name[..found.start]);
                let mut seasons = listing.seasons.clone();
                seasons.extend(found.marker.season.start..=found.marker.season.end);
                Some(ContentIdentity::series(
                    title,
                    year,
                    found.marker,
                    listing.media_file_count,
                    season_count(&seasons),
                ))
            }
            Rule::TrailingYear => {
                let found = find_trailing_year(name, |y| self.plausible(y))?;
                if self.has_series_evidence(name, listing)
                    && find_paren_year(name, |y| self.plausible(y)).map_or(false, |y| y.span)
                {
                    return None;
                }
                Some(ContentIdentity::movie(
                    normalize_title(&name[..found.start]),
                    Some(found.year),
                    listing.media_file_count,
                ))
            }
            Rule::ListingMarker => {
                let first = *listing.seasons.first()?;
                let last = *listing.seasons.last()?;
                let (title, year) = self.split_year(name);
                Some(ContentIdentity::series(
                    title,
                    year,
                    EpisodeMarker::new(NumberRange::new(first, last), None),
                    listing.media_file_count,
                    season_count(&listing.seasons),
                ))
            }
        }
    }

    /// A season/episode marker in the name or in the listing.
    ///
    /// A year span such as `(2008-2013)` only names a movie when neither is
    /// present.
    fn has_series_evidence(&self, name: &str, listing: &Listing) -> bool {
        !listing.seasons.is_empty() || find_series_marker(name).is_some()
    }

    /// Split a trailing or parenthesized year off a title fragment.
    fn split_year(&self, fragment: &str) -> (String, Option<u16>) {
        let found = find_paren_year(fragment, |y| self.plausible(y))
            .or_else(|| find_trailing_year(fragment, |y| self.plausible(y)));
        match found {
            Some(found) => (normalize_title(&fragment[..found.start]), Some(found.year)),
            None => (normalize_title(fragment), None),
        }
    }
}

fn season_count(seasons: &BTreeSet<u32>) -> u32 {
    u32::try_from(seasons.len()).unwrap_or(u32::MAX)
}
