//! Release-name patterns: season/episode markers and release years.

use crate::model::{EpisodeMarker, NumberRange};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A season/episode marker found in a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MarkerMatch {
    /// Byte offset where the marker starts; the title is everything before.
    pub start: usize,
    pub marker: EpisodeMarker,
}

type Extract = fn(&Captures<'_>) -> Option<EpisodeMarker>;

/// Series patterns in match order. The first pattern that matches anywhere in
/// the name wins.
static SERIES_PATTERNS: Lazy<Vec<(Regex, Extract)>> = Lazy::new(|| {
    let table: [(&str, Extract); 5] = [
        // S01E02, S01E01E02, S01E01-E03, S01E01-03, S01.E02
        (
            r"(?i)S(?P<s>\d{1,3})[ ._-]?E(?P<e1>\d{1,3})(?:(?:[ ._-]?E|-E?)(?P<e2>\d{1,3})\b)?",
            episode_marker,
        ),
        // S01-S03, S01-03
        (
            r"(?i)\bS(?P<s1>\d{1,2})[ ._]?-[ ._]?S?(?P<s2>\d{1,2})\b",
            season_range_marker,
        ),
        // Season 1, Saison 2, Seasons 1-3
        (
            r"(?i)\b(?:seasons?|saisons?)[ ._-]*(?P<s1>\d{1,2})(?:[ ._]*-[ ._]*(?P<s2>\d{1,2}))?\b",
            season_range_marker,
        ),
        // 1x02
        (
            r"(?i)\b(?P<s>\d{1,2})x(?P<e1>\d{2,3})\b",
            episode_marker,
        ),
        // S02
        (r"(?i)\bS(?P<s1>\d{1,2})\b", season_range_marker),
    ];

    table
        .into_iter()
        .map(|(pattern, extract)| (Regex::new(pattern).expect("valid series pattern"), extract))
        .collect()
});

static PAREN_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[(\[](?P<year>\d{4})(?:[ ]?-[ ]?(?P<end>\d{4}))?[)\]]").expect("valid year pattern")
});

static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

fn number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

fn episode_marker(caps: &Captures<'_>) -> Option<EpisodeMarker> {
    let season = number(caps, "s")?;
    let first = number(caps, "e1")?;
    let episode = match number(caps, "e2") {
        Some(last) if last > first => NumberRange::new(first, last),
        _ => NumberRange::single(first),
    };
    Some(EpisodeMarker::new(NumberRange::single(season), Some(episode)))
}

fn season_range_marker(caps: &Captures<'_>) -> Option<EpisodeMarker> {
    let first = number(caps, "s1")?;
    let season = match number(caps, "s2") {
        Some(last) if last > first => NumberRange::new(first, last),
        _ => NumberRange::single(first),
    };
    Some(EpisodeMarker::new(season, None))
}

/// Find the first season/episode marker in `name`, trying patterns in order.
pub(crate) fn find_series_marker(name: &str) -> Option<MarkerMatch> {
    SERIES_PATTERNS.iter().find_map(|(re, extract)| {
        let caps = re.captures(name)?;
        let start = caps.get(0)?.start();
        extract(&caps).map(|marker| MarkerMatch { start, marker })
    })
}

/// A release year found in a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct YearMatch {
    /// Byte offset of the marker; the title is everything before.
    pub start: usize,
    pub year: u16,
    /// Set for a span such as `(2008-2013)`; `year` is its first year.
    pub span: bool,
}

/// First plausible `(YYYY)`, `[YYYY]` or `(YYYY-YYYY)` with some text before it.
pub(crate) fn find_paren_year(name: &str, plausible: impl Fn(u16) -> bool) -> Option<YearMatch> {
    PAREN_YEAR_RE.captures_iter(name).find_map(|caps| {
        let whole = caps.get(0)?;
        let year: u16 = caps.name("year")?.as_str().parse().ok()?;
        (plausible(year) && has_text(&name[..whole.start()])).then_some(YearMatch {
            start: whole.start(),
            year,
            span: caps.name("end").is_some(),
        })
    })
}

/// Last plausible free-standing four-digit year with some text before it.
///
/// A year is free-standing when bounded by separators or the ends of the
/// name, so `1080p` and `x264` never qualify.
pub(crate) fn find_trailing_year(name: &str, plausible: impl Fn(u16) -> bool) -> Option<YearMatch> {
    DIGIT_RUN_RE
        .find_iter(name)
        .filter(|m| m.len() == 4)
        .filter(|m| {
            let before = name[..m.start()].chars().next_back();
            let after = name[m.end()..].chars().next();
            before.map_or(true, is_separator) && after.map_or(true, is_separator)
        })
        .filter_map(|m| {
            let year: u16 = m.as_str().parse().ok()?;
            let start = name[..m.start()]
                .trim_end_matches(|c: char| c == '(' || c == '[')
                .len();
            (plausible(year) && has_text(&name[..start])).then_some(YearMatch {
                start,
                year,
                span: false,
            })
        })
        .last()
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '.' | '_' | '-' | '(' | ')' | '[' | ']')
}

fn has_text(prefix: &str) -> bool {
    prefix.chars().any(|c| !c.is_whitespace() && !is_separator(c))
}
