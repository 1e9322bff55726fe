//! Title normalization.

use torrentmate_common::paths::is_legal_filename_char;

/// Characters trimmed from both ends once the title is cut out of a name.
const DEBRIS: &[char] = &['-', ',', ';', '+', '~', '&'];

/// Opening brackets left dangling at the end when a marker was cut off.
const DANGLING: &[char] = &['(', '[', '{'];

/// Turn a raw release-name fragment into a display title.
///
/// Dots and underscores become spaces, characters that are illegal in file
/// names are dropped, whitespace is collapsed and separator debris is trimmed
/// from both ends. A fragment without a single alphanumeric character
/// normalizes to the empty string.
///
/// ```
/// use torrentmate_parser::normalize_title;
///
/// assert_eq!(normalize_title("The.Matrix."), "The Matrix");
/// assert_eq!(normalize_title("Some_Show - "), "Some Show");
/// assert_eq!(normalize_title("What If...?"), "What If");
/// assert_eq!(normalize_title("???"), "");
/// ```
pub fn normalize_title(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .map(|c| if c == '.' || c == '_' { ' ' } else { c })
        .filter(|c| is_legal_filename_char(*c))
        .collect();

    let mut title = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    loop {
        let trimmed = title
            .trim_matches(|c: char| c.is_whitespace() || DEBRIS.contains(&c))
            .trim_end_matches(|c: char| c.is_whitespace() || DANGLING.contains(&c));
        if trimmed.len() == title.len() {
            break;
        }
        title = trimmed.to_string();
    }

    if title.chars().any(char::is_alphanumeric) {
        title
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_become_spaces() {
        assert_eq!(normalize_title("Blade_Runner.2049"), "Blade Runner 2049");
        assert_eq!(normalize_title("  Spaced    Out  "), "Spaced Out");
    }

    #[test]
    fn test_illegal_characters_dropped() {
        assert_eq!(normalize_title("Mission: Impossible"), "Mission Impossible");
        assert_eq!(normalize_title("AC/DC Live"), "ACDC Live");
        assert_eq!(normalize_title("Who*Cares|Really"), "WhoCaresReally");
    }

    #[test]
    fn test_debris_trimmed() {
        assert_eq!(normalize_title("Show - ("), "Show");
        assert_eq!(normalize_title("- Title -"), "Title");
        assert_eq!(normalize_title("Title [ "), "Title");
    }

    #[test]
    fn test_inner_brackets_kept() {
        assert_eq!(
            normalize_title("Movie (Director's Cut)"),
            "Movie (Director's Cut)"
        );
    }

    #[test]
    fn test_no_alphanumerics_is_empty() {
        assert_eq!(normalize_title(""), "");
        assert_eq!(normalize_title("..."), "");
        assert_eq!(normalize_title("- () -"), "");
    }

    #[test]
    fn test_unicode_titles_survive() {
        assert_eq!(normalize_title("Amélie"), "Amélie");
        assert_eq!(normalize_title("千と千尋の神隠し"), "千と千尋の神隠し");
    }
}
