//! Language tag normalization.
//!
//! Analyzers report languages as ISO 639-1 ("en"), ISO 639-2 ("eng"),
//! BCP 47 ("en-US") or plain names ("English"). Release names use a short
//! uppercase code, so all of those collapse to "EN".

use phf::phf_map;

static LANGUAGES: phf::Map<&'static str, &'static str> = phf_map! {
    "en" => "EN", "eng" => "EN", "english" => "EN",
    "fr" => "FR", "fre" => "FR", "fra" => "FR", "french" => "FR", "français" => "FR",
    "es" => "ES", "spa" => "ES", "spanish" => "ES", "español" => "ES",
    "de" => "DE", "ger" => "DE", "deu" => "DE", "german" => "DE", "deutsch" => "DE",
    "it" => "IT", "ita" => "IT", "italian" => "IT", "italiano" => "IT",
    "pt" => "PT", "por" => "PT", "portuguese" => "PT",
    "nl" => "NL", "dut" => "NL", "nld" => "NL", "dutch" => "NL",
    "ru" => "RU", "rus" => "RU", "russian" => "RU",
    "ja" => "JA", "jpn" => "JA", "japanese" => "JA",
    "ko" => "KO", "kor" => "KO", "korean" => "KO",
    "zh" => "ZH", "chi" => "ZH", "zho" => "ZH", "chinese" => "ZH",
    "sv" => "SV", "swe" => "SV", "swedish" => "SV",
    "da" => "DA", "dan" => "DA", "danish" => "DA",
    "no" => "NO", "nor" => "NO", "norwegian" => "NO",
    "fi" => "FI", "fin" => "FI", "finnish" => "FI",
    "pl" => "PL", "pol" => "PL", "polish" => "PL",
    "ar" => "AR", "ara" => "AR", "arabic" => "AR",
    "hi" => "HI", "hin" => "HI", "hindi" => "HI",
    "tr" => "TR", "tur" => "TR", "turkish" => "TR",
};

/// Tags meaning "no usable language".
const UNDETERMINED: &[&str] = &["und", "unknown", "zxx", "mis", "mul", "qaa"];

/// Normalize one analyzer language tag. `None` means "skip this track".
///
/// ```
/// use torrentmate_av::language::normalize_language;
///
/// assert_eq!(normalize_language("en").as_deref(), Some("EN"));
/// assert_eq!(normalize_language("fr-CA").as_deref(), Some("FR"));
/// assert_eq!(normalize_language("und"), None);
/// ```
pub fn normalize_language(raw: &str) -> Option<String> {
    let lower = raw.trim().to_lowercase();
    if lower.is_empty() || UNDETERMINED.contains(&lower.as_str()) {
        return None;
    }

    if let Some(code) = LANGUAGES.get(lower.as_str()) {
        return Some((*code).to_string());
    }

    let primary = lower.split(['-', '_']).next().unwrap_or_default();
    if primary.is_empty() || !primary.chars().all(|c| c.is_alphabetic()) {
        return None;
    }
    if UNDETERMINED.contains(&primary) {
        return None;
    }

    Some(
        LANGUAGES
            .get(primary)
            .map(|code| (*code).to_string())
            .unwrap_or_else(|| primary.to_uppercase()),
    )
}

/// Normalize a sequence of tags into an ordered set, keeping first-seen order.
pub fn collect_languages<'a, I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut languages: Vec<String> = Vec::new();
    for code in tags.into_iter().flatten().filter_map(normalize_language) {
        if !languages.contains(&code) {
            languages.push(code);
        }
    }
    languages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_variants() {
        for tag in ["en", "EN", "eng", "English", "en-US", "en_GB"] {
            assert_eq!(normalize_language(tag).as_deref(), Some("EN"), "{tag}");
        }
        assert_eq!(normalize_language("fre").as_deref(), Some("FR"));
        assert_eq!(normalize_language("Français").as_deref(), Some("FR"));
    }

    #[test]
    fn test_unknown_language_uppercased() {
        assert_eq!(normalize_language("tlh").as_deref(), Some("TLH"));
    }

    #[test]
    fn test_skip_undetermined() {
        assert_eq!(normalize_language(""), None);
        assert_eq!(normalize_language("  "), None);
        assert_eq!(normalize_language("und"), None);
        assert_eq!(normalize_language("zxx"), None);
        assert_eq!(normalize_language("123"), None);
    }

    #[test]
    fn test_collect_dedups_preserving_order() {
        let tags = [Some("fr"), None, Some("en"), Some("fre"), Some("und"), Some("eng")];
        assert_eq!(collect_languages(tags), vec!["FR", "EN"]);
    }
}
