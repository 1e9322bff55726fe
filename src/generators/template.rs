//! Variable substitution for artifact templates.

use crate::naming::NamingToken;
use crate::reconcile::NormalizedMetadata;
use std::collections::BTreeMap;
use torrentmate_parser::ContentType;

/// Rendered in place of any value the metadata does not have.
pub const MISSING: &str = "N/A";

/// Variable substitution context for artifact templates.
///
/// Supports variable substitution in strings using the `{varname}` syntax.
/// Unknown variables are left untouched.
///
/// # Example
///
/// ```
/// use torrentmate::generators::TemplateContext;
///
/// let ctx = TemplateContext::new()
///     .with_var("title", "Inception")
///     .with_var("year", "2010");
///
/// assert_eq!(ctx.substitute("{title} ({year})"), "Inception (2010)");
/// assert_eq!(ctx.substitute("{missing}"), "{missing}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty template context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the variables every artifact template can use.
    ///
    /// | variable | example |
    /// |---|---|
    /// | `token` | `Inception (2010) - EN - BluRay - 1080p - x265` |
    /// | `title`, `title_upper` | `Inception`, `INCEPTION` |
    /// | `year` | `2010` |
    /// | `kind` | `Movie` / `Series` |
    /// | `episodes`, `season_count` | `S01-S03`, `3` |
    /// | `media_files` | `24` |
    /// | `languages`, `subtitles` | `EN, FR` |
    /// | `source`, `resolution`, `dimensions`, `video_codec` | `BluRay`, `1080p`, `1920x1080`, `x265` |
    /// | `container`, `runtime`, `bitrate`, `audio_codecs`, `subtitle_formats` | `Matroska`, `148 min`, `8897 kb/s`, ... |
    /// | `size` | `8.42 GiB` |
    ///
    /// A series runtime reads `~45 min per episode`. Missing values render as
    /// [`MISSING`].
    pub fn from_metadata(meta: &NormalizedMetadata, token: &NamingToken) -> Self {
        let technical = meta.technical();
        let details = &technical.details;
        let identity = meta.identity();

        let mut ctx = Self::new()
            .with_var("token", token.as_str())
            .with_var("title", meta.title())
            .with_var("title_upper", &meta.title().to_uppercase())
            .with_var("kind", &meta.content_type().to_string());

        ctx.set_opt("year", meta.year().map(|y| y.to_string()));
        ctx.set_opt("episodes", meta.episodes().map(|m| m.to_string()));
        ctx.set_opt(
            "season_count",
            (meta.content_type() == ContentType::Series).then(|| identity.season_count().to_string()),
        );
        ctx.set("media_files", &identity.media_file_count().to_string());

        ctx.set_list("languages", meta.audio_languages());
        ctx.set_list("subtitles", meta.subtitle_languages());
        ctx.set_opt(
            "source",
            (!technical.source_hint.is_unknown()).then(|| technical.source_hint.to_string()),
        );
        ctx.set_opt(
            "resolution",
            (!technical.resolution.is_unknown()).then(|| technical.resolution.to_string()),
        );
        ctx.set_opt(
            "dimensions",
            details.width.zip(details.height).map(|(w, h)| format!("{w}x{h}")),
        );
        ctx.set_opt(
            "video_codec",
            (!technical.video_codec.is_unknown()).then(|| technical.video_codec.to_string()),
        );

        ctx.set_opt("container", details.container.clone());
        ctx.set_opt(
            "runtime",
            meta.runtime_minutes().map(|m| match meta.content_type() {
                ContentType::Movie => format!("{m} min"),
                ContentType::Series => format!("~{m} min per episode"),
            }),
        );
        ctx.set_opt("size", details.file_size.map(format_size));
        ctx.set_opt(
            "bitrate",
            details.overall_bitrate_kbps.map(|k| format!("{k} kb/s")),
        );
        ctx.set_list("audio_codecs", &details.audio_tracks);
        ctx.set_list("subtitle_formats", &details.subtitle_formats);

        ctx
    }

    /// Add a custom variable.
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    /// Set a variable.
    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    fn set_opt(&mut self, key: &str, value: Option<String>) {
        self.set(key, value.as_deref().unwrap_or(MISSING));
    }

    fn set_list(&mut self, key: &str, values: &[String]) {
        if values.is_empty() {
            self.set(key, MISSING);
        } else {
            self.set(key, &values.join(", "));
        }
    }

    /// Get a variable value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|s| s.as_str())
    }

    /// Substitute variables in a string.
    ///
    /// Runs in a single left-to-right pass, so values that themselves look
    /// like `{var}` are never expanded.
    pub fn substitute(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let key = &after[..close];
                    match self.vars.get(key) {
                        Some(value) => result.push_str(value),
                        None => {
                            result.push('{');
                            result.push_str(key);
                            result.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    result.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }

        result.push_str(rest);
        result
    }
}

/// Human-readable size of the analyzed file, in binary units.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}
