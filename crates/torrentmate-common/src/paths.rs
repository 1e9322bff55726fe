//! Path utilities for detecting media containers by extension.

use std::path::Path;

/// Default allow-list of media-container extensions.
const MEDIA_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "ts", "m2ts", "m4v", "mov", "wmv", "webm",
];

/// Characters that may not appear in a file name on common filesystems.
pub const ILLEGAL_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Check if a path has an extension from the default media allow-list.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use torrentmate_common::paths::is_media_file;
///
/// assert!(is_media_file(Path::new("movie.mkv")));
/// assert!(is_media_file(Path::new("/path/to/EPISODE.MP4")));
/// assert!(!is_media_file(Path::new("movie.nfo")));
/// ```
pub fn is_media_file(path: &Path) -> bool {
    has_extension_in(path, MEDIA_EXTENSIONS)
}

/// Check if a path's extension (case-insensitive) is in `extensions`.
pub fn has_extension_in<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.as_ref().eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Get the default media-container extensions.
#[must_use]
pub fn media_extensions() -> &'static [&'static str] {
    MEDIA_EXTENSIONS
}

/// Whether `c` can appear in a file name.
pub fn is_legal_filename_char(c: char) -> bool {
    !c.is_control() && !ILLEGAL_FILENAME_CHARS.contains(&c)
}
