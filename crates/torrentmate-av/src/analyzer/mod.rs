//! Technical analyzer adapter.
//!
//! The adapter picks the representative file of a release (the largest
//! media container) and hands it to an [`Analyzer`] backend. It never
//! interprets the output; see [`crate::report`] for that.

mod mediainfo;

pub use mediainfo::MediaInfoAnalyzer;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use torrentmate_common::{Error, MediaFolder, Result};
use tracing::info;

/// Unparsed analyzer output for one file.
#[derive(Debug, Clone)]
pub struct RawTechnicalReport {
    /// The analyzed media file.
    pub file: PathBuf,
    /// Name of the analyzer that produced the output.
    pub tool: String,
    /// The analyzer's standard output, unmodified.
    pub output: String,
}

impl RawTechnicalReport {
    /// File name of the analyzed media file.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A backend that inspects a media file and returns its raw report.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Backend name, used in logs and errors.
    fn name(&self) -> &str;

    /// Inspect `file`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AnalyzerUnavailable`] if the backend is missing,
    /// fails, or times out.
    async fn analyze(&self, file: &Path) -> Result<RawTechnicalReport>;
}

/// Analyze the largest media file of `folder`.
///
/// # Errors
///
/// - [`Error::NoMediaFileFound`] if no file matches `extensions`
/// - whatever the backend returns otherwise
pub async fn analyze_folder<A>(
    analyzer: &A,
    folder: &MediaFolder,
    extensions: &[String],
) -> Result<RawTechnicalReport>
where
    A: Analyzer + ?Sized,
{
    let file = folder
        .largest_media_file(extensions)
        .ok_or_else(|| Error::no_media_file(folder.path()))?;

    info!("Analyzing {:?} with {}", file, analyzer.name());
    analyzer.analyze(&file).await
}
