//! Error taxonomy shared by every torrentmate crate.
//!
//! Each fatal error aborts processing of one folder only. [`FolderError`]
//! pairs the failure with the folder it belongs to so batch callers can
//! report it without re-running anything.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while processing a release folder.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The folder contains no file with a known media-container extension.
    #[error("no media file found in {}", folder.display())]
    NoMediaFileFound { folder: PathBuf },

    /// The technical analyzer is not installed, crashed, or timed out.
    #[error("analyzer unavailable: {tool}: {message}")]
    AnalyzerUnavailable { tool: String, message: String },

    /// The analyzer succeeded but its output is not a usable report.
    #[error("malformed technical report for {}: {message}", file.display())]
    MalformedTechnicalReport { file: PathBuf, message: String },

    /// Normalizing the folder name left nothing usable as a title.
    #[error("no usable title can be derived from {}", folder.display())]
    EmptyTitle { folder: PathBuf },

    /// An artifact tool (e.g. mktorrent) is missing or failed.
    #[error("tool execution failed: {tool}: {message}")]
    Tool { tool: String, message: String },

    /// Another folder of the same batch already produced this naming token,
    /// so its artifact paths are taken.
    #[error("naming token {token:?} already used by {}", first.display())]
    DuplicateToken { token: String, first: PathBuf },

    /// An I/O operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Discriminant of [`Error`], for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    NoMediaFileFound,
    AnalyzerUnavailable,
    MalformedTechnicalReport,
    EmptyTitle,
    Tool,
    DuplicateToken,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoMediaFileFound => "NoMediaFileFound",
            Self::AnalyzerUnavailable => "AnalyzerUnavailable",
            Self::MalformedTechnicalReport => "MalformedTechnicalReport",
            Self::EmptyTitle => "EmptyTitle",
            Self::Tool => "Tool",
            Self::DuplicateToken => "DuplicateToken",
            Self::Io => "Io",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Create a NoMediaFileFound error.
    pub fn no_media_file(folder: impl Into<PathBuf>) -> Self {
        Self::NoMediaFileFound {
            folder: folder.into(),
        }
    }

    /// Create an AnalyzerUnavailable error.
    pub fn analyzer_unavailable(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AnalyzerUnavailable {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a MalformedTechnicalReport error.
    pub fn malformed_report(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedTechnicalReport {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an EmptyTitle error.
    pub fn empty_title(folder: impl Into<PathBuf>) -> Self {
        Self::EmptyTitle {
            folder: folder.into(),
        }
    }

    /// Create a tool error.
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a DuplicateToken error pointing at the folder that claimed `token` first.
    pub fn duplicate_token(token: impl Into<String>, first: impl Into<PathBuf>) -> Self {
        Self::DuplicateToken {
            token: token.into(),
            first: first.into(),
        }
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoMediaFileFound { .. } => ErrorKind::NoMediaFileFound,
            Self::AnalyzerUnavailable { .. } => ErrorKind::AnalyzerUnavailable,
            Self::MalformedTechnicalReport { .. } => ErrorKind::MalformedTechnicalReport,
            Self::EmptyTitle { .. } => ErrorKind::EmptyTitle,
            Self::Tool { .. } => ErrorKind::Tool,
            Self::DuplicateToken { .. } => ErrorKind::DuplicateToken,
            Self::Io { .. } => ErrorKind::Io,
        }
    }
}

/// A fatal error bound to the folder whose processing it aborted.
#[derive(Debug, thiserror::Error)]
#[error("{} [{}]: {source}", folder.display(), source.kind())]
pub struct FolderError {
    /// The release folder being processed.
    pub folder: PathBuf,
    /// The underlying failure.
    #[source]
    pub source: Error,
}

impl FolderError {
    pub fn new(folder: impl Into<PathBuf>, source: Error) -> Self {
        Self {
            folder: folder.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}
