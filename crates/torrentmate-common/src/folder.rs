//! Read-only view of a release folder.
//!
//! A [`MediaFolder`] is captured once per run: the absolute path plus a
//! recursive listing sorted by path, so every consumer sees the same entries
//! in the same order.

use crate::paths::has_extension_in;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One entry of a folder listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    /// Path relative to the folder root.
    pub relative_path: PathBuf,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl FolderEntry {
    /// Final component of the entry's path.
    pub fn file_name(&self) -> String {
        self.relative_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A release directory and its listing.
#[derive(Debug, Clone)]
pub struct MediaFolder {
    path: PathBuf,
    entries: Vec<FolderEntry>,
}

impl MediaFolder {
    /// Read a folder from disk.
    ///
    /// The path is made absolute and the whole tree is listed. Unreadable
    /// entries below the root are skipped with a warning; an unreadable or
    /// non-directory root is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path = std::fs::canonicalize(path).map_err(|e| Error::io(path, e))?;

        if !path.is_dir() {
            return Err(Error::io(&path, std::io::Error::other("not a directory")));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&path)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable entry in {:?}: {}", path, e);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if !file_type.is_dir() && !file_type.is_file() {
                continue;
            }

            let size = if file_type.is_file() {
                entry.metadata().map(|m| m.len()).unwrap_or(0)
            } else {
                0
            };

            let relative_path = entry
                .path()
                .strip_prefix(&path)
                .unwrap_or(entry.path())
                .to_path_buf();

            entries.push(FolderEntry {
                relative_path,
                size,
                is_dir: file_type.is_dir(),
            });
        }

        debug!("Listed {} entries in {:?}", entries.len(), path);
        Ok(Self::from_parts(path, entries))
    }

    /// Build a folder from an already known listing. Entries are sorted by path.
    pub fn from_parts(path: impl Into<PathBuf>, mut entries: Vec<FolderEntry>) -> Self {
        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Self {
            path: path.into(),
            entries,
        }
    }

    /// Absolute path of the folder.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The folder's own name (last path component).
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// All entries, sorted by relative path.
    pub fn entries(&self) -> &[FolderEntry] {
        &self.entries
    }

    /// Regular files whose extension is in `extensions`.
    pub fn media_files<'a, S: AsRef<str>>(
        &'a self,
        extensions: &'a [S],
    ) -> impl Iterator<Item = &'a FolderEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| !e.is_dir && has_extension_in(&e.relative_path, extensions))
    }

    /// Subdirectories at any depth.
    pub fn directories(&self) -> impl Iterator<Item = &FolderEntry> {
        self.entries.iter().filter(|e| e.is_dir)
    }

    /// Absolute path of the largest media file.
    ///
    /// Equal sizes resolve to the lexically first path.
    pub fn largest_media_file<S: AsRef<str>>(&self, extensions: &[S]) -> Option<PathBuf> {
        self.media_files(extensions)
            .max_by(|a, b| {
                a.size
                    .cmp(&b.size)
                    .then_with(|| b.relative_path.cmp(&a.relative_path))
            })
            .map(|e| self.path.join(&e.relative_path))
    }
}
