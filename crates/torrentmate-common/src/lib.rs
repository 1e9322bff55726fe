//! Torrentmate-Common: Shared types and utilities.
//!
//! This crate provides functionality used across torrentmate:
//!
//! - **Error Handling**: the per-folder error taxonomy and result alias
//! - **Media Folders**: a read-only, sorted listing of a release directory
//! - **Path Utilities**: media-container detection by extension
//!
//! # Examples
//!
//! ```
//! use torrentmate_common::paths::is_media_file;
//! use torrentmate_common::{Error, ErrorKind, Result};
//! use std::path::Path;
//!
//! assert!(is_media_file(Path::new("movie.mkv")));
//!
//! fn example() -> Result<()> {
//!     Err(Error::no_media_file("/releases/Empty (2020)"))
//! }
//! assert_eq!(example().unwrap_err().kind(), ErrorKind::NoMediaFileFound);
//! ```

pub mod error;
pub mod folder;
pub mod paths;

pub use error::{Error, ErrorKind, FolderError, Result};
pub use folder::{FolderEntry, MediaFolder};
