//! # torrentmate-av
//!
//! Technical analysis of release media files.
//!
//! This crate provides functionality for:
//! - Selecting the representative media file of a release folder
//! - Running an external analyzer (mediainfo) against it
//! - Converting the analyzer's raw report into [`TechnicalMetadata`]
//! - Detecting external tools on `PATH`
//!
//! ## Example
//!
//! ```no_run
//! use torrentmate_av::{analyze_folder, parse_report, MediaInfoAnalyzer};
//! use torrentmate_common::{paths::media_extensions, MediaFolder};
//!
//! # async fn run() -> torrentmate_common::Result<()> {
//! let folder = MediaFolder::open("/releases/Inception (2010)")?;
//! let extensions: Vec<String> = media_extensions().iter().map(|e| e.to_string()).collect();
//! let report = analyze_folder(&MediaInfoAnalyzer::new(), &folder, &extensions).await?;
//! let technical = parse_report(&report)?;
//! println!("{} {}", technical.resolution, technical.video_codec);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod codec;
pub mod command;
pub mod language;
pub mod model;
pub mod report;
pub mod tools;

// Re-exports
pub use analyzer::{analyze_folder, Analyzer, MediaInfoAnalyzer, RawTechnicalReport};
pub use command::{ToolCommand, ToolOutput};
pub use model::{Resolution, SourceHint, TechnicalDetails, TechnicalMetadata, VideoCodec};
pub use report::parse_report;
pub use tools::{check_tool, check_tools, get_tool_path, require_tool, ToolInfo};
