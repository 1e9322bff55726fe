use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use torrentmate_common::paths::media_extensions;
use torrentmate_parser::Precedence;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub torrent: TorrentConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    /// Path to the mediainfo executable (looked up on PATH if unset)
    #[serde(default)]
    pub mediainfo_path: Option<PathBuf>,

    /// Seconds before an analyzer run is abandoned
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl AnalyzerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            mediainfo_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// File extensions treated as media files (without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    media_extensions().iter().map(|e| e.to_string()).collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Whether a parenthesized year or a season marker wins when both appear
    #[serde(default)]
    pub precedence: Precedence,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NamingConfig {
    /// Label used instead of the joined language list when a release has
    /// more than one audio language (e.g. "MULTI")
    #[serde(default)]
    pub multi_language_label: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory receiving the generated files (current directory if unset)
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub nfo: bool,

    #[serde(default = "default_true")]
    pub bbcode: bool,

    #[serde(default = "default_true")]
    pub torrent: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            nfo: true,
            bbcode: true,
            torrent: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TorrentConfig {
    /// Path to the mktorrent executable (looked up on PATH if unset)
    #[serde(default)]
    pub mktorrent_path: Option<PathBuf>,

    #[serde(default = "default_tracker")]
    pub tracker: String,

    /// Piece length as a power of two (24 = 16 MiB)
    #[serde(default = "default_piece_length")]
    pub piece_length: u8,
}

fn default_tracker() -> String {
    "http://tracker.example.com:6969/announce".to_string()
}

fn default_piece_length() -> u8 {
    24
}

impl Default for TorrentConfig {
    fn default() -> Self {
        Self {
            mktorrent_path: None,
            tracker: default_tracker(),
            piece_length: default_piece_length(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Folders processed at the same time
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

fn default_parallelism() -> usize {
    num_cpus::get()
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
        }
    }
}
