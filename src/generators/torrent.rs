//! Torrent creation through mktorrent.

use std::path::{Path, PathBuf};
use std::time::Duration;
use torrentmate_av::ToolCommand;
use torrentmate_common::Result;
use tracing::info;

/// mktorrent hashes whole releases; give it far longer than the analyzer.
const MKTORRENT_TIMEOUT: Duration = Duration::from_secs(6 * 60 * 60);

#[derive(Debug, Clone)]
pub struct TorrentSettings {
    /// mktorrent executable
    pub program: PathBuf,
    /// Announce URL
    pub tracker: String,
    /// Piece length exponent (24 = 16 MiB)
    pub piece_length: u8,
}

impl Default for TorrentSettings {
    fn default() -> Self {
        Self {
            program: PathBuf::from("mktorrent"),
            tracker: "http://tracker.example.com:6969/announce".to_string(),
            piece_length: 24,
        }
    }
}

/// Build the mktorrent invocation for `folder`.
pub fn mktorrent_command(settings: &TorrentSettings, folder: &Path, output: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(&settings.program);
    cmd.arg("-v")
        .arg("-l")
        .arg(settings.piece_length.to_string())
        .arg("-a")
        .arg(&settings.tracker)
        .arg("-o")
        .arg(output)
        .arg(folder)
        .timeout(MKTORRENT_TIMEOUT);
    cmd
}

/// Create `output` from the contents of `folder`.
///
/// # Errors
///
/// Returns a tool error if mktorrent is missing, fails or times out.
pub async fn create_torrent(settings: &TorrentSettings, folder: &Path, output: &Path) -> Result<()> {
    info!("Creating torrent {:?}", output);
    mktorrent_command(settings, folder, output).execute().await?;
    Ok(())
}
