mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;
use torrentmate_common::paths::ILLEGAL_FILENAME_CHARS;

/// Piece length exponents mktorrent accepts.
const PIECE_LENGTH_RANGE: std::ops::RangeInclusive<u8> = 15..=28;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./torrentmate.toml",
        "./config.toml",
        "~/.config/torrentmate/config.toml",
        "/etc/torrentmate/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.analyzer.timeout_secs == 0 {
        anyhow::bail!("Analyzer timeout cannot be 0");
    }

    if let Some(path) = &config.analyzer.mediainfo_path {
        if !path.exists() {
            tracing::warn!("Configured mediainfo path does not exist: {:?}", path);
        }
    }

    if config.scan.extensions.is_empty() {
        anyhow::bail!("At least one media extension is required");
    }
    if let Some(ext) = config
        .scan
        .extensions
        .iter()
        .find(|e| e.trim().is_empty() || e.starts_with('.'))
    {
        anyhow::bail!("Invalid media extension {:?} (expected e.g. \"mkv\")", ext);
    }

    if let Some(label) = &config.naming.multi_language_label {
        if label.trim().is_empty() {
            anyhow::bail!("naming.multi_language_label cannot be empty");
        }
        if label.contains(ILLEGAL_FILENAME_CHARS) {
            anyhow::bail!(
                "naming.multi_language_label {:?} contains characters not allowed in file names",
                label
            );
        }
    }

    if config.torrent.tracker.trim().is_empty() {
        anyhow::bail!("Torrent tracker URL cannot be empty");
    }
    if !PIECE_LENGTH_RANGE.contains(&config.torrent.piece_length) {
        anyhow::bail!(
            "Torrent piece length {} out of range ({}..={})",
            config.torrent.piece_length,
            PIECE_LENGTH_RANGE.start(),
            PIECE_LENGTH_RANGE.end()
        );
    }

    if config.batch.parallelism == 0 {
        anyhow::bail!("Batch parallelism cannot be 0");
    }

    Ok(())
}
