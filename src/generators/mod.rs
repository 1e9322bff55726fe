//! Artifact generators.
//!
//! All three artifacts of a folder read the same [`NormalizedMetadata`] and
//! [`NamingToken`]. A failing artifact never prevents the others. Artifact
//! paths derive from the token alone, so one output directory holds at most
//! one folder per token.

mod bbcode;
mod nfo;
pub mod template;
mod torrent;

pub use bbcode::render_bbcode;
pub use nfo::render_nfo;
pub use template::TemplateContext;
pub use torrent::{create_torrent, mktorrent_command, TorrentSettings};

use crate::naming::NamingToken;
use crate::reconcile::NormalizedMetadata;
use std::fmt;
use std::path::{Path, PathBuf};
use torrentmate_common::{Error, Result};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Nfo,
    BbCode,
    Torrent,
}

impl ArtifactKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Nfo => "nfo",
            ArtifactKind::BbCode => "txt",
            ArtifactKind::Torrent => "torrent",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Nfo => write!(f, "NFO"),
            ArtifactKind::BbCode => write!(f, "BBCode"),
            ArtifactKind::Torrent => write!(f, "torrent"),
        }
    }
}

/// Result of generating one artifact.
#[derive(Debug)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub outcome: Result<()>,
}

impl Artifact {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Writes the artifacts of processed folders into one output directory.
#[derive(Debug, Clone)]
pub struct Generator {
    output_dir: PathBuf,
    nfo: bool,
    bbcode: bool,
    torrent: Option<TorrentSettings>,
}

impl Generator {
    /// NFO and BBCode into `output_dir`, no torrent.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            nfo: true,
            bbcode: true,
            torrent: None,
        }
    }

    pub fn with_nfo(mut self, enabled: bool) -> Self {
        self.nfo = enabled;
        self
    }

    pub fn with_bbcode(mut self, enabled: bool) -> Self {
        self.bbcode = enabled;
        self
    }

    pub fn with_torrent(mut self, settings: Option<TorrentSettings>) -> Self {
        self.torrent = settings;
        self
    }

    /// Path an artifact of `kind` would be written to.
    pub fn artifact_path(&self, token: &NamingToken, kind: ArtifactKind) -> PathBuf {
        self.output_dir.join(token.file_name(kind.extension()))
    }

    /// Generate every enabled artifact for `folder`.
    pub async fn generate(
        &self,
        folder: &Path,
        meta: &NormalizedMetadata,
        token: &NamingToken,
    ) -> Vec<Artifact> {
        let ctx = TemplateContext::from_metadata(meta, token);
        let mut artifacts = Vec::new();

        if self.nfo {
            let path = self.artifact_path(token, ArtifactKind::Nfo);
            let outcome = write_text(&path, &render_nfo(&ctx, meta.content_type()));
            artifacts.push(self.finish(ArtifactKind::Nfo, path, outcome));
        }

        if self.bbcode {
            let path = self.artifact_path(token, ArtifactKind::BbCode);
            let outcome = write_text(&path, &render_bbcode(&ctx, meta.content_type()));
            artifacts.push(self.finish(ArtifactKind::BbCode, path, outcome));
        }

        if let Some(settings) = &self.torrent {
            let path = self.artifact_path(token, ArtifactKind::Torrent);
            let outcome = create_torrent(settings, folder, &path).await;
            artifacts.push(self.finish(ArtifactKind::Torrent, path, outcome));
        }

        artifacts
    }

    /// Artifacts enabled on this generator, in generation order.
    pub fn kinds(&self) -> Vec<ArtifactKind> {
        let mut kinds = Vec::with_capacity(3);
        if self.nfo {
            kinds.push(ArtifactKind::Nfo);
        }
        if self.bbcode {
            kinds.push(ArtifactKind::BbCode);
        }
        if self.torrent.is_some() {
            kinds.push(ArtifactKind::Torrent);
        }
        kinds
    }

    /// Fail every enabled artifact of a folder whose `token` was already
    /// claimed by `first`, without touching the output directory.
    pub fn refuse(&self, token: &NamingToken, first: &Path) -> Vec<Artifact> {
        self.kinds()
            .into_iter()
            .map(|kind| {
                let outcome = Err(Error::duplicate_token(token.as_str(), first));
                self.finish(kind, self.artifact_path(token, kind), outcome)
            })
            .collect()
    }

    fn finish(&self, kind: ArtifactKind, path: PathBuf, outcome: Result<()>) -> Artifact {
        match &outcome {
            Ok(()) => info!("{} file created: {:?}", kind, path),
            Err(e) => warn!("Failed to create {} file {:?}: {}", kind, path, e),
        }
        Artifact {
            kind,
            path,
            outcome,
        }
    }
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::io(path, e))
}
