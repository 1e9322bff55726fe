//! Folder processing: classification and analysis, reconciliation, naming.
//!
//! For each folder the listing is read on a blocking task, then the
//! classifier runs on another one while the analyzer subprocess runs
//! concurrently; both join before reconciliation. Batches
//! run folders concurrently up to a configured limit, and a failing folder
//! never affects the others.

use crate::config::Config;
use crate::generators::{Artifact, Generator};
use crate::naming::{build_token, NamingOptions, NamingToken};
use crate::reconcile::{reconcile, NormalizedMetadata};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use torrentmate_av::{analyze_folder, get_tool_path, parse_report, Analyzer, MediaInfoAnalyzer};
use torrentmate_common::{Error, FolderError, MediaFolder};
use torrentmate_parser::Classifier;
use tracing::{debug, info, warn};

/// A fully processed folder.
#[derive(Debug, Clone, Serialize)]
pub struct FolderOutcome {
    pub folder: PathBuf,
    pub token: NamingToken,
    pub metadata: NormalizedMetadata,
}

/// One folder of a batch, with the artifacts generated for it.
#[derive(Debug)]
pub struct BatchItem {
    pub folder: PathBuf,
    pub result: Result<FolderOutcome, FolderError>,
    pub artifacts: Vec<Artifact>,
}

impl BatchItem {
    /// The folder was processed and every artifact was written.
    pub fn is_success(&self) -> bool {
        self.result.is_ok() && self.artifacts.iter().all(Artifact::is_ok)
    }
}

/// The metadata engine.
#[derive(Clone)]
pub struct Engine {
    classifier: Arc<Classifier>,
    analyzer: Arc<dyn Analyzer>,
    extensions: Vec<String>,
    naming: NamingOptions,
}

impl Engine {
    pub fn new(
        classifier: Classifier,
        analyzer: Arc<dyn Analyzer>,
        extensions: Vec<String>,
        naming: NamingOptions,
    ) -> Self {
        Self {
            classifier: Arc::new(classifier),
            analyzer,
            extensions,
            naming,
        }
    }

    /// Engine backed by mediainfo, set up from `config`.
    pub fn from_config(config: &Config) -> Self {
        let program = get_tool_path(
            MediaInfoAnalyzer::TOOL,
            config.analyzer.mediainfo_path.as_deref(),
        )
        .unwrap_or_else(|e| {
            // A missing tool surfaces per folder as AnalyzerUnavailable.
            debug!("{}", e);
            config
                .analyzer
                .mediainfo_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(MediaInfoAnalyzer::TOOL))
        });

        let analyzer = MediaInfoAnalyzer::new()
            .with_program(program)
            .with_timeout(config.analyzer.timeout());

        let classifier = Classifier::new()
            .with_precedence(config.classifier.precedence)
            .with_extensions(config.scan.extensions.clone());

        Self::new(
            classifier,
            Arc::new(analyzer),
            config.scan.extensions.clone(),
            NamingOptions {
                multi_language_label: config.naming.multi_language_label.clone(),
            },
        )
    }

    /// Run one folder through the engine.
    ///
    /// # Errors
    ///
    /// Returns a [`FolderError`] carrying the folder path and one of:
    /// `Io` (unreadable folder), `EmptyTitle`, `NoMediaFileFound`,
    /// `AnalyzerUnavailable`, `MalformedTechnicalReport`.
    pub async fn process_folder(&self, path: &Path) -> Result<FolderOutcome, FolderError> {
        let listing = {
            let path = path.to_path_buf();
            tokio::task::spawn_blocking(move || MediaFolder::open(&path)).await
        };
        let folder = match listing {
            Ok(folder) => folder,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => MediaFolder::open(path),
        }
        .map_err(|e| FolderError::new(path, e))?;
        let folder = Arc::new(folder);
        let folder_path = folder.path().to_path_buf();
        info!("Processing {:?}", folder_path);

        let classify = {
            let classifier = Arc::clone(&self.classifier);
            let folder = Arc::clone(&folder);
            tokio::task::spawn_blocking(move || classifier.classify(&folder))
        };
        let analyze = async {
            let report = analyze_folder(self.analyzer.as_ref(), &folder, &self.extensions).await?;
            parse_report(&report)
        };

        let (classified, technical) = tokio::join!(classify, analyze);

        let identity = match classified {
            Ok(identity) => identity,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => self.classifier.classify(&folder),
        };
        debug!("Identity for {:?}: {:?}", folder_path, identity);

        // A folder without a usable name fails the same way whatever the analyzer found.
        if identity.title().is_empty() {
            return Err(FolderError::new(
                &folder_path,
                Error::empty_title(&folder_path),
            ));
        }

        let technical = technical.map_err(|e| FolderError::new(&folder_path, e))?;
        let metadata = reconcile(&folder_path, identity, technical)
            .map_err(|e| FolderError::new(&folder_path, e))?;
        let token = build_token(&metadata, &self.naming);
        info!("{:?} -> {}", folder_path, token);

        Ok(FolderOutcome {
            folder: folder_path,
            token,
            metadata,
        })
    }

    /// Process `folders` with at most `parallelism` in flight, generating
    /// artifacts for each successful one when a generator is given.
    ///
    /// Results come back in input order. Generation starts once every folder
    /// has its token; when several folders end up with the same token, the
    /// first in input order gets the artifacts and the others get a
    /// `DuplicateToken` error per artifact.
    pub async fn process_batch(
        &self,
        folders: Vec<PathBuf>,
        parallelism: usize,
        generator: Option<&Generator>,
    ) -> Vec<BatchItem> {
        let parallelism = parallelism.max(1);
        let processed: Vec<(PathBuf, Result<FolderOutcome, FolderError>)> = stream::iter(folders)
            .map(|folder| async move {
                let result = self.process_folder(&folder).await;
                if let Err(e) = &result {
                    warn!("{}", e);
                }
                (folder, result)
            })
            .buffered(parallelism)
            .collect()
            .await;

        let Some(generator) = generator else {
            return processed
                .into_iter()
                .map(|(folder, result)| BatchItem {
                    folder,
                    result,
                    artifacts: Vec::new(),
                })
                .collect();
        };

        let claims = claim_tokens(&processed);
        stream::iter(processed.into_iter().zip(claims))
            .map(|((folder, result), claim)| async move {
                let artifacts = match (&result, claim) {
                    (Ok(outcome), None) => {
                        generator
                            .generate(&outcome.folder, &outcome.metadata, &outcome.token)
                            .await
                    }
                    (Ok(outcome), Some(first)) => {
                        warn!(
                            "{:?} has the same token as {:?}, skipping its artifacts",
                            outcome.folder, first
                        );
                        generator.refuse(&outcome.token, &first)
                    }
                    (Err(_), _) => Vec::new(),
                };
                BatchItem {
                    folder,
                    result,
                    artifacts,
                }
            })
            .buffered(parallelism)
            .collect()
            .await
    }
}

/// For each processed folder, the earlier folder that already claimed its
/// token, if any.
///
/// Tokens are compared case-insensitively since artifact files may land on a
/// case-insensitive filesystem.
fn claim_tokens(
    processed: &[(PathBuf, Result<FolderOutcome, FolderError>)],
) -> Vec<Option<PathBuf>> {
    let mut owners: HashMap<String, &Path> = HashMap::new();
    processed
        .iter()
        .map(|(_, result)| {
            let outcome = result.as_ref().ok()?;
            let key = outcome.token.as_str().to_lowercase();
            match owners.get(&key) {
                Some(first) => Some(first.to_path_buf()),
                None => {
                    owners.insert(key, &outcome.folder);
                    None
                }
            }
        })
        .collect()
}
