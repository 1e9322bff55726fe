//! Shared test harness: fake analyzer and release folder fixtures.

#![allow(dead_code)]

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use torrentmate::naming::NamingOptions;
use torrentmate::pipeline::Engine;
use torrentmate_av::{Analyzer, RawTechnicalReport};
use torrentmate_common::{Error, Result};
use torrentmate_parser::Classifier;

/// mediainfo JSON for a 1080p HEVC file with one English audio track.
pub const INCEPTION_REPORT: &str = r#"{"media":{"track":[
    {"@type":"General","Format":"Matroska","Duration":"8880.5","OverallBitRate":"8897423"},
    {"@type":"Video","Format":"HEVC","Width":"1920","Height":"1080"},
    {"@type":"Audio","Format":"E-AC-3","Channels":"6","Language":"en"}
]}}"#;

/// mediainfo JSON with nothing usable in it.
pub const EMPTY_REPORT: &str = r#"{"media":{"track":[{"@type":"General"}]}}"#;

/// Analyzer returning a canned report and counting its calls.
pub struct FakeAnalyzer {
    output: std::result::Result<String, String>,
    calls: AtomicUsize,
}

impl FakeAnalyzer {
    pub fn returning(output: &str) -> Self {
        Self {
            output: Ok(output.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            output: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Analyzer for FakeAnalyzer {
    fn name(&self) -> &str {
        "fake"
    }

    async fn analyze(&self, file: &Path) -> Result<RawTechnicalReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.output {
            Ok(output) => Ok(RawTechnicalReport {
                file: file.to_path_buf(),
                tool: "fake".to_string(),
                output: output.clone(),
            }),
            Err(message) => Err(Error::analyzer_unavailable("fake", message.clone())),
        }
    }
}

/// Engine with default settings around `analyzer`.
pub fn engine(analyzer: Arc<FakeAnalyzer>) -> Engine {
    engine_with(analyzer, Classifier::new().with_max_year(2026), NamingOptions::default())
}

pub fn engine_with(
    analyzer: Arc<FakeAnalyzer>,
    classifier: Classifier,
    naming: NamingOptions,
) -> Engine {
    let extensions = torrentmate_common::paths::media_extensions()
        .iter()
        .map(|e| e.to_string())
        .collect();
    Engine::new(classifier, analyzer, extensions, naming)
}

/// Create `root/name` holding `files` (relative path, size in bytes).
pub fn release(root: &TempDir, name: &str, files: &[(&str, usize)]) -> PathBuf {
    let dir = root.path().join(name);
    fs::create_dir_all(&dir).unwrap();
    for (file, size) in files {
        let path = dir.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, vec![0u8; *size]).unwrap();
    }
    dir
}

/// Write an executable shell script standing in for an external tool.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
