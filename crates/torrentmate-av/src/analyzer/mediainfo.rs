//! MediaInfo analyzer backend.

use super::{Analyzer, RawTechnicalReport};
use crate::command::{ToolCommand, DEFAULT_TIMEOUT};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use torrentmate_common::{Error, Result};

/// Runs `mediainfo --Output=JSON <file>`.
#[derive(Debug, Clone)]
pub struct MediaInfoAnalyzer {
    program: PathBuf,
    timeout: Duration,
}

impl MediaInfoAnalyzer {
    /// Tool name used in errors.
    pub const TOOL: &'static str = "mediainfo";

    /// Use `mediainfo` from `PATH` with the default timeout.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(Self::TOOL),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a specific executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Bound each invocation.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for MediaInfoAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Analyzer for MediaInfoAnalyzer {
    fn name(&self) -> &str {
        Self::TOOL
    }

    async fn analyze(&self, file: &Path) -> Result<RawTechnicalReport> {
        let output = ToolCommand::new(&self.program)
            .arg("--Output=JSON")
            .arg(file)
            .timeout(self.timeout)
            .execute()
            .await
            .map_err(|e| match e {
                Error::Tool { message, .. } => Error::analyzer_unavailable(Self::TOOL, message),
                other => other,
            })?;

        Ok(RawTechnicalReport {
            file: file.to_path_buf(),
            tool: Self::TOOL.to_string(),
            output: output.stdout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_missing_tool_is_analyzer_unavailable() {
        let analyzer = MediaInfoAnalyzer::new().with_program("nonexistent_mediainfo_12345");
        let err = analyzer
            .analyze(Path::new("/tmp/movie.mkv"))
            .await
            .unwrap_err();
        assert_matches!(err, Error::AnalyzerUnavailable { ref tool, .. } if tool == "mediainfo");
    }

    #[cfg(unix)]
    fn script(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-mediainfo");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_output_returned_unmodified() {
        let temp = tempfile::tempdir().unwrap();
        let program = script(temp.path(), r#"echo '{"media":{"track":[]}}'"#);

        let report = MediaInfoAnalyzer::new()
            .with_program(program)
            .analyze(Path::new("/rel/movie.mkv"))
            .await
            .unwrap();

        assert_eq!(report.output.trim(), r#"{"media":{"track":[]}}"#);
        assert_eq!(report.tool, "mediainfo");
        assert_eq!(report.file, PathBuf::from("/rel/movie.mkv"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_analyzer_unavailable() {
        let temp = tempfile::tempdir().unwrap();
        let program = script(temp.path(), "echo boom >&2\nexit 3");

        let err = MediaInfoAnalyzer::new()
            .with_program(program)
            .analyze(Path::new("/rel/movie.mkv"))
            .await
            .unwrap_err();

        assert_matches!(err, Error::AnalyzerUnavailable { ref message, .. } if message.contains("boom"));
    }
}
