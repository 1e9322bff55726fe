//! External tool detection and management.

use std::path::{Path, PathBuf};
use std::process::Command;
use torrentmate_common::{Error, Result};

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available and get its information.
///
/// # Example
///
/// ```no_run
/// use torrentmate_av::check_tool;
///
/// let info = check_tool("mediainfo");
/// if info.available {
///     println!("mediainfo version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(name: &str) -> ToolInfo {
    check_tool_with_arg(name, "--version")
}

/// Check if a tool is available using a custom version argument.
///
/// Some tools (mktorrent) print their banner but exit non-zero when asked
/// for help, so any process that starts and writes output counts as present.
pub fn check_tool_with_arg(name: &str, version_arg: &str) -> ToolInfo {
    let result = Command::new(name).arg(version_arg).output();

    match result {
        Ok(output) if output.status.success() || !output.stdout.is_empty() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .find(|l| !l.trim().is_empty())
                .map(|s| s.trim().to_string());

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path: which::which(name).ok(),
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check the tools torrentmate shells out to: mediainfo and mktorrent.
pub fn check_tools() -> Vec<ToolInfo> {
    vec![check_tool("mediainfo"), check_tool_with_arg("mktorrent", "-h")]
}

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns a tool error if the executable is not on `PATH`.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool(name, "not found in PATH"))
}

/// Get the path to a tool, preferring a configured path over PATH lookup.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        tracing::warn!(
            "Configured path for {} does not exist: {:?}, falling back to PATH",
            name,
            path
        );
    }

    require_tool(name)
}
