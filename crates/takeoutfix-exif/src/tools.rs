//! ExifTool discovery.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Executable name looked up on `PATH`.
pub const EXIFTOOL: &str = "exiftool";

/// Environment variable that overrides `PATH` lookup.
pub const EXIFTOOL_PATH_ENV: &str = "EXIFTOOL_PATH";

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

/// Check if a tool is available using the given version argument.
///
/// # Example
///
/// ```no_run
/// use takeoutfix_exif::tools::check_tool;
///
/// let info = check_tool("exiftool", "-ver");
/// if info.available {
///     println!("exiftool version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(program: impl AsRef<Path>, version_arg: &str) -> ToolInfo {
    let program = program.as_ref();
    let name = program
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| program.to_string_lossy().to_string());

    match Command::new(program).arg(version_arg).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.trim().to_string());

            ToolInfo {
                name,
                available: true,
                version,
                path: which::which(program).ok(),
            }
        }
        _ => ToolInfo {
            name,
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check exiftool, honouring the same lookup order as [`resolve_exiftool`].
pub fn check_exiftool(config_path: Option<&Path>) -> ToolInfo {
    match resolve_exiftool(config_path) {
        Ok(path) => check_tool(path, "-ver"),
        Err(_) => ToolInfo {
            name: EXIFTOOL.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Locate the exiftool executable.
///
/// Lookup order: the configured path when it exists, then the
/// `EXIFTOOL_PATH` environment variable, then `PATH`.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] if no candidate exists.
pub fn resolve_exiftool(config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        tracing::warn!("Configured exiftool path does not exist: {:?}", path);
    }

    if let Some(path) = std::env::var_os(EXIFTOOL_PATH_ENV).map(PathBuf::from) {
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!("{} points to a missing file: {:?}", EXIFTOOL_PATH_ENV, path);
    }

    which::which(EXIFTOOL).map_err(|_| Error::tool_not_found(EXIFTOOL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tool_not_found() {
        let info = check_tool("nonexistent_tool_12345", "-ver");
        assert!(!info.available);
        assert_eq!(info.name, "nonexistent_tool_12345");
        assert!(info.version.is_none());
        assert!(info.path.is_none());
    }

    #[test]
    fn test_resolve_prefers_existing_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("exiftool");
        std::fs::write(&fake, b"#!/bin/sh\n").unwrap();

        let resolved = resolve_exiftool(Some(fake.as_path())).unwrap();
        assert_eq!(resolved, fake);
    }
}
