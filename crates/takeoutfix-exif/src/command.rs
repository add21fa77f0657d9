//! Running exiftool.
//!
//! Everything that needs exiftool goes through [`CommandRunner`], so the
//! parsing and decision logic can be exercised with canned output.

use crate::output::{first_error_line, has_error_line};
use crate::tools::resolve_exiftool;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs exiftool with an argument list and returns its combined output.
///
/// Implementations return stdout followed by stderr as one string. A
/// process that cannot be started is an error. So is one that exits
/// unsuccessfully without an `Error:` line for the caller to parse.
pub trait CommandRunner: Send + Sync {
    /// Run the tool with `args`.
    fn run(&self, args: &[String]) -> Result<String>;
}

impl<F> CommandRunner for F
where
    F: Fn(&[String]) -> Result<String> + Send + Sync,
{
    fn run(&self, args: &[String]) -> Result<String> {
        self(args)
    }
}

/// A [`CommandRunner`] that spawns the exiftool executable.
///
/// # Example
///
/// ```no_run
/// use takeoutfix_exif::{CommandRunner, ExifTool};
///
/// let exiftool = ExifTool::discover(None)?;
/// let output = exiftool.run(&["-ver".to_string()])?;
/// println!("exiftool {}", output.trim());
/// # Ok::<(), takeoutfix_exif::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    /// Use the executable at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate exiftool, preferring `config_path`.
    pub fn discover(config_path: Option<&Path>) -> Result<Self> {
        resolve_exiftool(config_path).map(Self::new)
    }

    /// Path of the executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }
}

impl CommandRunner for ExifTool {
    fn run(&self, args: &[String]) -> Result<String> {
        let program_name = self.program_name();
        tracing::trace!("Running {} {:?}", program_name, args);

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(program_name.clone())
                } else {
                    Error::Io(e)
                }
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            // exiftool exits 1 when it cannot identify a file and says why on
            // an `Error:` line; that output is still an answer.
            if has_error_line(&combined) {
                tracing::debug!(
                    "{} exited with {}: {}",
                    program_name,
                    output.status,
                    first_error_line(&combined)
                );
                return Ok(combined);
            }
            return Err(Error::tool_failed(
                program_name,
                format!("exited with {}: {}", output.status, combined.trim()),
            ));
        }

        Ok(combined)
    }
}
