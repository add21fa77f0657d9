//! File type detection.

use crate::command::CommandRunner;
use crate::output::parse_file_type_extension;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Build the exiftool arguments that print a file's type extension.
///
/// exiftool does not treat `--` as an end-of-options marker, so a path that
/// would look like an option is anchored to the current directory instead.
pub fn file_type_args(path: &Path) -> Result<Vec<String>> {
    let text = path
        .to_str()
        .ok_or_else(|| Error::invalid_input(format!("path is not valid UTF-8: {:?}", path)))?;
    if text.is_empty() {
        return Err(Error::invalid_input("empty path"));
    }

    let target = if text.starts_with('-') {
        PathBuf::from(".").join(path).to_string_lossy().to_string()
    } else {
        text.to_string()
    };

    Ok(vec!["-s3".to_string(), "-FileTypeExtension".to_string(), target])
}

/// Ask exiftool for the extension matching the real type of `path`.
///
/// Returns the extension token (for example `.heic`), or an empty string if
/// exiftool could not determine the type. An empty result is not an error.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if no runner is given or the path is empty.
/// - Any error of the runner, unchanged.
///
/// # Example
///
/// ```no_run
/// use takeoutfix_exif::{get_new_extension, CommandRunner, ExifTool};
/// use std::path::Path;
///
/// let exiftool = ExifTool::discover(None)?;
/// let ext = get_new_extension(Path::new("IMG_0001.jpg"), Some(&exiftool as &dyn CommandRunner))?;
/// if ext.is_empty() {
///     println!("type undetermined");
/// }
/// # Ok::<(), takeoutfix_exif::Error>(())
/// ```
pub fn get_new_extension(path: &Path, runner: Option<&dyn CommandRunner>) -> Result<String> {
    let runner = runner.ok_or_else(|| Error::invalid_input("no command runner"))?;
    let args = file_type_args(path)?;

    let output = runner.run(&args)?;
    let ext = parse_file_type_extension(&output);
    if ext.is_empty() {
        tracing::debug!("exiftool could not determine the type of {:?}", path);
    }
    Ok(ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn returns_detected_extension_without_double_dash() {
        let seen = Mutex::new(Vec::new());
        let runner = |args: &[String]| -> Result<String> {
            *seen.lock().unwrap() = args.to_vec();
            Ok(".jpg\n".to_string())
        };

        let ext = get_new_extension(Path::new("photo.jpg"), Some(&runner)).unwrap();
        assert_eq!(ext, ".jpg");

        let args = seen.lock().unwrap();
        assert!(!args.iter().any(|a| a == "--"), "unexpected -- in {args:?}");
        assert_eq!(args.last().map(String::as_str), Some("photo.jpg"));
    }

    #[test]
    fn requires_runner() {
        let err = get_new_extension(Path::new("photo.jpg"), None).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rejects_empty_path() {
        let runner = |_: &[String]| -> Result<String> { Ok("JPG\n".to_string()) };
        let err = get_new_extension(Path::new(""), Some(&runner)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn propagates_runner_error() {
        let runner =
            |_: &[String]| -> Result<String> { Err(Error::tool_failed("exiftool", "boom")) };
        let err = get_new_extension(Path::new("photo.jpg"), Some(&runner)).unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn error_only_output_is_undetermined() {
        let runner =
            |_: &[String]| -> Result<String> { Ok("Error: Unknown file type\n".to_string()) };
        let ext = get_new_extension(Path::new("photo.jpg"), Some(&runner)).unwrap();
        assert_eq!(ext, "");
    }

    #[test]
    fn option_like_paths_are_anchored() {
        let args = file_type_args(Path::new("-dash.jpg")).unwrap();
        assert_eq!(args.last().map(String::as_str), Some("./-dash.jpg"));
        assert!(!args.iter().any(|a| a == "--"));

        let args = file_type_args(Path::new("/abs/-dash.jpg")).unwrap();
        assert_eq!(args.last().map(String::as_str), Some("/abs/-dash.jpg"));
    }
}
