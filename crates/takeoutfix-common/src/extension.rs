//! Extension token normalization.
//!
//! An extension token is always lower-case and `.`-prefixed. The empty
//! string is the "unknown" token and is never prefixed.

use std::path::Path;

/// Normalize an extension to its token form.
///
/// Surrounding whitespace is trimmed, the result is lower-cased and a leading
/// `.` is added when missing.
///
/// # Examples
///
/// ```
/// use takeoutfix_common::normalize_extension;
///
/// assert_eq!(normalize_extension("JPG"), ".jpg");
/// assert_eq!(normalize_extension(".Mp4"), ".mp4");
/// assert_eq!(normalize_extension("   "), "");
/// ```
pub fn normalize_extension(ext: &str) -> String {
    let lowered = ext.trim().to_lowercase();
    if lowered.is_empty() || lowered.starts_with('.') {
        lowered
    } else {
        format!(".{lowered}")
    }
}

/// Get the normalized extension token of a path, or `""` if it has none.
///
/// The extension runs from the last `.` of the file name, so a name that
/// is only a dot and an extension, such as `.jpg`, has one.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use takeoutfix_common::extension_of;
///
/// assert_eq!(extension_of(Path::new("/takeout/IMG_0001.JPG")), ".jpg");
/// assert_eq!(extension_of(Path::new("README")), "");
/// assert_eq!(extension_of(Path::new("albums/.jpg")), ".jpg");
/// ```
pub fn extension_of(path: &Path) -> String {
    let Some(name) = path.file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();
    name.rfind('.')
        .map(|dot| normalize_extension(&name[dot..]))
        .unwrap_or_default()
}
