//! Path utilities for detecting photo and video files by extension.
//!
//! The supported list is deliberately broad: it answers "is this plausibly a
//! photo or video from an export", not "what type is it really". The real
//! type always comes from exiftool.

use crate::extension::extension_of;
use std::path::Path;

/// Extensions of files that may be photos or videos.
const SUPPORTED_MEDIA_EXTENSIONS: &[&str] = &[
    // Images
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tif", ".tiff", ".webp", ".heic", ".heif", ".avif",
    // Camera raw
    ".dng", ".cr2", ".nef", ".arw",
    // Video
    ".mp4", ".mov", ".m4v", ".3gp", ".avi", ".mkv", ".mts", ".m2ts", ".wmv", ".webm",
];

/// Check if a path has a supported photo or video extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use takeoutfix_common::paths::is_supported_media;
///
/// assert!(is_supported_media(Path::new("IMG_0001.jpg")));
/// assert!(is_supported_media(Path::new("/takeout/Photos/VID_0002.MP4")));
/// assert!(!is_supported_media(Path::new("IMG_0001.jpg.json")));
/// ```
pub fn is_supported_media(path: &Path) -> bool {
    let ext = extension_of(path);
    !ext.is_empty() && SUPPORTED_MEDIA_EXTENSIONS.contains(&ext.as_str())
}

/// Get the list of supported media extensions.
///
/// # Examples
///
/// ```
/// use takeoutfix_common::paths::supported_media_extensions;
///
/// let extensions = supported_media_extensions();
/// assert!(extensions.contains(&".heic"));
/// assert!(extensions.contains(&".mp4"));
/// ```
#[must_use]
pub fn supported_media_extensions() -> &'static [&'static str] {
    SUPPORTED_MEDIA_EXTENSIONS
}
