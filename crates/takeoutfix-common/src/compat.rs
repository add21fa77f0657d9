//! Extension compatibility classes.
//!
//! Some containers are commonly stored under more than one extension. A file
//! whose detected type and current extension fall in the same class is left
//! alone.

use crate::extension::normalize_extension;

/// Extensions considered interchangeable. Classes are disjoint.
const COMPATIBILITY_CLASSES: &[&[&str]] = &[
    &[".jpg", ".jpeg", ".jpe"],
    &[".tif", ".tiff"],
    &[".heic", ".heif"],
    &[".mov", ".mp4", ".m4v"],
    &[".mts", ".m2ts"],
];

fn class_of(token: &str) -> Option<&'static [&'static str]> {
    COMPATIBILITY_CLASSES
        .iter()
        .copied()
        .find(|class| class.contains(&token))
}

/// Check whether two extensions name the same kind of file.
///
/// Both inputs are normalized first, so case and the leading dot do not
/// matter. Extensions outside every class are only compatible with
/// themselves.
///
/// # Examples
///
/// ```
/// use takeoutfix_common::are_extensions_compatible;
///
/// assert!(are_extensions_compatible(".jpg", ".jpeg"));
/// assert!(are_extensions_compatible("MOV", ".mp4"));
/// assert!(!are_extensions_compatible(".jpg", ".png"));
/// ```
pub fn are_extensions_compatible(a: &str, b: &str) -> bool {
    let a = normalize_extension(a);
    let b = normalize_extension(b);
    if a == b {
        return true;
    }

    match class_of(&a) {
        Some(class) => class.contains(&b.as_str()),
        None => false,
    }
}

/// Get the compatibility classes.
#[must_use]
pub fn compatibility_classes() -> &'static [&'static [&'static str]] {
    COMPATIBILITY_CLASSES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_are_extensions_compatible() {
        assert!(are_extensions_compatible(".jpg", ".jpeg"));
        assert!(are_extensions_compatible(".mov", ".mp4"));
        assert!(are_extensions_compatible(".PNG", ".png"));
        assert!(!are_extensions_compatible(".jpg", ".png"));
    }

    #[test]
    fn test_dot_and_case_insensitive() {
        assert!(are_extensions_compatible("JPEG", "jpg"));
        assert!(are_extensions_compatible("tiff", ".TIF"));
        assert!(are_extensions_compatible(".Heif", "heic"));
        assert!(are_extensions_compatible("xyz", ".XYZ"));
    }

    #[test]
    fn test_classes_do_not_leak() {
        assert!(!are_extensions_compatible(".mp4", ".heic"));
        assert!(!are_extensions_compatible(".jpeg", ".tiff"));
        assert!(!are_extensions_compatible(".mts", ".mov"));
    }

    #[test]
    fn test_empty_tokens() {
        assert!(are_extensions_compatible("", ""));
        assert!(!are_extensions_compatible("", ".jpg"));
    }

    #[test]
    fn test_classes_are_disjoint_and_normalized() {
        let mut seen = HashSet::new();
        for class in compatibility_classes() {
            for token in *class {
                assert_eq!(normalize_extension(token), *token);
                assert!(seen.insert(*token), "{token} appears in two classes");
            }
        }
    }
}
