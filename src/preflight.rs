//! Preflight check for a directory before reconciling it.
//!
//! A directory is worth processing if it holds at least one file with a
//! supported photo or video extension. The walk stops at the first such
//! file, so the cost depends on where media shows up, not on tree size.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use takeoutfix_common::paths::is_supported_media;
use takeoutfix_common::Result;
use tracing::debug;
use walkdir::WalkDir;

/// An entry produced by a [`TreeWalker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Visits the entries of a directory tree.
pub trait TreeWalker {
    /// Call `visit` for every entry under `root`, stopping as soon as it
    /// returns [`ControlFlow::Break`].
    fn walk(
        &self,
        root: &Path,
        visit: &mut dyn FnMut(&WalkEntry) -> ControlFlow<()>,
    ) -> Result<()>;
}

/// [`TreeWalker`] over the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWalker {
    pub follow_links: bool,
}

impl TreeWalker for FsWalker {
    fn walk(
        &self,
        root: &Path,
        visit: &mut dyn FnMut(&WalkEntry) -> ControlFlow<()>,
    ) -> Result<()> {
        for entry in WalkDir::new(root).follow_links(self.follow_links) {
            let entry = entry?;
            let walk_entry = WalkEntry {
                path: entry.path().to_path_buf(),
                is_dir: entry.file_type().is_dir(),
            };
            if visit(&walk_entry).is_break() {
                break;
            }
        }
        Ok(())
    }
}

/// Check whether `path` contains any supported photo or video file.
///
/// # Errors
///
/// Returns the walk error if the tree cannot be read, including when `path`
/// does not exist.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// if takeoutfix::preflight::has_processable_takeout(Path::new("Takeout"))? {
///     println!("found media");
/// }
/// # Ok::<(), takeoutfix_common::Error>(())
/// ```
pub fn has_processable_takeout(path: &Path) -> Result<bool> {
    has_processable_takeout_with(path, &FsWalker::default())
}

/// Same as [`has_processable_takeout`], walking with `walker`.
pub fn has_processable_takeout_with(path: &Path, walker: &dyn TreeWalker) -> Result<bool> {
    let mut found = None;
    walker.walk(path, &mut |entry| {
        if !entry.is_dir && is_supported_media(&entry.path) {
            found = Some(entry.path.clone());
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    })?;

    match found {
        Some(media) => {
            debug!("Found media in {:?}: {:?}", path, media);
            Ok(true)
        }
        None => Ok(false),
    }
}
