//! Extensions exiftool can write metadata into.
//!
//! The list comes from `exiftool -listwf`. It is loaded once, on the first
//! query that names an extension, and the outcome is kept for the lifetime
//! of the registry. A failed load is never retried: every later query
//! returns the same error.

use crate::command::{CommandRunner, ExifTool};
use crate::{Error, Result};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use takeoutfix_common::normalize_extension;

/// Argument asking exiftool for its writable file types.
pub const LIST_WRITABLE_ARG: &str = "-listwf";

type Loader = Box<dyn Fn() -> Result<String> + Send + Sync>;

/// Lazily loaded set of writable extension tokens.
///
/// Concurrent first queries block until the single load finishes and then
/// all see the same result. After that, reads take no lock.
pub struct WritableRegistry {
    loader: Loader,
    state: OnceLock<std::result::Result<HashSet<String>, String>>,
}

impl std::fmt::Debug for WritableRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WritableRegistry")
            .field("loaded", &self.state.get().is_some())
            .finish()
    }
}

impl WritableRegistry {
    /// Create a registry whose list is produced by `loader`.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<String> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            state: OnceLock::new(),
        }
    }

    /// Create a registry that asks `runner` for `-listwf`.
    pub fn with_runner(runner: Arc<dyn CommandRunner>) -> Self {
        Self::new(move || runner.run(&[LIST_WRITABLE_ARG.to_string()]))
    }

    /// Check whether exiftool can write metadata into files with `ext`.
    ///
    /// `ext` may be given with or without the leading dot and in any case.
    /// An empty extension is never writable and does not trigger a load.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WritableListUnavailable`] if the list could not be
    /// loaded, now or on the earlier attempt.
    pub fn is_writable(&self, ext: &str) -> Result<bool> {
        let normalized = normalize_extension(ext);
        if normalized.is_empty() {
            return Ok(false);
        }

        let set = self.extensions()?;
        Ok(set.contains(&normalized))
    }

    /// Get the loaded set, loading it on first use.
    pub fn extensions(&self) -> Result<&HashSet<String>> {
        self.state
            .get_or_init(|| {
                tracing::debug!("Loading exiftool writable format list");
                match (self.loader)() {
                    Ok(output) => {
                        let set = parse_writable_extension_set(&output);
                        tracing::debug!("exiftool can write {} file types", set.len());
                        Ok(set)
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load exiftool writable format list: {}", e);
                        Err(e.to_string())
                    }
                }
            })
            .as_ref()
            .map_err(|message| Error::WritableListUnavailable(message.clone()))
    }
}

static GLOBAL: OnceLock<Arc<WritableRegistry>> = OnceLock::new();

/// Install the process-wide registry, backed by `runner`.
///
/// Only the first call installs a registry; later calls, and [`global`],
/// return the one already in place and `runner` is dropped.
pub fn init_global(runner: Arc<dyn CommandRunner>) -> Arc<WritableRegistry> {
    GLOBAL
        .get_or_init(|| Arc::new(WritableRegistry::with_runner(runner)))
        .clone()
}

/// Get the process-wide registry.
///
/// If none was installed, one backed by the discovered exiftool is. A
/// missing exiftool then surfaces as the cached load error.
pub fn global() -> Arc<WritableRegistry> {
    GLOBAL
        .get_or_init(|| {
            Arc::new(WritableRegistry::new(|| {
                ExifTool::discover(None)?.run(&[LIST_WRITABLE_ARG.to_string()])
            }))
        })
        .clone()
}

/// Check whether exiftool can write metadata into files with `ext`, using
/// the process-wide registry.
pub fn is_writable_extension(ext: &str) -> Result<bool> {
    global().is_writable(ext)
}

/// Parse the output of `exiftool -listwf` into extension tokens.
///
/// The output mixes a prose header with the format codes. A token counts as
/// a format code only if, after trimming punctuation, it is upper-case
/// ASCII letters and digits with at least one letter.
pub fn parse_writable_extension_set(output: &str) -> HashSet<String> {
    output
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| " \t\r\n,;:()[]{}".contains(c)))
        .filter(|token| is_writable_token(token))
        .map(|token| format!(".{}", token.to_ascii_lowercase()))
        .collect()
}

fn is_writable_token(token: &str) -> bool {
    let mut has_letter = false;
    for c in token.chars() {
        match c {
            'A'..='Z' => has_letter = true,
            '0'..='9' => {}
            _ => return false,
        }
    }
    has_letter
}
