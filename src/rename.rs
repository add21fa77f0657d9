//! Collision-safe renaming to a corrected extension.
//!
//! Planning and applying are separate steps. A plan is computed against an
//! injected existence check; applying it never replaces an existing file.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use takeoutfix_common::{extension_of, normalize_extension, Error, Result};
use tracing::debug;

/// Default number of suffixed names tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 8;

const SUFFIX_LEN: usize = 5;
const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
// Largest multiple of the alphabet size that fits in a byte; bytes at or
// above it are dropped to keep the distribution uniform.
const SUFFIX_REJECT_AT: u8 = (256 / SUFFIX_ALPHABET.len() * SUFFIX_ALPHABET.len()) as u8;

/// A rename from `original` to `target`, where `target` carries `extension`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    pub original: PathBuf,
    pub extension: String,
    pub target: PathBuf,
}

impl RenamePlan {
    /// Whether the plan leaves the file where it is.
    pub fn is_noop(&self) -> bool {
        self.original == self.target
    }
}

/// Generate a 5 character `[a-z0-9]` suffix from the OS randomness source.
///
/// # Errors
///
/// Returns [`Error::RandomUnavailable`] if the OS source fails.
pub fn generate_random_suffix() -> Result<String> {
    let mut rng = OsRng;
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    let mut buf = [0u8; 16];

    while suffix.len() < SUFFIX_LEN {
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| Error::random_unavailable(e.to_string()))?;
        for byte in buf.iter().filter(|&&b| b < SUFFIX_REJECT_AT) {
            suffix.push(SUFFIX_ALPHABET[*byte as usize % SUFFIX_ALPHABET.len()] as char);
            if suffix.len() == SUFFIX_LEN {
                break;
            }
        }
    }

    Ok(suffix)
}

/// Plans renames with a bounded number of suffix attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenamePlanner {
    max_attempts: usize,
}

impl Default for RenamePlanner {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RenamePlanner {
    /// Create a planner trying at most `max_attempts` suffixed names.
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    /// Number of suffixed names tried after the plain name collides.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Plan renaming `path` to carry `new_ext`.
    ///
    /// The plain target keeps the directory and file stem. If `exists`
    /// reports it taken, `-xxxxx` is appended to the stem with a fresh random
    /// suffix per attempt. A target equal to `path` yields a no-op plan.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for an empty extension or a path without a
    ///   file name.
    /// - [`Error::RenameExhausted`] if every attempted name is taken.
    /// - [`Error::RandomUnavailable`] if no suffix can be generated.
    pub fn plan<F>(&self, path: &Path, new_ext: &str, exists: F) -> Result<RenamePlan>
    where
        F: Fn(&Path) -> bool,
    {
        let extension = normalize_extension(new_ext);
        if extension.is_empty() {
            return Err(Error::invalid_input("empty target extension"));
        }

        let make_plan = |target: PathBuf| RenamePlan {
            original: path.to_path_buf(),
            extension: extension.clone(),
            target,
        };

        let naive = target_path(path, &extension, None)?;
        if naive == path || !exists(&naive) {
            return Ok(make_plan(naive));
        }
        debug!("{:?} is taken, trying suffixed names", naive);

        for _ in 0..self.max_attempts {
            let suffix = generate_random_suffix()?;
            let candidate = target_path(path, &extension, Some(&suffix))?;
            if !exists(&candidate) {
                return Ok(make_plan(candidate));
            }
        }

        Err(Error::rename_exhausted(naive, self.max_attempts))
    }
}

/// Plan a rename with the default attempt bound.
pub fn plan_rename<F>(path: &Path, new_ext: &str, exists: F) -> Result<RenamePlan>
where
    F: Fn(&Path) -> bool,
{
    RenamePlanner::default().plan(path, new_ext, exists)
}

fn target_path(path: &Path, extension: &str, suffix: Option<&str>) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .ok_or_else(|| Error::invalid_input(format!("no file name in {:?}", path)))?;
    // A name like `.jpg` is all extension.
    let stem = if path.extension().is_none() && !extension_of(path).is_empty() {
        OsStr::new("")
    } else {
        stem
    };

    let mut name = stem.to_os_string();
    if let Some(suffix) = suffix {
        name.push("-");
        name.push(suffix);
    }
    name.push(extension);

    Ok(path.with_file_name(name))
}

/// Whether anything, including a dangling symlink, occupies `path`.
pub fn path_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Carry out `plan` without replacing an existing file.
///
/// The file is hard-linked to its target, which fails if the target exists,
/// and the original name is then removed. Where hard links are not
/// supported the target is checked and the file renamed.
///
/// # Errors
///
/// Returns [`Error::Io`] with kind `AlreadyExists` if the target was taken
/// after planning, or any other I/O error.
pub fn apply(plan: &RenamePlan) -> Result<()> {
    if plan.is_noop() {
        return Ok(());
    }

    match fs::hard_link(&plan.original, &plan.target) {
        Ok(()) => {
            if let Err(e) = fs::remove_file(&plan.original) {
                let _ = fs::remove_file(&plan.target);
                return Err(e.into());
            }
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(e.into()),
        Err(e) => {
            debug!("hard link unavailable ({}), falling back to rename", e);
            if path_exists(&plan.target) {
                return Err(std::io::Error::new(
                    ErrorKind::AlreadyExists,
                    format!("{} already exists", plan.target.display()),
                )
                .into());
            }
            fs::rename(&plan.original, &plan.target)?;
            Ok(())
        }
    }
}
