//! Per-file and batch extension reconciliation.
//!
//! For each file: ask exiftool for its real type, keep the file if its
//! extension is already compatible, skip it if exiftool cannot write the
//! real type, otherwise rename it to a free name carrying the real
//! extension.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use takeoutfix_common::paths::is_supported_media;
use takeoutfix_common::{are_extensions_compatible, extension_of};
use takeoutfix_exif::{get_new_extension, writable, CommandRunner, ExifTool, WritableRegistry};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::rename::{self, path_exists, RenamePlanner, DEFAULT_MAX_ATTEMPTS};

/// Options controlling a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub dry_run: bool,
    pub max_attempts: usize,
    pub workers: usize,
    pub follow_links: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            workers: 0,
            follow_links: false,
        }
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The extension already matches the real type.
    Unchanged { path: PathBuf, detected: String },
    /// exiftool could not tell the type.
    Undetermined { path: PathBuf },
    /// exiftool cannot write metadata into the real type.
    NotWritable { path: PathBuf, detected: String },
    /// Dry run: the file would be renamed.
    WouldRename { from: PathBuf, to: PathBuf },
    /// The file was renamed.
    Renamed { from: PathBuf, to: PathBuf },
}

/// A file that could not be reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub error: String,
}

/// Tally of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub scanned: usize,
    pub unchanged: usize,
    pub undetermined: usize,
    pub not_writable: usize,
    pub would_rename: usize,
    pub renamed: usize,
    pub failed: usize,
    /// Renames, planned or done.
    pub changes: Vec<Outcome>,
    pub failures: Vec<Failure>,
}

impl Report {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Unchanged { .. } => self.unchanged += 1,
            Outcome::Undetermined { .. } => self.undetermined += 1,
            Outcome::NotWritable { .. } => self.not_writable += 1,
            Outcome::WouldRename { .. } => {
                self.would_rename += 1;
                self.changes.push(outcome);
            }
            Outcome::Renamed { .. } => {
                self.renamed += 1;
                self.changes.push(outcome);
            }
        }
    }

    fn record_failure(&mut self, path: PathBuf, error: String) {
        self.failed += 1;
        self.failures.push(Failure { path, error });
    }
}

/// Reconciles file extensions with exiftool's view of their type.
pub struct Reconciler {
    runner: Arc<dyn CommandRunner>,
    registry: Arc<WritableRegistry>,
    options: ReconcileOptions,
}

impl Reconciler {
    /// Create a reconciler from its collaborators.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        registry: Arc<WritableRegistry>,
        options: ReconcileOptions,
    ) -> Self {
        Self {
            runner,
            registry,
            options,
        }
    }

    /// Create a reconciler that uses `exiftool` for type queries.
    ///
    /// `exiftool` also backs the process-wide writable format list unless
    /// that list was installed earlier.
    pub fn with_exiftool(exiftool: ExifTool, options: ReconcileOptions) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(exiftool);
        let registry = writable::init_global(runner.clone());
        Self::new(runner, registry, options)
    }

    pub fn registry(&self) -> &WritableRegistry {
        &self.registry
    }

    /// Reconcile one file.
    pub fn reconcile_file(&self, path: &Path) -> Result<Outcome> {
        let detected = get_new_extension(path, Some(self.runner.as_ref()))
            .with_context(|| format!("Failed to detect type of {:?}", path))?;
        if detected.is_empty() {
            debug!("Type of {:?} is undetermined", path);
            return Ok(Outcome::Undetermined {
                path: path.to_path_buf(),
            });
        }

        let current = extension_of(path);
        if are_extensions_compatible(&current, &detected) {
            debug!("{:?} matches detected type {}", path, detected);
            return Ok(Outcome::Unchanged {
                path: path.to_path_buf(),
                detected,
            });
        }

        if !self.registry.is_writable(&detected)? {
            debug!("exiftool cannot write {} ({:?})", detected, path);
            return Ok(Outcome::NotWritable {
                path: path.to_path_buf(),
                detected,
            });
        }

        let planner = RenamePlanner::new(self.options.max_attempts);
        if self.options.dry_run {
            let plan = planner.plan(path, &detected, path_exists)?;
            info!("Would rename {:?} -> {:?}", plan.original, plan.target);
            return Ok(Outcome::WouldRename {
                from: plan.original,
                to: plan.target,
            });
        }

        // A planned name can be taken by a concurrent rename before it is
        // applied; plan again in that case.
        for _ in 0..self.options.max_attempts.max(1) {
            let plan = planner.plan(path, &detected, path_exists)?;
            match rename::apply(&plan) {
                Ok(()) => {
                    info!("Renamed {:?} -> {:?}", plan.original, plan.target);
                    return Ok(Outcome::Renamed {
                        from: plan.original,
                        to: plan.target,
                    });
                }
                Err(takeoutfix_common::Error::Io(e)) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("{:?} was taken before rename, replanning", plan.target);
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to rename {:?}", path));
                }
            }
        }

        Err(takeoutfix_common::Error::rename_exhausted(path, self.options.max_attempts).into())
    }

    /// Reconcile every supported media file under `root`.
    ///
    /// Failures of individual files, including unreadable directory
    /// entries, are recorded in the report and do not stop the run.
    pub fn reconcile_tree(&self, root: &Path) -> Result<Report> {
        let mut report = Report::default();
        let mut candidates = Vec::new();

        for entry in WalkDir::new(root).follow_links(self.options.follow_links) {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_supported_media(entry.path()) => {
                    candidates.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    warn!("Cannot read {:?}: {}", path, e);
                    report.record_failure(path, e.to_string());
                }
            }
        }

        report.scanned = candidates.len();
        info!("Reconciling {} files under {:?}", candidates.len(), root);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.workers)
            .build()
            .context("Failed to start worker pool")?;

        let results: Vec<(PathBuf, Result<Outcome>)> = pool.install(|| {
            candidates
                .into_par_iter()
                .map(|path| {
                    let result = self.reconcile_file(&path);
                    (path, result)
                })
                .collect()
        });

        for (path, result) in results {
            match result {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    warn!("Skipping {:?}: {:#}", path, e);
                    report.record_failure(path, format!("{:#}", e));
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use takeoutfix_exif::Result as ExifResult;

    fn reconciler_with(output: &'static str, writable: &'static str, dry_run: bool) -> Reconciler {
        let runner: Arc<dyn CommandRunner> =
            Arc::new(move |_: &[String]| -> ExifResult<String> { Ok(output.to_string()) });
        let registry = Arc::new(WritableRegistry::new(move || Ok(writable.to_string())));
        Reconciler::new(
            runner,
            registry,
            ReconcileOptions {
                dry_run,
                ..ReconcileOptions::default()
            },
        )
    }

    #[test]
    fn compatible_extension_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpeg");
        fs::write(&path, b"x").unwrap();

        let outcome = reconciler_with("JPG\n", "JPG\n", false)
            .reconcile_file(&path)
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Unchanged {
                path: path.clone(),
                detected: ".jpg".to_string()
            }
        );
        assert!(path.exists());
    }

    #[test]
    fn undetermined_type_is_not_an_error() {
        let outcome = reconciler_with("Error: Unknown file type\n", "JPG\n", false)
            .reconcile_file(Path::new("a.jpg"))
            .unwrap();
        assert!(matches!(outcome, Outcome::Undetermined { .. }));
    }

    #[test]
    fn not_writable_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        fs::write(&path, b"x").unwrap();

        let outcome = reconciler_with("AVI\n", "JPG MP4\n", false)
            .reconcile_file(&path)
            .unwrap();
        assert!(matches!(outcome, Outcome::NotWritable { ref detected, .. } if detected == ".avi"));
        assert!(path.exists());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        fs::write(&path, b"x").unwrap();

        let outcome = reconciler_with("HEIC\n", "HEIC JPG\n", true)
            .reconcile_file(&path)
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::WouldRename {
                from: path.clone(),
                to: dir.path().join("a.heic")
            }
        );
        assert!(path.exists());
        assert!(!dir.path().join("a.heic").exists());
    }

    #[test]
    fn mismatched_extension_is_renamed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        fs::write(&path, b"x").unwrap();

        let outcome = reconciler_with("HEIC\n", "HEIC JPG\n", false)
            .reconcile_file(&path)
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Renamed {
                from: path.clone(),
                to: dir.path().join("a.heic")
            }
        );
        assert!(!path.exists());
        assert!(dir.path().join("a.heic").exists());
    }

    #[test]
    fn runner_failure_is_an_error() {
        let runner: Arc<dyn CommandRunner> = Arc::new(|_: &[String]| -> ExifResult<String> {
            Err(takeoutfix_exif::Error::tool_failed("exiftool", "crashed"))
        });
        let registry = Arc::new(WritableRegistry::new(|| Ok("JPG\n".to_string())));
        let reconciler = Reconciler::new(runner, registry, ReconcileOptions::default());

        let err = reconciler.reconcile_file(Path::new("a.jpg")).unwrap_err();
        assert!(format!("{:#}", err).contains("crashed"));
    }
}
