//! Descriptor discovery.
//!
//! Walks a directory tree depth-first, hands every descriptor to the parser
//! and inserts the results into a [`CoreDb`]. A directory that holds a
//! descriptor is treated as the root of one core: its subdirectories are
//! never searched.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::core::{CoreDb, CoreParser, LoadError, Vlnv};

/// Error that aborts a scan.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to resolve {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What happened to one descriptor file.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The record was added to the database.
    Loaded {
        path: PathBuf,
        vlnv: Vlnv,
        /// `core_root` of the record this one replaced.
        replaced: Option<PathBuf>,
    },
    /// The file was skipped.
    Skipped { path: PathBuf, error: LoadError },
}

/// Result of scanning one root.
#[derive(Debug)]
pub struct ScanReport {
    pub root: PathBuf,
    pub outcomes: Vec<ScanOutcome>,
}

impl ScanReport {
    fn new(root: PathBuf) -> Self {
        ScanReport {
            root,
            outcomes: Vec::new(),
        }
    }

    /// Coordinates of every loaded record, in visit order.
    pub fn loaded(&self) -> impl Iterator<Item = &Vlnv> {
        self.outcomes.iter().filter_map(|o| match o {
            ScanOutcome::Loaded { vlnv, .. } => Some(vlnv),
            ScanOutcome::Skipped { .. } => None,
        })
    }

    /// Every skipped descriptor and why.
    pub fn skipped(&self) -> impl Iterator<Item = &LoadError> {
        self.outcomes.iter().filter_map(|o| match o {
            ScanOutcome::Skipped { error, .. } => Some(error),
            ScanOutcome::Loaded { .. } => None,
        })
    }
}

/// Finds descriptors below a root and loads them.
pub struct Walker<'a> {
    parser: &'a dyn CoreParser,
}

impl<'a> Walker<'a> {
    pub fn new(parser: &'a dyn CoreParser) -> Self {
        Walker { parser }
    }

    /// Scan `root`, inserting every parsed record into `db`.
    ///
    /// Per-file failures never abort the scan; they are reported as
    /// [`ScanOutcome::Skipped`].
    pub fn scan(&self, root: &Path, db: &mut CoreDb) -> Result<ScanReport, DiscoveryError> {
        tracing::debug!("Checking for cores in {}", root.display());

        if !root.is_dir() {
            return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
        }

        let mut report = ScanReport::new(root.to_path_buf());
        let mut visited = HashSet::new();
        self.walk_dir(root, db, &mut visited, &mut report);

        tracing::debug!(
            "Found {} core(s) in {} ({} skipped)",
            report.loaded().count(),
            root.display(),
            report.skipped().count()
        );

        Ok(report)
    }

    fn walk_dir(
        &self,
        dir: &Path,
        db: &mut CoreDb,
        visited: &mut HashSet<PathBuf>,
        report: &mut ScanReport,
    ) {
        // Directory links are followed, so guard against link cycles.
        let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        if !visited.insert(canonical) {
            tracing::debug!("Skipping already visited directory {}", dir.display());
            return;
        }

        let mut descriptors = Vec::new();
        let mut subdirs = Vec::new();

        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                subdirs.push(entry.into_path());
            } else if file_type.is_file() && self.is_descriptor(entry.file_name()) {
                descriptors.push(entry.into_path());
            }
        }

        if !descriptors.is_empty() {
            for path in descriptors {
                self.load(path, db, report);
            }
            return;
        }

        for subdir in subdirs {
            self.walk_dir(&subdir, db, visited, report);
        }
    }

    // Compared on raw bytes so names that are not valid UTF-8 still match.
    fn is_descriptor(&self, file_name: &OsStr) -> bool {
        file_name
            .as_encoded_bytes()
            .ends_with(self.parser.suffix().as_bytes())
    }

    fn load(&self, path: PathBuf, db: &mut CoreDb, report: &mut ScanReport) {
        let outcome = match self.parser.parse(&path) {
            Ok(record) => {
                let vlnv = record.vlnv().clone();
                let replaced = db
                    .insert(record)
                    .map(|old| old.core_root().to_path_buf());
                ScanOutcome::Loaded {
                    path,
                    vlnv,
                    replaced,
                }
            }
            Err(error) => {
                tracing::warn!("{}", error);
                ScanOutcome::Skipped { path, error }
            }
        };
        report.outcomes.push(outcome);
    }
}
