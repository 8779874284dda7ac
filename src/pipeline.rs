//! The organization pipeline: scan, relocate, extract, prune.
//!
//! Stages run strictly one after another. Later stages work from the scan
//! result and the filesystem as earlier stages left it; nothing is rescanned.

use crate::archive::ArchiveExtractor;
use crate::config::OrganizerConfig;
use crate::error::{OrganizeError, OrganizeResult};
use crate::file_category::Category;
use crate::file_organizer::{FileOrganizer, destination_for};
use crate::pruner::prune_empty;
use crate::report::{PlannedMove, RunReport};
use crate::scanner::{ScanResult, scan};
use indicatif::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Order in which non-archive buckets are relocated.
pub const RELOCATION_ORDER: [Category; 5] = [
    Category::Image,
    Category::Video,
    Category::Audio,
    Category::Document,
    Category::Other,
];

/// Checks that `root` is an existing directory and returns its absolute form.
pub fn validate_root(root: &Path) -> OrganizeResult<PathBuf> {
    let invalid = |reason: String| OrganizeError::InvalidRoot {
        path: root.to_path_buf(),
        reason,
    };

    let metadata = fs::metadata(root).map_err(|e| invalid(e.to_string()))?;
    if !metadata.is_dir() {
        return Err(invalid("not a directory".to_string()));
    }
    root.canonicalize().map_err(|e| invalid(e.to_string()))
}

/// Runs the pipeline over a root directory.
pub struct Organizer {
    config: OrganizerConfig,
    progress: ProgressBar,
}

impl Organizer {
    /// Creates an organizer with no visible progress output.
    pub fn new(config: OrganizerConfig) -> Self {
        Self {
            config,
            progress: ProgressBar::hidden(),
        }
    }

    /// Reports per-file progress on `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Validates the root and compiles filters, then scans. Nothing is
    /// modified until this returns.
    fn prepare(&self, root: &Path) -> OrganizeResult<(PathBuf, ScanResult)> {
        let root = validate_root(root)?;
        let filters = self.config.compile_filters()?;
        let scan = scan(&root, &filters)?;
        Ok((root, scan))
    }

    /// Organizes `root` in place.
    ///
    /// # Errors
    ///
    /// Fails before touching anything if the root is invalid or the
    /// configuration does not compile. Any later failure aborts the run and
    /// leaves already-completed moves in place.
    pub fn run(&self, root: &Path) -> OrganizeResult<RunReport> {
        let (root, scan) = self.prepare(root)?;
        let mut report = RunReport::new(&root, false, &scan);
        info!(root = %root.display(), files = scan.len(), "organizing");

        self.progress.set_length(scan.len() as u64);
        for category in RELOCATION_ORDER {
            for entry in scan.entries(category) {
                self.progress.set_message(entry.file_name());
                FileOrganizer::relocate(&entry.path, &root, category.dir_name())?;
                report.record_relocation(category);
                self.progress.inc(1);
            }
        }

        let extractor = ArchiveExtractor::new(self.config.archives.on_unreadable);
        for entry in scan.entries(Category::Archive) {
            self.progress.set_message(entry.file_name());
            let outcome = extractor.extract_archive(&entry.path, &root)?;
            report.archives.record(&outcome);
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        report.pruned_dirs = prune_empty(&root)?;
        report.finish();
        info!(
            relocated = report.total_relocated(),
            archives = report.archives.total(),
            pruned = report.pruned_dirs,
            "done"
        );
        Ok(report)
    }

    /// Scans `root` and reports where every file would go, without changing
    /// anything.
    pub fn plan(&self, root: &Path) -> OrganizeResult<RunReport> {
        let (root, scan) = self.prepare(root)?;
        let mut report = RunReport::new(&root, true, &scan);

        for category in RELOCATION_ORDER {
            let category_dir = root.join(category.dir_name());
            for entry in scan.entries(category) {
                report.planned.push(PlannedMove {
                    from: entry.path.clone(),
                    to: destination_for(&category_dir, &entry.path),
                    category,
                });
                report.record_relocation(category);
            }
        }
        for entry in scan.entries(Category::Archive) {
            report.planned.push(PlannedMove {
                from: entry.path.clone(),
                to: ArchiveExtractor::target_for(&entry.path, &root),
                category: Category::Archive,
            });
        }

        report.finish();
        Ok(report)
    }
}
