//! Summary of an organization run.

use crate::archive::ArchiveOutcome;
use crate::file_category::Category;
use crate::scanner::ScanResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Counts of archive outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveTally {
    pub extracted: usize,
    pub discarded: usize,
    pub moved_aside: usize,
    pub source_missing: usize,
}

impl ArchiveTally {
    pub fn record(&mut self, outcome: &ArchiveOutcome) {
        match outcome {
            ArchiveOutcome::Extracted { .. } => self.extracted += 1,
            ArchiveOutcome::Discarded { .. } => self.discarded += 1,
            ArchiveOutcome::MovedAside { .. } => self.moved_aside += 1,
            ArchiveOutcome::SourceMissing => self.source_missing += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.extracted + self.discarded + self.moved_aside + self.source_missing
    }
}

/// A move a dry run would have made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMove {
    pub from: PathBuf,
    /// Relocation destination, or extraction target for archives.
    pub to: PathBuf,
    pub category: Category,
}

/// What a run did (or, for a dry run, would do).
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Files moved per category. Archives are counted in `archives`.
    pub relocated: BTreeMap<Category, usize>,
    pub archives: ArchiveTally,
    pub excluded: usize,
    pub known_extensions: BTreeSet<String>,
    pub unknown_extensions: BTreeSet<String>,
    pub pruned_dirs: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub planned: Vec<PlannedMove>,
}

impl RunReport {
    pub fn new(root: &Path, dry_run: bool, scan: &ScanResult) -> Self {
        Self {
            root: root.to_path_buf(),
            dry_run,
            started_at: Utc::now(),
            finished_at: None,
            relocated: BTreeMap::new(),
            archives: ArchiveTally::default(),
            excluded: scan.excluded.len(),
            known_extensions: scan.known_extensions.clone(),
            unknown_extensions: scan.unknown_extensions.clone(),
            pruned_dirs: 0,
            planned: Vec::new(),
        }
    }

    pub fn record_relocation(&mut self, category: Category) {
        *self.relocated.entry(category).or_insert(0) += 1;
    }

    /// Number of files moved into category folders.
    pub fn total_relocated(&self) -> usize {
        self.relocated.values().sum()
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_each_outcome() {
        let mut tally = ArchiveTally::default();
        tally.record(&ArchiveOutcome::SourceMissing);
        tally.record(&ArchiveOutcome::Discarded {
            reason: "bad".to_string(),
        });
        tally.record(&ArchiveOutcome::Discarded {
            reason: "worse".to_string(),
        });

        assert_eq!(tally.discarded, 2);
        assert_eq!(tally.source_missing, 1);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_report_serializes_categories_as_names() {
        let mut report = RunReport::new(Path::new("/data"), false, &ScanResult::default());
        report.record_relocation(Category::Image);
        report.record_relocation(Category::Image);
        report.record_relocation(Category::Other);
        report.finish();

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["relocated"]["image"], 2);
        assert_eq!(json["relocated"]["other"], 1);
        assert_eq!(json["root"], "/data");
        assert!(json["finished_at"].is_string());
        assert!(json.get("planned").is_none());
        assert_eq!(report.total_relocated(), 3);
    }
}
