//! Recursive inventory of a directory tree.
//!
//! The scanner walks the root without following symbolic links, skips every
//! directory named like a category folder, and sorts each file into exactly
//! one [`Category`] bucket of a [`ScanResult`].

use crate::config::CompiledFilters;
use crate::error::OrganizeResult;
use crate::file_category::{self, Category};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// A classified file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Upper-cased extension, empty if the name has none.
    pub extension: String,
    pub category: Category,
}

impl FileEntry {
    /// The entry's file name, lossily converted to UTF-8.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Categorized inventory of a directory tree.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    buckets: BTreeMap<Category, Vec<FileEntry>>,
    /// Distinct recognized extensions seen.
    pub known_extensions: BTreeSet<String>,
    /// Distinct unrecognized extensions seen.
    pub unknown_extensions: BTreeSet<String>,
    /// Files left in place by the exclusion filters.
    pub excluded: Vec<PathBuf>,
}

impl ScanResult {
    /// Entries of one category, in traversal order.
    pub fn entries(&self, category: Category) -> &[FileEntry] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of classified files.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, entry: FileEntry) {
        self.buckets.entry(entry.category).or_default().push(entry);
    }
}

/// Returns the upper-cased extension of `path`, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

fn is_reserved_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(file_category::is_reserved_dir_name)
}

/// A symlink whose target is a directory. Left where it is.
fn is_dir_symlink(entry: &DirEntry) -> bool {
    entry.path_is_symlink() && entry.path().is_dir()
}

/// Scans `root` recursively and classifies every file beneath it.
///
/// # Errors
///
/// Returns [`crate::error::OrganizeError::Walk`] if a directory cannot be read.
pub fn scan(root: &Path, filters: &CompiledFilters) -> OrganizeResult<ScanResult> {
    let mut result = ScanResult::default();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_reserved_dir(entry));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() {
            trace!(dir = %entry.path().display(), "descending");
            continue;
        }
        if is_dir_symlink(&entry) {
            debug!(path = %entry.path().display(), "skipping symlinked directory");
            continue;
        }

        let path = entry.into_path();
        let relative = path.strip_prefix(root).unwrap_or(&path);
        if !filters.should_include(relative) {
            debug!(path = %path.display(), "excluded by filters");
            result.excluded.push(path);
            continue;
        }

        let extension = extension_of(&path);
        let category = if extension.is_empty() {
            Category::Other
        } else if let Some(category) = file_category::lookup(&extension) {
            result.known_extensions.insert(extension.clone());
            category
        } else {
            result.unknown_extensions.insert(extension.clone());
            Category::Other
        };

        trace!(path = %path.display(), ?category, "classified");
        result.push(FileEntry {
            path,
            extension,
            category,
        });
    }

    debug!(
        files = result.len(),
        excluded = result.excluded.len(),
        "scan complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    fn names(result: &ScanResult, category: Category) -> Vec<String> {
        result
            .entries(category)
            .iter()
            .map(FileEntry::file_name)
            .collect()
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("photo.jpg")), "JPG");
        assert_eq!(extension_of(Path::new("a.tar.gz")), "GZ");
        assert_eq!(extension_of(Path::new("Makefile")), "");
        assert_eq!(extension_of(Path::new(".bashrc")), "");
        assert_eq!(extension_of(Path::new("trailing.")), "");
    }

    #[test]
    fn test_scan_classifies_into_buckets() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "a.jpg");
        touch(root, "b.MP4");
        touch(root, "c.docx");
        touch(root, "d.ogg");
        touch(root, "e.zip");
        touch(root, "f.exe");
        touch(root, "README");

        let result = scan(root, &CompiledFilters::default()).unwrap();

        assert_eq!(names(&result, Category::Image), vec!["a.jpg"]);
        assert_eq!(names(&result, Category::Video), vec!["b.MP4"]);
        assert_eq!(names(&result, Category::Document), vec!["c.docx"]);
        assert_eq!(names(&result, Category::Audio), vec!["d.ogg"]);
        assert_eq!(names(&result, Category::Archive), vec!["e.zip"]);
        assert_eq!(names(&result, Category::Other), vec!["README", "f.exe"]);
        assert_eq!(result.len(), 7);
    }

    #[test]
    fn test_scan_records_extension_sets() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "a.jpg");
        touch(root, "b.JPG");
        touch(root, "c.xyz");
        touch(root, "noext");

        let result = scan(root, &CompiledFilters::default()).unwrap();

        assert_eq!(
            result.known_extensions.iter().collect::<Vec<_>>(),
            vec!["JPG"]
        );
        assert_eq!(
            result.unknown_extensions.iter().collect::<Vec<_>>(),
            vec!["XYZ"]
        );
    }

    #[test]
    fn test_scan_recurses_into_nested_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "one/two/three/deep.pdf");
        touch(root, "one/shallow.png");

        let result = scan(root, &CompiledFilters::default()).unwrap();

        assert_eq!(names(&result, Category::Document), vec!["deep.pdf"]);
        assert_eq!(names(&result, Category::Image), vec!["shallow.png"]);
        assert!(result.entries(Category::Image)[0].path.is_absolute());
    }

    #[test]
    fn test_scan_skips_reserved_folders_at_any_depth() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "images/already.png");
        touch(root, "archives/report/inner.txt");
        touch(root, "sub/other/kept.bin");
        touch(root, "sub/Images/moved.png");

        let result = scan(root, &CompiledFilters::default()).unwrap();

        assert_eq!(names(&result, Category::Image), vec!["moved.png"]);
        assert!(result.entries(Category::Document).is_empty());
        assert!(result.entries(Category::Other).is_empty());
    }

    #[test]
    fn test_reserved_name_on_a_file_is_classified() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "nested/video");

        let result = scan(root, &CompiledFilters::default()).unwrap();

        assert_eq!(names(&result, Category::Other), vec!["video"]);
    }

    #[test]
    fn test_scan_records_excluded_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "keep/me.txt");
        touch(root, "move.txt");

        let config: crate::config::OrganizerConfig = toml::from_str(
            r#"
            [filters.exclude]
            patterns = ["keep/**"]
            "#,
        )
        .unwrap();
        let filters = config.compile_filters().unwrap();

        let result = scan(root, &filters).unwrap();

        assert_eq!(names(&result, Category::Document), vec!["move.txt"]);
        assert_eq!(result.excluded, vec![root.join("keep/me.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_does_not_follow_directory_symlinks() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "real/file.txt");
        std::os::unix::fs::symlink(root.join("real"), root.join("real/loop")).unwrap();

        let result = scan(root, &CompiledFilters::default()).unwrap();

        assert_eq!(names(&result, Category::Document), vec!["file.txt"]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        let result = scan(dir.path(), &CompiledFilters::default()).unwrap();
        assert!(result.is_empty());
    }
}
