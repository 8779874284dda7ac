/// Moving files into category folders.
///
/// A relocated file lands in `root/<category folder>/` under its normalized
/// name. An existing file of the same name is overwritten.
use crate::error::{OrganizeError, OrganizeResult};
use crate::normalize::normalize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Creates `root/<dir_name>` if it does not exist yet and returns its path.
pub fn ensure_dir(root: &Path, dir_name: &str) -> OrganizeResult<PathBuf> {
    let path = root.join(dir_name);
    fs::create_dir_all(&path).map_err(|source| OrganizeError::DirectoryCreationFailed {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Moves `from` to `to`, replacing whatever file is already at `to`.
pub fn move_file(from: &Path, to: &Path) -> OrganizeResult<()> {
    fs::rename(from, to).map_err(|source| OrganizeError::FileMoveFailure {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Computes where `file_path` will land inside `category_dir`.
pub fn destination_for(category_dir: &Path, file_path: &Path) -> PathBuf {
    let name = file_path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    category_dir.join(normalize(&name))
}

/// Moves files into category directories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Moves a file into `root/<category_dir_name>` under its normalized name
    /// and returns the new path.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use clean_folder::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let moved = FileOrganizer::relocate(
    ///     Path::new("/data/Downloads/звіт 1.JPG"),
    ///     Path::new("/data/Downloads"),
    ///     "images",
    /// )?;
    /// assert_eq!(moved, Path::new("/data/Downloads/images/zvit_1.JPG"));
    /// # Ok::<(), clean_folder::OrganizeError>(())
    /// ```
    pub fn relocate(
        file_path: &Path,
        root: &Path,
        category_dir_name: &str,
    ) -> OrganizeResult<PathBuf> {
        let category_dir = ensure_dir(root, category_dir_name)?;
        let destination = destination_for(&category_dir, file_path);

        move_file(file_path, &destination)?;
        debug!(
            from = %file_path.display(),
            to = %destination.display(),
            "relocated"
        );
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_relocate_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();

        let file_path = root.join("test.txt");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        let moved = FileOrganizer::relocate(&file_path, root, "documents")
            .expect("Failed to move file");

        let category_dir = root.join("documents");
        assert!(category_dir.is_dir());
        assert!(!file_path.exists());
        assert_eq!(moved, category_dir.join("test.txt"));
        assert!(moved.exists());
    }

    #[test]
    fn test_relocate_uses_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();

        let category_dir = root.join("images");
        fs::create_dir(&category_dir).expect("Failed to create category directory");
        fs::write(category_dir.join("keep.png"), "old").unwrap();

        let file_path = root.join("test.png");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        FileOrganizer::relocate(&file_path, root, "images").expect("Failed to move file");

        assert!(!file_path.exists());
        assert!(category_dir.join("test.png").exists());
        assert!(category_dir.join("keep.png").exists());
    }

    #[test]
    fn test_relocate_normalizes_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let nested = root.join("sub");
        fs::create_dir(&nested).unwrap();
        let file_path = nested.join("звіт 1.JPG");
        fs::write(&file_path, "jpeg").unwrap();

        let moved = FileOrganizer::relocate(&file_path, root, "images").unwrap();

        assert_eq!(moved, root.join("images").join("zvit_1.JPG"));
        assert_eq!(fs::read_to_string(moved).unwrap(), "jpeg");
    }

    #[test]
    fn test_relocate_overwrites_same_normalized_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let first = root.join("a b.txt");
        let second = root.join("a-b.txt");
        fs::write(&first, "first").unwrap();
        fs::write(&second, "second").unwrap();

        FileOrganizer::relocate(&first, root, "documents").unwrap();
        FileOrganizer::relocate(&second, root, "documents").unwrap();

        let target = root.join("documents").join("a_b.txt");
        assert_eq!(fs::read_to_string(target).unwrap(), "second");
    }

    #[test]
    fn test_relocate_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let result = FileOrganizer::relocate(&root.join("gone.txt"), root, "documents");
        assert!(matches!(result, Err(OrganizeError::FileMoveFailure { .. })));
    }

    #[test]
    fn test_ensure_dir_fails_when_a_file_has_the_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("other"), "i am a file").unwrap();

        let result = ensure_dir(root, "other");
        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryCreationFailed { .. })
        ));
    }
}
