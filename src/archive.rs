//! Unpacking archives into `root/archives/<name>/`.
//!
//! Each archive gets its own extraction target named after the archive minus
//! its archive suffix. The format is sniffed from the file's leading bytes.
//! What happens next depends on how extraction went:
//!
//! - success: the archive file is deleted, the target keeps the contents;
//! - unsupported format: the target is removed and the archive is deleted
//!   (or moved aside, see [`UnreadablePolicy`]);
//! - source missing: the target is removed and nothing else happens;
//! - any other I/O failure aborts the run.

use crate::config::UnreadablePolicy;
use crate::error::{OrganizeError, OrganizeResult};
use crate::file_category::Category;
use crate::file_organizer::{destination_for, ensure_dir, move_file};
use crate::normalize::normalize;
use flate2::read::GzDecoder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use zip::ZipArchive;
use zip::result::ZipError;

/// Suffixes stripped from an archive's name to build its target folder name.
/// `.tar.gz` comes first so that `x.tar.gz` becomes `x`, not `x.tar`.
pub const ARCHIVE_SUFFIXES: [&str; 3] = [".tar.gz", ".zip", ".tar"];

const FALLBACK_NAME: &str = "archive";
const SNIFF_LEN: u64 = 8192;
const TAR_BLOCK: u64 = 512;

/// Why an archive could not be unpacked.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file is not an archive this engine can read, or it is corrupt.
    #[error("unsupported archive format: {0}")]
    Unsupported(String),
    /// The archive disappeared before extraction started.
    #[error("archive source is missing")]
    SourceMissing,
    /// Anything else. Not recoverable.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ExtractError {
    fn unreadable(err: impl ToString) -> Self {
        ExtractError::Unsupported(err.to_string())
    }

    /// Sorts an error raised while decoding into a format problem or real I/O.
    ///
    /// Decoders report corrupt or truncated data with synthetic errors (tar
    /// uses `Other` for bad headers). Anything carrying an OS error code came
    /// from the filesystem and is fatal.
    fn from_unpack(err: io::Error) -> Self {
        let malformed = err.raw_os_error().is_none()
            && matches!(
                err.kind(),
                io::ErrorKind::InvalidData
                    | io::ErrorKind::InvalidInput
                    | io::ErrorKind::UnexpectedEof
                    | io::ErrorKind::Other
            );
        if malformed {
            ExtractError::Unsupported(err.to_string())
        } else {
            ExtractError::Io(err)
        }
    }
}

fn zip_error(err: ZipError) -> ExtractError {
    match err {
        ZipError::Io(err) => ExtractError::from_unpack(err),
        other => ExtractError::unreadable(other),
    }
}

/// Container formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    Zip,
    /// A gzip stream: either a compressed tarball or a single compressed file.
    Gzip,
    Tar,
}

/// Sniffs the archive format from the first bytes of a file.
///
/// Old tarballs carry no magic number, so a `.tar` name is trusted when
/// nothing else matches.
pub fn detect_format(head: &[u8], file_name: &str) -> Option<ArchiveFormat> {
    if infer::archive::is_zip(head) {
        Some(ArchiveFormat::Zip)
    } else if infer::archive::is_gz(head) {
        Some(ArchiveFormat::Gzip)
    } else if infer::archive::is_tar(head) || strip_suffix_ci(file_name, ".tar").is_some() {
        Some(ArchiveFormat::Tar)
    } else {
        None
    }
}

fn strip_suffix_ci<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let (stem, tail) = (name.get(..split)?, name.get(split..)?);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}

/// Returns the extraction folder name for an archive file name.
///
/// # Examples
///
/// ```
/// use clean_folder::archive::archive_dir_name;
///
/// assert_eq!(archive_dir_name("report.zip"), "report");
/// assert_eq!(archive_dir_name("Фото 2024.tar.gz"), "Foto_2024");
/// assert_eq!(archive_dir_name("notes.txt.gz"), "notes.txt.gz");
/// ```
pub fn archive_dir_name(file_name: &str) -> String {
    let stem = ARCHIVE_SUFFIXES
        .iter()
        .find_map(|suffix| strip_suffix_ci(file_name, suffix))
        .unwrap_or(file_name);

    normalize_or_fallback(stem)
}

fn normalize_or_fallback(name: &str) -> String {
    let normalized = normalize(name);
    if normalized.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        normalized
    }
}

/// Unpacks `archive` into the existing directory `target`.
pub fn extract(archive: &Path, target: &Path) -> Result<ArchiveFormat, ExtractError> {
    let mut file = File::open(archive).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ExtractError::SourceMissing,
        _ => ExtractError::Io(err),
    })?;

    let mut head = Vec::new();
    (&mut file).take(SNIFF_LEN).read_to_end(&mut head)?;
    file.seek(SeekFrom::Start(0))?;

    let file_name = file_name_of(archive);
    let format = detect_format(&head, &file_name)
        .ok_or_else(|| ExtractError::Unsupported("unrecognized archive format".to_string()))?;

    debug!(archive = %archive.display(), ?format, "unpacking");
    match format {
        ArchiveFormat::Zip => unpack_zip(file, target)?,
        ArchiveFormat::Tar => unpack_tar(BufReader::new(file), target)?,
        ArchiveFormat::Gzip => unpack_gzip(file, &file_name, target)?,
    }
    Ok(format)
}

fn unpack_zip(file: File, target: &Path) -> Result<(), ExtractError> {
    let mut archive = ZipArchive::new(file).map_err(zip_error)?;
    archive.extract(target).map_err(zip_error)
}

fn unpack_tar<R: Read>(reader: R, target: &Path) -> Result<(), ExtractError> {
    let mut archive = tar::Archive::new(reader);
    let entries = archive.entries().map_err(ExtractError::from_unpack)?;
    for entry in entries {
        let mut entry = entry.map_err(ExtractError::from_unpack)?;
        // unpack_in refuses paths that would escape the target.
        entry.unpack_in(target).map_err(ExtractError::from_unpack)?;
    }
    Ok(())
}

fn unpack_gzip(file: File, file_name: &str, target: &Path) -> Result<(), ExtractError> {
    let mut decoder = GzDecoder::new(file);

    let mut head = Vec::new();
    (&mut decoder)
        .take(TAR_BLOCK)
        .read_to_end(&mut head)
        .map_err(ExtractError::from_unpack)?;
    let is_tarball =
        infer::archive::is_tar(&head) || strip_suffix_ci(file_name, ".tar.gz").is_some();

    let mut stream = io::Cursor::new(head).chain(decoder);
    if is_tarball {
        return unpack_tar(stream, target);
    }

    let inner_name = strip_suffix_ci(file_name, ".gz").unwrap_or(file_name);
    let mut output = File::create(target.join(normalize_or_fallback(inner_name)))?;
    io::copy(&mut stream, &mut output).map_err(ExtractError::from_unpack)?;
    Ok(())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// What became of one archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ArchiveOutcome {
    /// Unpacked into `target`; the archive file was deleted.
    Extracted {
        target: PathBuf,
        format: ArchiveFormat,
    },
    /// Unreadable; the archive file was deleted.
    Discarded { reason: String },
    /// Unreadable; the archive file was moved into the archives folder as is.
    MovedAside { to: PathBuf, reason: String },
    /// The archive file was gone by the time extraction started.
    SourceMissing,
}

/// Unpacks archive files found by the scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveExtractor {
    policy: UnreadablePolicy,
}

impl ArchiveExtractor {
    pub fn new(policy: UnreadablePolicy) -> Self {
        Self { policy }
    }

    /// The folder an archive would be unpacked into.
    pub fn target_for(archive: &Path, root: &Path) -> PathBuf {
        root.join(Category::Archive.dir_name())
            .join(archive_dir_name(&file_name_of(archive)))
    }

    /// Unpacks `archive` into `root/archives/<name>/` and cleans up according
    /// to the outcome.
    ///
    /// # Errors
    ///
    /// Unsupported formats and vanished sources are reported through
    /// [`ArchiveOutcome`]. Every other failure is returned as an error.
    pub fn extract_archive(&self, archive: &Path, root: &Path) -> OrganizeResult<ArchiveOutcome> {
        let archives_dir = ensure_dir(root, Category::Archive.dir_name())?;
        let target = Self::target_for(archive, root);
        let created = !target.exists();
        fs::create_dir_all(&target).map_err(|source| OrganizeError::DirectoryCreationFailed {
            path: target.clone(),
            source,
        })?;

        match extract(archive, &target) {
            Ok(format) => {
                remove_file(archive)?;
                info!(
                    archive = %archive.display(),
                    target = %target.display(),
                    ?format,
                    "extracted"
                );
                Ok(ArchiveOutcome::Extracted { target, format })
            }
            Err(ExtractError::Unsupported(reason)) => {
                discard_target(&target, created)?;
                match self.policy {
                    UnreadablePolicy::Delete => {
                        remove_file(archive)?;
                        warn!(archive = %archive.display(), %reason, "deleted unreadable archive");
                        Ok(ArchiveOutcome::Discarded { reason })
                    }
                    UnreadablePolicy::MoveAside => {
                        let mut to = destination_for(&archives_dir, archive);
                        // A kept target can share the archive's name.
                        if to.is_dir() {
                            to = destination_for(&to, archive);
                        }
                        move_file(archive, &to)?;
                        warn!(
                            archive = %archive.display(),
                            to = %to.display(),
                            %reason,
                            "moved unreadable archive aside"
                        );
                        Ok(ArchiveOutcome::MovedAside { to, reason })
                    }
                }
            }
            Err(ExtractError::SourceMissing) => {
                discard_target(&target, created)?;
                warn!(archive = %archive.display(), "archive vanished before extraction");
                Ok(ArchiveOutcome::SourceMissing)
            }
            Err(ExtractError::Io(source)) => Err(OrganizeError::ExtractionFailed {
                archive: archive.to_path_buf(),
                source,
            }),
        }
    }
}

fn remove_file(path: &Path) -> OrganizeResult<()> {
    fs::remove_file(path).map_err(|source| OrganizeError::RemoveFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Removes an extraction target, but only one this run created.
fn discard_target(target: &Path, created: bool) -> OrganizeResult<()> {
    if !created {
        debug!(target = %target.display(), "keeping pre-existing extraction target");
        return Ok(());
    }
    fs::remove_dir_all(target).map_err(|source| OrganizeError::RemoveFailed {
        path: target.to_path_buf(),
        source,
    })
}
