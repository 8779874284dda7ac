//! clean-folder - sort a messy directory tree in place
//!
//! This library scans a directory recursively, classifies files by extension,
//! moves them into category folders under transliterated, sanitized names,
//! unpacks archives into their own folders and removes directories left empty.

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_category;
pub mod file_organizer;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod pruner;
pub mod report;
pub mod scanner;

pub use archive::{ArchiveExtractor, ArchiveOutcome, ExtractError};
pub use config::{ConfigError, OrganizerConfig, UnreadablePolicy};
pub use error::{OrganizeError, OrganizeResult};
pub use file_category::Category;
pub use file_organizer::FileOrganizer;
pub use normalize::normalize;
pub use pipeline::Organizer;
pub use report::RunReport;
pub use scanner::{FileEntry, ScanResult, scan};
