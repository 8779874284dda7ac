//! File categorization by extension.
//!
//! The taxonomy is a fixed table from upper-cased extension to [`Category`].
//! Extensions missing from the table are unknown and fold into
//! [`Category::Other`].
//!
//! # Examples
//!
//! ```
//! use clean_folder::file_category::{self, Category};
//!
//! assert_eq!(file_category::category_for("jpg"), Category::Image);
//! assert_eq!(file_category::category_for("MKV"), Category::Video);
//! assert_eq!(file_category::category_for("exe"), Category::Other);
//! assert_eq!(file_category::lookup("exe"), None);
//! ```

use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Represents a broad file category.
///
/// Each category owns one top-level folder under the organized root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Image files (JPEG, PNG, JPG, SVG)
    Image,
    /// Video files (AVI, MP4, MOV, MKV)
    Video,
    /// Document files (DOC, DOCX, TXT, PDF, XLS, XLSX, PPTX)
    Document,
    /// Audio files (MP3, OGG, WAV, AMR)
    Audio,
    /// Archive files (ZIP, GZ, TAR)
    Archive,
    /// Unknown extension or no extension at all
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Image,
        Category::Video,
        Category::Document,
        Category::Audio,
        Category::Archive,
        Category::Other,
    ];

    /// Returns the folder name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use clean_folder::file_category::Category;
    ///
    /// assert_eq!(Category::Image.dir_name(), "images");
    /// assert_eq!(Category::Video.dir_name(), "video");
    /// assert_eq!(Category::Other.dir_name(), "other");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Image => "images",
            Category::Video => "video",
            Category::Document => "documents",
            Category::Audio => "audio",
            Category::Archive => "archives",
            Category::Other => "other",
        }
    }
}

/// Returns true if `name` is one of the six category folder names.
///
/// Directories with these names hold already-organized output and are never
/// descended into by the scanner.
pub fn is_reserved_dir_name(name: &str) -> bool {
    Category::ALL.iter().any(|category| category.dir_name() == name)
}

const EXTENSIONS: &[(&str, Category)] = &[
    ("JPEG", Category::Image),
    ("PNG", Category::Image),
    ("JPG", Category::Image),
    ("SVG", Category::Image),
    ("AVI", Category::Video),
    ("MP4", Category::Video),
    ("MOV", Category::Video),
    ("MKV", Category::Video),
    ("DOC", Category::Document),
    ("DOCX", Category::Document),
    ("TXT", Category::Document),
    ("PDF", Category::Document),
    ("XLS", Category::Document),
    ("XLSX", Category::Document),
    ("PPTX", Category::Document),
    ("MP3", Category::Audio),
    ("OGG", Category::Audio),
    ("WAV", Category::Audio),
    ("AMR", Category::Audio),
    ("ZIP", Category::Archive),
    ("GZ", Category::Archive),
    ("TAR", Category::Archive),
];

static TAXONOMY: LazyLock<HashMap<&'static str, Category>> =
    LazyLock::new(|| EXTENSIONS.iter().copied().collect());

/// Looks up an extension (without the dot), case-insensitively.
///
/// Returns `None` for extensions outside the taxonomy, including the empty one.
pub fn lookup(extension: &str) -> Option<Category> {
    TAXONOMY.get(extension.to_uppercase().as_str()).copied()
}

/// Maps an extension to its category, folding unknown extensions into `Other`.
pub fn category_for(extension: &str) -> Category {
    lookup(extension).unwrap_or(Category::Other)
}
