//! Output formatting and styling module.
//!
//! All user-facing terminal output goes through [`OutputFormatter`]. Diagnostics
//! go through `tracing` instead.

use crate::error::OrganizeResult;
use crate::file_category::Category;
use crate::report::RunReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use walkdir::WalkDir;

/// Prints run results with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar over `total` files.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        ProgressBar::new(total).with_style(style)
    }

    /// Prints the per-category table, archive outcomes and extension sets.
    pub fn summary(report: &RunReport) {
        if report.dry_run {
            Self::dry_run_notice(&format!("Nothing was changed in {}", report.root.display()));
            Self::header("PLANNED MOVES");
            for planned in &report.planned {
                println!(
                    "  {} → {}",
                    planned.from.display(),
                    planned.to.display().to_string().green()
                );
            }
        }

        Self::header("SUMMARY");
        let width = Category::ALL
            .iter()
            .map(|category| category.dir_name().len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));
        for (category, count) in &report.relocated {
            println!(
                "{:<width$} | {} {}",
                category.dir_name(),
                count.to_string().green(),
                plural(*count),
                width = width
            );
        }
        println!("{}", "-".repeat(width + 10));
        let total = report.total_relocated();
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            plural(total),
            width = width
        );

        let archives = &report.archives;
        if archives.total() > 0 {
            Self::header("ARCHIVES");
            println!("  extracted:      {}", archives.extracted);
            println!("  discarded:      {}", archives.discarded);
            println!("  moved aside:    {}", archives.moved_aside);
            println!("  source missing: {}", archives.source_missing);
        }
        if archives.discarded > 0 {
            Self::warning(&format!(
                "{} unreadable archive(s) were deleted",
                archives.discarded
            ));
        }

        if !report.known_extensions.is_empty() {
            Self::info(&format!(
                "Known extensions: {}",
                join(&report.known_extensions)
            ));
        }
        if !report.unknown_extensions.is_empty() {
            Self::info(&format!(
                "Unknown extensions: {}",
                join(&report.unknown_extensions)
            ));
        }
        if report.excluded > 0 {
            Self::info(&format!("Left in place by filters: {}", report.excluded));
        }
        if report.pruned_dirs > 0 {
            Self::info(&format!("Removed empty directories: {}", report.pruned_dirs));
        }
    }

    /// Prints every entry under `root`, indented by depth.
    pub fn print_tree(root: &Path) -> OrganizeResult<()> {
        Self::header(&root.display().to_string());
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            let indent = "  ".repeat(entry.depth());
            let name = entry.file_name().to_string_lossy();
            if entry.file_type().is_dir() {
                println!("{}{}/", indent, name.blue().bold());
            } else {
                println!("{}{}", indent, name);
            }
        }
        Ok(())
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
