//! Command-line interface for clean-folder.
//!
//! Parses arguments, merges them over the optional configuration file, runs
//! the pipeline and prints the result.

use crate::config::{OrganizerConfig, UnreadablePolicy};
use crate::error::OrganizeResult;
use crate::output::OutputFormatter;
use crate::pipeline::Organizer;
use crate::report::RunReport;
use clap::Parser;
use std::path::PathBuf;

/// Sort a folder into images, video, documents, audio, archives and other.
#[derive(Debug, Clone, Parser)]
#[command(name = "clean-folder", version, about)]
pub struct Args {
    /// Directory to organize in place.
    pub root: PathBuf,

    /// TOML file with filter and archive settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to do with files that look like archives but cannot be unpacked.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_unreadable: Option<UnreadablePolicy>,

    /// Show what would happen without changing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Print the resulting directory tree.
    #[arg(long)]
    pub tree: bool,

    /// More log output (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default log filter for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Loads the configuration file, if any, and applies flag overrides.
    pub fn resolve_config(&self) -> OrganizeResult<OrganizerConfig> {
        let mut config = OrganizerConfig::load(self.config.as_deref())?;
        if let Some(policy) = self.on_unreadable {
            config.archives.on_unreadable = policy;
        }
        Ok(config)
    }
}

/// Runs the command described by `args` and returns its report.
pub fn run_cli(args: &Args) -> OrganizeResult<RunReport> {
    let config = args.resolve_config()?;
    let mut organizer = Organizer::new(config);

    let report = if args.dry_run {
        organizer.plan(&args.root)?
    } else {
        if !args.json {
            OutputFormatter::info(&format!("Organizing contents of: {}", args.root.display()));
            organizer = organizer.with_progress(OutputFormatter::create_progress_bar(0));
        }
        organizer.run(&args.root)?
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => OutputFormatter::error(&format!("Could not serialize report: {e}")),
        }
    } else {
        OutputFormatter::summary(&report);
        if !report.dry_run {
            OutputFormatter::success("Organization complete!");
        }
    }

    if args.tree {
        OutputFormatter::print_tree(&report.root)?;
    }
    Ok(report)
}
