/*!
 * Configuration handling for codemerger
 */

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use clap_complete::Shell;

use crate::error::{MergeError, Result};
use crate::filter::{ExclusionSet, ExtensionSpec, DEFAULT_EXCLUDED_FOLDERS};
use crate::report::ReportFormat;
use crate::scanner::ScanOptions;
use crate::types::DiscoveryOrder;

/// Command-line arguments for codemerger
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codemerger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Combine every file of one extension under a directory into a single text blob",
    long_about = "Finds all files with the given extension below a directory (skipping hidden and excluded folders) and concatenates their contents, each wrapped in '--- File: ... ---' markers."
)]
pub struct Args {
    /// Target directory to search
    #[clap(default_value = ".")]
    pub directory: PathBuf,

    /// File extension to collect, including the leading dot
    #[clap(short, long = "ext", default_value = ".py")]
    pub extension: String,

    /// Comma-separated folder names to skip
    #[clap(short = 'x', long, default_value = DEFAULT_EXCLUDED_FOLDERS)]
    pub exclude: String,

    /// Order of discovered files
    #[clap(long, value_enum, default_value_t = DiscoveryOrder::Lexicographic)]
    pub order: DiscoveryOrder,

    /// Only list the files that would be combined
    #[clap(long)]
    pub preview: bool,

    /// Leave a discovered file out, given relative to the directory (repeatable)
    #[clap(long = "skip", value_name = "PATH")]
    pub skip: Vec<PathBuf>,

    /// Save the combined output to this file (or into this directory under the default name)
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Copy output to clipboard
    #[clap(long, help = "Copy output to system clipboard")]
    pub clip: bool,

    /// Summary printed to stderr after combining
    #[clap(long, value_enum, default_value_t = ReportFormat::Table)]
    pub report: ReportFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silence logging and the progress spinner
    #[clap(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Validated run configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to search
    pub target_dir: PathBuf,

    /// Extension to collect
    pub extension: ExtensionSpec,

    /// Folder names to prune
    pub exclusions: ExclusionSet,

    /// Order of discovered files
    pub order: DiscoveryOrder,

    /// Stop after listing discovered files
    pub preview: bool,

    /// Files to deselect, relative to the target directory
    pub skip: Vec<PathBuf>,

    /// Output file or directory
    pub output: Option<PathBuf>,

    /// Copy output to clipboard
    pub clip: bool,

    /// Report format
    pub report: ReportFormat,

    /// Log level derived from -v/-q
    pub log_level: log::LevelFilter,
}

impl Config {
    /// Create configuration from command-line arguments
    ///
    /// The directory is checked before the extension, so a bad directory is
    /// reported even when the extension is also malformed.
    pub fn from_args(args: Args) -> Result<Self> {
        if !args.directory.is_dir() {
            return Err(MergeError::InvalidDirectory(args.directory));
        }
        let extension = ExtensionSpec::parse(&args.extension)?;
        let log_level = if args.quiet {
            log::LevelFilter::Off
        } else {
            match args.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        };

        Ok(Self {
            target_dir: args.directory,
            extension,
            exclusions: ExclusionSet::parse(&args.exclude),
            order: args.order,
            preview: args.preview,
            skip: args.skip,
            output: args.output,
            clip: args.clip,
            report: args.report,
            log_level,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(output) = &self.output {
            if !output.is_dir() {
                if let Some(parent) = output.parent() {
                    crate::ensure!(
                        parent.as_os_str().is_empty() || parent.is_dir(),
                        Config,
                        "Output directory not found: {}",
                        parent.display()
                    );
                }
            }
        }

        Ok(())
    }

    /// Scanner options for this run
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new(
            self.target_dir.clone(),
            self.extension.clone(),
            self.exclusions.clone(),
        )
        .with_order(self.order)
    }
}
