/*!
 * codemerger - combine every file of one extension into a single text blob
 *
 * The engine walks a directory tree (pruning hidden and excluded folders),
 * lets the caller narrow the discovered files through a selection, and
 * concatenates the selected files between `--- File: ... ---` markers.
 * Unreadable files are reported inline instead of aborting the run.
 */

pub mod clipboard;
pub mod combiner;
pub mod config;
pub mod error;
pub mod filter;
pub mod report;
pub mod scanner;
pub mod selection;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use combiner::combine;
pub use config::Config;
pub use error::{MergeError, Result};
pub use filter::{is_directory_allowed, is_file_match, ExclusionSet, ExtensionSpec};
pub use report::{ReportFormat, Reporter, RunReport};
pub use scanner::{ScanOptions, Scanner};
pub use selection::SelectionState;
pub use types::{CombineResult, Discovery, DiscoveryOrder, DiscoveryStatistics, FileOutcome};
pub use writer::TextWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
