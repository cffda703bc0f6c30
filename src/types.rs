/*!
 * Core types and data structures for codemerger
 */

use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;
use strum::Display;

/// Order in which discovered files are returned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DiscoveryOrder {
    /// Whatever order the filesystem yields entries in
    #[default]
    Enumeration,
    /// Sorted by path relative to the root
    Lexicographic,
}

/// Counters gathered during one discovery pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryStatistics {
    /// Directories descended into, the root included
    pub dirs_visited: usize,
    /// Directories pruned by the dot rule or the exclusion set
    pub dirs_pruned: usize,
    /// Files that matched the extension
    pub files_matched: usize,
    /// Entries dropped because they could not be read or resolved
    pub entries_skipped: usize,
}

/// Result of one discovery pass
#[derive(Debug, Clone)]
pub struct Discovery {
    /// Canonical search root
    pub root: PathBuf,
    /// Absolute paths of matching files
    pub files: Vec<PathBuf>,
    /// Traversal counters
    pub statistics: DiscoveryStatistics,
}

/// Outcome of reading one file during a combine pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    /// Content was appended to the output
    Combined {
        /// Header label used in the output
        label: String,
        /// Lines in the trimmed content
        lines: usize,
        /// Characters in the trimmed content
        chars: usize,
    },
    /// Reading failed; an error block was appended instead
    Failed {
        /// Header label used in the error block
        label: String,
        /// Error description
        error: String,
    },
}

impl FileOutcome {
    pub fn label(&self) -> &str {
        match self {
            Self::Combined { label, .. } | Self::Failed { label, .. } => label,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Result of one combine pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombineResult {
    /// All blocks joined with newlines
    pub text: String,
    /// Files whose content was appended
    pub processed: usize,
    /// Files that produced an error block
    pub errored: usize,
    /// Per-file outcomes in input order
    pub files: Vec<FileOutcome>,
}

impl CombineResult {
    /// Total lines across successfully combined files
    pub fn total_lines(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f {
                FileOutcome::Combined { lines, .. } => *lines,
                FileOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    /// Total characters across successfully combined files
    pub fn total_chars(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f {
                FileOutcome::Combined { chars, .. } => *chars,
                FileOutcome::Failed { .. } => 0,
            })
            .sum()
    }
}
