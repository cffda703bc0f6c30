/*!
 * Directory and file eligibility rules
 *
 * Pure predicates deciding which directories are descended into and which
 * files are picked up during discovery.
 */

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::{MergeError, Result};

/// Folder names excluded when the caller does not configure any
pub const DEFAULT_EXCLUDED_FOLDERS: &str = "venv, .git, __pycache__, node_modules, build, dist";

/// Parsed form of [`DEFAULT_EXCLUDED_FOLDERS`]
pub static DEFAULT_EXCLUSIONS: Lazy<ExclusionSet> =
    Lazy::new(|| ExclusionSet::parse(DEFAULT_EXCLUDED_FOLDERS));

/// A file name suffix such as `.py`
///
/// Always non-empty and starting with a dot. Matching is a literal,
/// case-sensitive suffix comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionSpec(String);

impl ExtensionSpec {
    /// Validate a raw extension string (surrounding whitespace is ignored)
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.starts_with('.') {
            return Err(MergeError::InvalidExtension(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The suffix including its leading dot
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The suffix with leading and trailing dots removed, for file naming
    pub fn stem(&self) -> &str {
        self.0.trim_matches('.')
    }
}

impl FromStr for ExtensionSpec {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ExtensionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory basenames pruned from discovery
///
/// Entries are compared against the basename of each directory, never
/// against a path. Whitespace around entries is trimmed and empty entries
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    /// An empty set; only the dot-directory rule applies
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list such as `"venv, .git, build"`
    pub fn parse(list: &str) -> Self {
        list.split(',').collect()
    }

    /// Add a single folder name
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.names.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries in sorted order, for display
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

/// Check whether discovery may descend into a directory with this basename
///
/// Hidden directories (leading `.`) are always refused, whatever the
/// exclusion set contains.
pub fn is_directory_allowed(basename: &str, exclusions: &ExclusionSet) -> bool {
    !basename.starts_with('.') && !exclusions.contains(basename)
}

/// Check whether a file name carries the requested extension
pub fn is_file_match(filename: &str, extension: &ExtensionSpec) -> bool {
    filename.ends_with(extension.as_str())
}
