/*!
 * Directory traversal and file discovery
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use log::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{MergeError, Result};
use crate::filter::{is_directory_allowed, is_file_match, ExclusionSet, ExtensionSpec};
use crate::types::{Discovery, DiscoveryOrder, DiscoveryStatistics};
use crate::utils::is_descendant;

/// What to look for and where
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directory to search
    pub root: PathBuf,
    /// Required file name suffix
    pub extension: ExtensionSpec,
    /// Directory basenames to prune
    pub exclusions: ExclusionSet,
    /// Result ordering
    pub order: DiscoveryOrder,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>, extension: ExtensionSpec, exclusions: ExclusionSet) -> Self {
        Self {
            root: root.into(),
            extension,
            exclusions,
            order: DiscoveryOrder::default(),
        }
    }

    pub fn with_order(mut self, order: DiscoveryOrder) -> Self {
        self.order = order;
        self
    }
}

/// Scanner for files of one extension below a root directory
pub struct Scanner {
    /// Scanner configuration
    options: ScanOptions,
    /// Progress bar, ticked once per matching file
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(options: ScanOptions, progress: Arc<ProgressBar>) -> Self {
        Self { options, progress }
    }

    /// Discover matching files in enumeration order, validating raw inputs
    ///
    /// The root is checked before the extension, so a bad directory is
    /// reported even when the extension is also malformed.
    pub fn discover(root: &Path, extension: &str, exclusions: &ExclusionSet) -> Result<Vec<PathBuf>> {
        ensure_directory(root)?;
        let extension = ExtensionSpec::parse(extension)?;
        let options = ScanOptions::new(root, extension, exclusions.clone());
        let scanner = Scanner::new(options, Arc::new(ProgressBar::hidden()));
        Ok(scanner.scan()?.files)
    }

    /// Walk the root and collect every matching file
    pub fn scan(&self) -> Result<Discovery> {
        let root = resolve_root(&self.options.root)?;
        let extension = &self.options.extension;
        let exclusions = &self.options.exclusions;

        debug!(
            "Searching {} for '{}' files (excluding {:?}, {} order)",
            root.display(),
            extension,
            exclusions.sorted(),
            self.options.order
        );

        let mut statistics = DiscoveryStatistics::default();
        let mut pruned = 0;
        let mut files = Vec::new();

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                let allowed = is_directory_allowed(&name, exclusions);
                if !allowed {
                    trace!("Pruning directory {}", entry.path().display());
                    pruned += 1;
                }
                allowed
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // Nothing below an unreadable root can be trusted
                Err(e) if e.depth() == 0 => return Err(MergeError::Walk(e)),
                Err(e) => {
                    warn!("Skipping entry during file search: {}", e);
                    statistics.entries_skipped += 1;
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                statistics.dirs_visited += 1;
                self.progress
                    .set_message(format!("Searching {}", entry.path().display()));
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !is_file_match(&name, extension) || links_to_directory(&entry) {
                continue;
            }

            let path = entry.into_path();
            if !is_descendant(&root, &path) {
                warn!(
                    "Skipping {} due to path issue: not inside {}",
                    path.display(),
                    root.display()
                );
                statistics.entries_skipped += 1;
                continue;
            }

            trace!("Matched {}", path.display());
            self.progress.inc(1);
            files.push(path);
        }

        statistics.dirs_pruned = pruned;
        statistics.files_matched = files.len();

        if self.options.order == DiscoveryOrder::Lexicographic {
            // Every path shares the root prefix, so this orders by relative path
            files.sort();
        }

        debug!(
            "Found {} file(s) in {} directories ({} pruned, {} skipped)",
            statistics.files_matched,
            statistics.dirs_visited,
            statistics.dirs_pruned,
            statistics.entries_skipped
        );

        Ok(Discovery {
            root,
            files,
            statistics,
        })
    }
}

/// Fail with `InvalidDirectory` unless `root` is an existing directory
fn ensure_directory(root: &Path) -> Result<()> {
    if root.as_os_str().is_empty() || !root.is_dir() {
        return Err(MergeError::InvalidDirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Validate the root and make it absolute
fn resolve_root(root: &Path) -> Result<PathBuf> {
    ensure_directory(root)?;
    fs::canonicalize(root).map_err(|e| {
        crate::error!(Unexpected, "Could not resolve search root {}: {}", root.display(), e)
    })
}

/// Symlinks to directories are neither descended into nor treated as files
fn links_to_directory(entry: &DirEntry) -> bool {
    entry.path_is_symlink() && entry.path().is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = File::create(path).unwrap();
        writeln!(file, "# {}", rel).unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        let root = fs::canonicalize(root).unwrap();
        files
            .iter()
            .map(|f| {
                f.strip_prefix(&root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_invalid_directory() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing");
        let err = Scanner::discover(&missing, ".py", &ExclusionSet::new()).unwrap_err();
        assert!(matches!(err, MergeError::InvalidDirectory(p) if p == missing));

        touch(temp_dir.path(), "file.py");
        let file = temp_dir.path().join("file.py");
        let err = Scanner::discover(&file, ".py", &ExclusionSet::new()).unwrap_err();
        assert!(matches!(err, MergeError::InvalidDirectory(_)));

        let err = Scanner::discover(Path::new(""), ".py", &ExclusionSet::new()).unwrap_err();
        assert!(matches!(err, MergeError::InvalidDirectory(_)));
    }

    #[test]
    fn test_invalid_extension() {
        let temp_dir = tempdir().unwrap();
        for bad in ["", "py"] {
            let err = Scanner::discover(temp_dir.path(), bad, &ExclusionSet::new()).unwrap_err();
            assert!(matches!(err, MergeError::InvalidExtension(_)));
        }

        // Directory problems win over extension problems
        let err = Scanner::discover(&temp_dir.path().join("nope"), "py", &ExclusionSet::new())
            .unwrap_err();
        assert!(matches!(err, MergeError::InvalidDirectory(_)));
    }

    #[test]
    fn test_pruning_and_matching() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(root, "a.py");
        touch(root, "notes.txt");
        touch(root, "a.pyc");
        touch(root, "pkg/b.py");
        touch(root, "pkg/deep/c.py");
        touch(root, "venv/lib/site.py");
        touch(root, "pkg/venv/hidden.py");
        touch(root, ".hidden/d.py");
        touch(root, "pkg/.cache/e.py");
        // Dot files are fine, only dot directories are pruned
        touch(root, ".config.py");

        let exclusions = ExclusionSet::parse("venv");
        let options = ScanOptions::new(root, ExtensionSpec::parse(".py").unwrap(), exclusions)
            .with_order(DiscoveryOrder::Lexicographic);
        let scanner = Scanner::new(options, Arc::new(ProgressBar::hidden()));
        let discovery = scanner.scan().unwrap();

        assert_eq!(
            relative(root, &discovery.files),
            vec![".config.py", "a.py", "pkg/b.py", "pkg/deep/c.py"]
        );
        assert_eq!(discovery.root, fs::canonicalize(root).unwrap());
        assert!(discovery.files.iter().all(|f| f.is_absolute()));

        let stats = &discovery.statistics;
        assert_eq!(stats.files_matched, 4);
        // venv, pkg/venv, .hidden, pkg/.cache
        assert_eq!(stats.dirs_pruned, 4);
        // root, pkg, pkg/deep
        assert_eq!(stats.dirs_visited, 3);
        assert_eq!(stats.entries_skipped, 0);
        assert_eq!(scanner.progress.position(), 4);
    }

    #[test]
    fn test_root_is_never_pruned() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join(".venv");
        touch(&root, "x.py");
        touch(&root, "venv/y.py");

        let files = Scanner::discover(&root, ".py", &ExclusionSet::parse(".venv, venv")).unwrap();
        assert_eq!(relative(&root, &files), vec!["x.py"]);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let temp_dir = tempdir().unwrap();
        touch(temp_dir.path(), "readme.md");
        let files = Scanner::discover(temp_dir.path(), ".py", &ExclusionSet::new()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discovery_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        for rel in ["b.rs", "a.rs", "src/main.rs", "src/lib.rs", "target/debug/build.rs"] {
            touch(temp_dir.path(), rel);
        }
        let exclusions = ExclusionSet::parse("target");

        let mut first = Scanner::discover(temp_dir.path(), ".rs", &exclusions).unwrap();
        let mut second = Scanner::discover(temp_dir.path(), ".rs", &exclusions).unwrap();
        first.sort();
        second.sort();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("root");
        let outside = temp_dir.path().join("outside");
        touch(&root, "real.py");
        touch(&outside, "linked.py");
        std::os::unix::fs::symlink(root.join("real.py"), root.join("alias.py")).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("dir.py")).unwrap();

        let options = ScanOptions::new(&root, ExtensionSpec::parse(".py").unwrap(), ExclusionSet::new())
            .with_order(DiscoveryOrder::Lexicographic);
        let discovery = Scanner::new(options, Arc::new(ProgressBar::hidden()))
            .scan()
            .unwrap();

        // File links are listed, directory links are neither listed nor followed
        assert_eq!(relative(&root, &discovery.files), vec!["alias.py", "real.py"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(root, "ok.py");
        touch(root, "locked/secret.py");
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root may bypass permissions entirely
        let readable = fs::read_dir(&locked).is_ok();

        let options = ScanOptions::new(root, ExtensionSpec::parse(".py").unwrap(), ExclusionSet::new())
            .with_order(DiscoveryOrder::Lexicographic);
        let result = Scanner::new(options, Arc::new(ProgressBar::hidden())).scan();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let discovery = result.unwrap();
        if readable {
            assert_eq!(discovery.files.len(), 2);
        } else {
            assert_eq!(relative(root, &discovery.files), vec!["ok.py"]);
            assert_eq!(discovery.statistics.entries_skipped, 1);
        }
    }
}
