/*!
 * Utility functions for codemerger
 */

use std::path::{Path, PathBuf};

/// Path of `path` relative to `root`, if one can be computed
///
/// Fails for paths on another volume or when only one side is absolute.
pub fn relative_path(root: &Path, path: &Path) -> Option<PathBuf> {
    pathdiff::diff_paths(path, root).filter(|rel| !rel.as_os_str().is_empty())
}

/// Display label for a file: relative to `root` when possible, else the path verbatim
pub fn display_label(root: &Path, path: &Path) -> String {
    match relative_path(root, path) {
        Some(rel) => rel.display().to_string(),
        None => {
            log::warn!(
                "Could not compute path of {} relative to {}, using it verbatim",
                path.display(),
                root.display()
            );
            path.display().to_string()
        }
    }
}

/// Whether `path` lies strictly below `root`, by lexical prefix
pub fn is_descendant(root: &Path, path: &Path) -> bool {
    match path.strip_prefix(root) {
        Ok(rest) => !rest.as_os_str().is_empty(),
        Err(_) => false,
    }
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Format a number with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}
