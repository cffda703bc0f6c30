/*!
 * Concatenation of file contents into one delimited text blob
 */

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::types::{CombineResult, FileOutcome};
use crate::utils::display_label;

/// Header line opening a file block
pub fn file_header(label: &str) -> String {
    format!("--- File: {} ---", label)
}

/// Footer line closing a file block; the trailing newline leaves a blank line
/// between consecutive blocks
pub fn file_footer(label: &str) -> String {
    format!("--- End File: {} ---\n", label)
}

/// Block emitted in place of a file that could not be read
pub fn error_block(label: &str, error: &str) -> String {
    format!(
        "--- Error reading file: {} ---\nError: {}\n--- End Error ---\n",
        label, error
    )
}

/// Read every path in order and join the delimited contents
///
/// A file that cannot be read contributes one error block and bumps
/// `errored`; the remaining files are still processed. `root` may be given
/// as typed (relative, or through symlinks) even though discovery returns
/// canonical paths; labels are taken against whichever form contains the file.
pub fn combine<P: AsRef<Path>>(root: &Path, paths: &[P]) -> CombineResult {
    let mut blocks: Vec<String> = Vec::with_capacity(paths.len() * 3);
    let mut result = CombineResult::default();
    let resolved = fs::canonicalize(root).ok();

    for path in paths {
        let path = path.as_ref();
        let label = display_label(label_root(root, resolved.as_deref(), path), path);
        debug!("Processing {}", label);

        match read_lossy(path) {
            Ok(content) => {
                let content = content.trim();
                result.files.push(FileOutcome::Combined {
                    label: label.clone(),
                    lines: content.lines().count(),
                    chars: content.chars().count(),
                });
                blocks.push(file_header(&label));
                blocks.push(content.to_string());
                blocks.push(file_footer(&label));
                result.processed += 1;
            }
            Err(e) => {
                warn!("Could not read file {}: {}", path.display(), e);
                let error = e.to_string();
                blocks.push(error_block(&label, &error));
                result.files.push(FileOutcome::Failed { label, error });
                result.errored += 1;
            }
        }
    }

    result.text = blocks.join("\n");
    result
}

/// Root to label `path` against: as given when it contains the path, else
/// its canonical form when that does
fn label_root<'a>(root: &'a Path, resolved: Option<&'a Path>, path: &Path) -> &'a Path {
    match resolved {
        Some(resolved) if !path.starts_with(root) && path.starts_with(resolved) => resolved,
        _ => root,
    }
}

/// Read a file as text, dropping byte sequences that are not valid UTF-8
pub fn read_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            let bytes = e.into_bytes();
            let mut text = String::with_capacity(bytes.len());
            for chunk in bytes.utf8_chunks() {
                text.push_str(chunk.valid());
            }
            Ok(text)
        }
    }
}
