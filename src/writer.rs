/*!
 * Saving combined output to disk
 */

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{MergeError, Result};
use crate::filter::ExtensionSpec;

/// Default output file name for an extension, e.g. `codemerger_output_py.txt`
pub fn default_file_name(extension: &ExtensionSpec) -> String {
    format!("codemerger_output_{}.txt", extension.stem())
}

/// Plain-text writer for combined output
pub struct TextWriter {
    /// Destination file
    output_file: PathBuf,
}

impl TextWriter {
    /// Create a writer for an explicit destination
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
        }
    }

    /// Create a writer, placing the default file name inside `target` when
    /// it is an existing directory
    pub fn for_target(target: &Path, extension: &ExtensionSpec) -> Self {
        if target.is_dir() {
            Self::new(target.join(default_file_name(extension)))
        } else {
            Self::new(target)
        }
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Write the combined text with surrounding whitespace removed
    ///
    /// Returns the number of bytes written.
    pub fn write(&self, text: &str) -> Result<usize> {
        let content = text.trim();
        if content.is_empty() {
            return Err(MergeError::EmptyOutput);
        }

        let file = File::create(&self.output_file)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;

        info!("Output saved successfully to {}", self.output_file.display());
        Ok(content.len())
    }
}
