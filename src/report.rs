/*!
 * Reporting functionality for codemerger
 *
 * Renders the outcome of a combine pass either as console tables (via the
 * tabled library) or as JSON.
 */

use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::error::Result;
use crate::types::{CombineResult, DiscoveryStatistics, FileOutcome};
use crate::utils::{format_file_size, format_number};

/// Everything worth telling the user after a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Where the output went (file path, "clipboard", "stdout")
    pub destination: String,
    /// Time taken by discovery and combination
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
    /// Files found by discovery
    pub files_found: usize,
    /// Files selected for combination
    pub files_selected: usize,
    /// Files whose content was combined
    pub files_processed: usize,
    /// Files that could not be read
    pub files_errored: usize,
    /// Lines across combined files
    pub total_lines: usize,
    /// Characters across combined files
    pub total_chars: usize,
    /// Size of the combined text in bytes
    pub output_bytes: usize,
    /// Traversal counters
    pub discovery: DiscoveryStatistics,
    /// Per-file outcomes in output order
    pub files: Vec<FileOutcome>,
}

impl RunReport {
    /// Assemble a report from a finished combine pass
    pub fn new(
        destination: impl Into<String>,
        duration: Duration,
        discovery: DiscoveryStatistics,
        files_selected: usize,
        result: &CombineResult,
    ) -> Self {
        Self {
            destination: destination.into(),
            duration,
            files_found: discovery.files_matched,
            files_selected,
            files_processed: result.processed,
            files_errored: result.errored,
            total_lines: result.total_lines(),
            total_chars: result.total_chars(),
            output_bytes: result.text.len(),
            discovery,
            files: result.files.clone(),
        }
    }

    /// One-line summary of the combine pass
    pub fn status_line(&self) -> String {
        if self.files_processed > 0 {
            let mut status = format!("Combined {} selected file(s).", self.files_processed);
            if self.files_errored > 0 {
                status.push_str(&format!(
                    " Encountered {} read error(s).",
                    self.files_errored
                ));
            }
            status
        } else {
            format!(
                "Combine complete. No selected files processed successfully (Errors: {}).",
                self.files_errored
            )
        }
    }
}

fn serialize_duration<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Format of the report output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Console tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// No report at all
    None,
}

/// Report generator for combine results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            ReportFormat::Table => Ok(self.generate_console_report(report)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportFormat::None => Ok(String::new()),
        }
    }

    /// Print the report to stderr, keeping stdout free for the combined text
    pub fn print_report(&self, report: &RunReport) -> Result<()> {
        let rendered = self.generate_report(report)?;
        if !rendered.is_empty() {
            eprintln!("\n{}", rendered);
        }
        Ok(())
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "📂 Output",
                value: report.destination.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "🔎 Files Found",
                value: format_number(report.files_found),
            },
            SummaryRow {
                key: "☑️ Files Selected",
                value: format_number(report.files_selected),
            },
            SummaryRow {
                key: "📄 Files Processed",
                value: format_number(report.files_processed),
            },
            SummaryRow {
                key: "⚠️ Read Errors",
                value: format_number(report.files_errored),
            },
            SummaryRow {
                key: "📝 Total Lines",
                value: format_number(report.total_lines),
            },
            SummaryRow {
                key: "📦 Output Size",
                value: format_file_size(report.output_bytes as u64),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Status")]
            status: String,
        }

        let rows: Vec<FileRow> = report
            .files
            .iter()
            .map(|outcome| match outcome {
                FileOutcome::Combined { label, lines, .. } => FileRow {
                    path: truncate_label(label, 60),
                    lines: format_number(*lines),
                    status: "ok".to_string(),
                },
                FileOutcome::Failed { label, error } => FileRow {
                    path: truncate_label(label, 60),
                    lines: "-".to_string(),
                    status: error.clone(),
                },
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &RunReport) -> String {
        let mut sections = Vec::new();
        if !report.files.is_empty() {
            sections.push(format!(
                "📋  COMBINED FILES\n{}",
                self.create_files_table(report)
            ));
        }
        sections.push(format!(
            "✅  {}\n{}",
            report.status_line(),
            self.create_summary_table(report)
        ));
        sections.join("\n\n")
    }
}

/// Shorten a label to `max_len` characters, keeping its tail
fn truncate_label(label: &str, max_len: usize) -> String {
    let count = label.chars().count();
    if count <= max_len {
        return label.to_string();
    }
    let tail: String = label.chars().skip(count - (max_len - 3)).collect();
    format!("...{}", tail)
}
