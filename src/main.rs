/*!
 * Command-line interface for codemerger
 */

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use codemerger::clipboard::copy_to_clipboard;
use codemerger::combiner::combine;
use codemerger::config::{Args, Config};
use codemerger::report::{Reporter, RunReport};
use codemerger::scanner::Scanner;
use codemerger::selection::SelectionState;
use codemerger::utils::display_label;
use codemerger::writer::TextWriter;

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "codemerger", &mut io::stdout());
        return Ok(());
    }

    // Create and validate configuration
    let config = Config::from_args(args)?;
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .format_timestamp(None)
        .init();
    config.validate()?;

    let start_time = Instant::now();

    let progress = if config.log_level == log::LevelFilter::Off {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {pos} file(s) {wide_msg:.dim}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };
    progress.set_message(format!(
        "Searching for '{}' files...",
        config.extension
    ));

    // Discover files
    let scanner = Scanner::new(config.scan_options(), Arc::new(progress.clone()));
    let discovery = scanner.scan();
    progress.finish_and_clear();
    let discovery = discovery?;

    if discovery.files.is_empty() {
        eprintln!("Preview complete. No matching files found.");
        return Ok(());
    }

    if config.preview {
        let mut stdout = io::stdout().lock();
        for file in &discovery.files {
            writeln!(stdout, "{}", display_label(&discovery.root, file))?;
        }
        eprintln!(
            "Preview complete. Found {} file(s). Ready to combine.",
            discovery.files.len()
        );
        return Ok(());
    }

    // Apply deselections
    let mut selection = SelectionState::new(discovery.files.iter().cloned());
    for rel in &config.skip {
        if !selection.set_included(&discovery.root.join(rel), false) {
            warn!("--skip {} does not match any discovered file", rel.display());
        }
    }

    let selected = selection.included_paths();
    if selected.is_empty() {
        eprintln!("No files selected to combine.");
        return Ok(());
    }

    info!("Combining {} selected file(s)...", selected.len());
    let result = combine(&discovery.root, &selected);

    // Deliver output
    let mut destinations = Vec::new();
    if result.processed == 0 && (config.output.is_some() || config.clip) {
        warn!("No selected files processed successfully; nothing to save or copy");
    } else {
        if let Some(target) = &config.output {
            let writer = TextWriter::for_target(target, &config.extension);
            writer.write(&result.text)?;
            destinations.push(writer.output_file().display().to_string());
        }
        if config.clip {
            copy_to_clipboard(result.text.trim()).map_err(codemerger::MergeError::from)?;
            destinations.push("clipboard".to_string());
        }
    }
    if config.output.is_none() && !config.clip {
        let mut stdout = io::stdout().lock();
        stdout.write_all(result.text.as_bytes())?;
        stdout.flush()?;
        destinations.push("stdout".to_string());
    }
    if destinations.is_empty() {
        destinations.push("none".to_string());
    }

    let report = RunReport::new(
        destinations.join(", "),
        start_time.elapsed(),
        discovery.statistics,
        selected.len(),
        &result,
    );
    Reporter::new(config.report).print_report(&report)?;

    Ok(())
}
