//! Batch aggregation
//!
//! scan → (per file) detect stage → extract fields → append row → save once

use crate::detector::detect_layout;
use crate::error::Result;
use crate::extractor::extract_fields;
use crate::master::MasterTable;
use crate::scanner::scan_folder;
use crate::workbook::WorkbookFile;
use ro_harvest_common::{column_order, ExtractedRow};
use std::path::{Path, PathBuf};

/// A report that contributed no row
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one batch run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Report files found under the input folder
    pub scanned: usize,
    /// Rows appended by this run
    pub appended: usize,
    pub skipped: Vec<SkippedFile>,
    /// Rows in the saved table, including earlier runs
    pub total_rows: usize,
}

/// Detects the stage of one report and extracts its row
pub fn process_file(path: &Path) -> Result<ExtractedRow> {
    let mut book = WorkbookFile::new(path);
    let layout = detect_layout(&mut book)?;
    println!("✔ {} detected", layout.stage());
    Ok(extract_fields(&mut book, layout))
}

/// Appends one row per readable report to `table` and hands it back.
///
/// Files whose stage cannot be detected are reported and skipped.
pub fn aggregate(files: &[PathBuf], mut table: MasterTable) -> (MasterTable, BatchSummary) {
    let mut summary = BatchSummary {
        scanned: files.len(),
        ..Default::default()
    };

    for file in files {
        println!("\nProcessing: {}", file.display());
        match process_file(file) {
            Ok(row) => {
                tracing::debug!(
                    "{}: {} of {} fields empty",
                    file.display(),
                    row.missing_count(),
                    row.len()
                );
                table.append(&row);
                summary.appended += 1;
            }
            Err(e) => {
                println!("✖ {}", e);
                summary.skipped.push(SkippedFile {
                    path: file.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    summary.total_rows = table.len();
    (table, summary)
}

/// Processes every report under `input_dir` and rewrites `output_path`
pub fn run_batch(input_dir: &Path, output_path: &Path) -> Result<BatchSummary> {
    let files = scan_folder(input_dir)?;
    println!("✔ {} report file(s) found", files.len());

    let columns = column_order();
    let table = MasterTable::load_or_new(output_path, &columns)?;
    if !table.is_empty() {
        println!("✔ Loaded {} existing row(s) from {}", table.len(), output_path.display());
    }

    let (table, summary) = aggregate(&files, table);

    table.save(output_path)?;
    println!("\n✅ Master CSV updated: {}", output_path.display());

    Ok(summary)
}
