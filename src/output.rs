//! CSV and summary writers.
//!
//! Field values go out verbatim. The csv crate quotes any value containing
//! a comma, quote or newline, so multi-line abstracts read back unchanged.

use crate::error::Result;
use crate::pipeline::PipelineOutcome;
use crate::segment::{FieldSet, COMPLETE_COLUMNS};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name for records above the completeness threshold
pub const COMPLETE_FILE: &str = "complete_records.csv";

/// File name for the remaining records
pub const PARTIAL_FILE: &str = "partial_records.csv";

/// File name for the run summary
pub const SUMMARY_FILE: &str = "run_summary.json";

/// Counts describing one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub term: String,
    pub total_count: usize,
    pub retrieval_calls: usize,
    pub records: usize,
    pub complete: usize,
    pub partial: usize,
}

impl RunSummary {
    pub fn new(term: &str, outcome: &PipelineOutcome) -> Self {
        Self {
            term: term.to_string(),
            total_count: outcome.session.total_count,
            retrieval_calls: outcome.retrieval_calls,
            records: outcome.records.len(),
            complete: outcome.table.complete.len(),
            partial: outcome.table.partial.len(),
        }
    }
}

/// Paths of the files written for one run
#[derive(Debug, Clone)]
pub struct WrittenFiles {
    pub complete: PathBuf,
    pub partial: PathBuf,
    pub summary: PathBuf,
}

/// Write rows to `path`, with an optional header line.
///
/// Rows may differ in width; nothing is padded or truncated.
pub fn write_rows(path: &Path, header: Option<&[&str]>, rows: &[FieldSet]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(path)?;

    if let Some(header) = header {
        wtr.write_record(header)?;
    }
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    info!(path = %path.display(), rows = rows.len(), "Saved CSV");
    Ok(())
}

/// Write both partitions and the summary into `dir`.
pub fn write_outcome(dir: &Path, term: &str, outcome: &PipelineOutcome) -> Result<WrittenFiles> {
    std::fs::create_dir_all(dir)?;

    let files = WrittenFiles {
        complete: dir.join(COMPLETE_FILE),
        partial: dir.join(PARTIAL_FILE),
        summary: dir.join(SUMMARY_FILE),
    };

    write_rows(&files.complete, Some(COMPLETE_COLUMNS), &outcome.table.complete)?;
    write_rows(&files.partial, None, &outcome.table.partial)?;

    let summary = RunSummary::new(term, outcome);
    std::fs::write(&files.summary, serde_json::to_string_pretty(&summary)?)?;
    info!(path = %files.summary.display(), "Saved run summary");

    Ok(files)
}
