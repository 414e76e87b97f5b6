//! Result persistence.
//!
//! Writes the final result table as a small CSV file with a fixed column
//! order (`k,avg_time,ci`), one row per successfully-measured chunk size, in
//! sweep order. The file is truncated on every run so re-running the harness
//! replaces the previous results, and it is flushed before the writer
//! returns so the renderer can be invoked immediately afterwards.

use crate::stats::AggregateResult;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// CSV header naming the result columns.
const CSV_HEADER: &str = "k,avg_time,ci";

/// Writes the result table to a CSV file.
pub struct ResultsWriter {
    output_file: PathBuf,
}

impl ResultsWriter {
    /// Create a writer targeting `output_file`.
    pub fn new(output_file: &Path) -> Self {
        Self {
            output_file: output_file.to_path_buf(),
        }
    }

    /// Write the whole table, replacing any previous results file.
    pub fn write(&self, table: &[AggregateResult]) -> Result<()> {
        let file = File::create(&self.output_file).with_context(|| {
            format!(
                "Failed to create results file {}",
                self.output_file.display()
            )
        })?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{CSV_HEADER}")?;
        for row in table {
            writeln!(writer, "{},{},{}", row.k, row.avg_time, row.ci)?;
        }

        writer
            .flush()
            .context("Failed to flush results file to disk")?;

        info!("Results saved to {}", self.output_file.display());
        Ok(())
    }
}
