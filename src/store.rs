use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use tracing::info;

use crate::record::CaseRecord;

pub const DEFAULT_FILENAME: &str = "Covid19APIResults.csv";

const HEADER: [&str; 7] = [
    "Date",
    "Province",
    "Confirmed",
    "Deaths",
    "Recovered",
    "Active",
    "New Cases",
];

/// Persisted dataset: a comma-plus-space delimited tabular file with one
/// row per (province, day) observation.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        CsvStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored dataset. A missing file means no prior state and
    /// yields an empty dataset; a malformed row is an error.
    pub fn load(&self) -> Result<Vec<CaseRecord>> {
        if !self.path.exists() {
            info!("No existing dataset at {}", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.with_context(|| format!("Failed to read {}", self.path.display()))?;
            records.push(
                CaseRecord::from_row(&row)
                    .with_context(|| format!("Malformed row in {}", self.path.display()))?,
            );
        }
        info!(
            "Loaded {} stored records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Replaces the stored dataset with `records`. The new content is
    /// written to a sibling temp file and renamed into place, so a reader
    /// never sees a partially written dataset.
    pub fn save(&self, records: &[CaseRecord]) -> Result<()> {
        if self.path.exists() {
            info!("Overwriting file: {}", self.path.display());
        } else {
            info!("Creating new file: {}", self.path.display());
        }

        let content = render(records)?;
        let tmp_path = self.path.with_extension("csv.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        info!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

// The on-disk layout separates fields with ", " (comma plus space), which a
// single-byte csv delimiter cannot express; the writer carries the space as
// a field prefix and the reader strips it via Trim::All.
fn render(records: &[CaseRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(vec![]);

    writer.write_record(spaced(HEADER.iter().map(|s| s.to_string())))?;
    for record in records {
        writer.write_record(spaced(record.to_row().into_iter()))?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to render dataset: {}", e))?;
    Ok(String::from_utf8(data)?)
}

fn spaced(fields: impl Iterator<Item = String>) -> Vec<String> {
    fields
        .enumerate()
        .map(|(i, field)| if i == 0 { field } else { format!(" {field}") })
        .collect()
}
