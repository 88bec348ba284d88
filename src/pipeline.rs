use anyhow::{Context, Result};
use tracing::info;

use crate::dates::DateRange;
use crate::delta;
use crate::fetch::CaseSource;
use crate::reconcile;
use crate::store::CsvStore;

/// Runs one collection pass: fetch the window (plus seed day), derive
/// new-case deltas, reconcile against the stored dataset, persist.
///
/// The stages run strictly in this order and only this function knows all
/// of them. A fetch or load failure halts the pass before anything is
/// written, leaving the stored dataset untouched.
pub async fn run(range: &DateRange, source: &dyn CaseSource, store: &CsvStore) -> Result<()> {
    let raw = source
        .fetch(range)
        .await
        .context("Fetching case data failed")?;

    let fresh = delta::compute_new_cases(raw, range.seed_day());
    info!("{} records in the fetched window", fresh.len());

    let prior = store.load().context("Reading the stored dataset failed")?;
    let merged = reconcile::merge(prior, fresh);
    info!("{} records after reconciliation", merged.len());

    store
        .save(&merged)
        .context("Writing the merged dataset failed")?;
    Ok(())
}
