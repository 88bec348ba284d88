use chrono::NaiveDate;
use tracing::debug;

use crate::record::CaseRecord;

/// Derives day-over-day new-case counts from cumulative confirmed totals.
///
/// The input is expected to include one extra day before the requested
/// window (`seed`), which exists only to give each province's first
/// requested day a predecessor. After the subtraction pass, seed-day rows
/// and country-aggregate rows are dropped.
///
/// A province's first visible day keeps `new_cases = 0`. A drop in the
/// cumulative total (upstream correction) yields a negative delta, which is
/// kept as-is.
pub fn compute_new_cases(mut records: Vec<CaseRecord>, seed: NaiveDate) -> Vec<CaseRecord> {
    records.sort_by(|a, b| a.canonical_cmp(b));

    let deltas: Vec<i64> = records
        .iter()
        .enumerate()
        .map(|(i, record)| match i.checked_sub(1).map(|p| &records[p]) {
            Some(prev) if prev.province == record.province => {
                record.confirmed as i64 - prev.confirmed as i64
            }
            _ => 0,
        })
        .collect();

    let before = records.len();
    let computed: Vec<CaseRecord> = records
        .into_iter()
        .zip(deltas)
        .map(|(record, new_cases)| CaseRecord {
            new_cases,
            ..record
        })
        .filter(|record| record.date != seed && !record.is_aggregate())
        .collect();
    debug!(
        "Computed deltas for {} records, {} kept after seed-day and aggregate filtering",
        before,
        computed.len()
    );
    computed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(province: &str, day: &str, confirmed: u64) -> CaseRecord {
        CaseRecord {
            date: day.parse().unwrap(),
            province: province.to_string(),
            confirmed,
            deaths: 0,
            recovered: 0,
            active: 0,
            new_cases: 0,
        }
    }

    fn seed() -> NaiveDate {
        "2024-01-09".parse().unwrap()
    }

    #[test]
    fn subtracts_consecutive_days_within_a_province() {
        let records = vec![
            record("Ontario", "2024-01-09", 100),
            record("Ontario", "2024-01-10", 130),
            record("Ontario", "2024-01-11", 125),
        ];
        let computed = compute_new_cases(records, seed());
        let deltas: Vec<i64> = computed.iter().map(|r| r.new_cases).collect();
        assert_eq!(deltas, vec![30, -5]);
    }

    #[test]
    fn province_boundary_resets_the_delta() {
        let records = vec![
            record("Ontario", "2024-01-10", 500),
            record("Quebec", "2024-01-10", 40),
            record("Quebec", "2024-01-11", 45),
        ];
        let computed = compute_new_cases(records, seed());
        assert_eq!(computed[0].province, "Ontario");
        assert_eq!(computed[0].new_cases, 0);
        assert_eq!(computed[1].new_cases, 0);
        assert_eq!(computed[2].new_cases, 5);
    }

    #[test]
    fn drops_seed_day_and_aggregate_rows() {
        let records = vec![
            record("", "2024-01-10", 1000),
            record("Ontario", "2024-01-09", 100),
            record("Ontario", "2024-01-10", 110),
        ];
        let computed = compute_new_cases(records, seed());
        assert_eq!(computed.len(), 1);
        assert_eq!(computed[0].province, "Ontario");
        assert_eq!(computed[0].date.to_string(), "2024-01-10");
        assert_eq!(computed[0].new_cases, 10);
    }

    #[test]
    fn unsorted_input_is_handled() {
        let records = vec![
            record("Ontario", "2024-01-11", 125),
            record("Ontario", "2024-01-09", 100),
            record("Ontario", "2024-01-10", 130),
        ];
        let computed = compute_new_cases(records, seed());
        let deltas: Vec<i64> = computed.iter().map(|r| r.new_cases).collect();
        assert_eq!(deltas, vec![30, -5]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(compute_new_cases(Vec::new(), seed()).is_empty());
    }
}
