use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use csv::StringRecord;

use crate::dates;

/// Province name the API uses for the whole-country aggregate row.
/// Aggregate rows never reach the persisted file.
pub const AGGREGATE_PROVINCE: &str = "";

/// One province's cumulative case counts on one calendar day.
///
/// Records are value objects: once the delta stage has produced them they
/// are never mutated, only moved between stages as collections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseRecord {
    pub date: NaiveDate,
    pub province: String,
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
    pub active: u64,
    /// Day-over-day increase in `confirmed`; 0 when no predecessor exists.
    /// Negative values are legitimate (upstream data corrections).
    pub new_cases: i64,
}

/// Identity of a record for deduplication: two records describe the same
/// observation iff province and date match, whatever their metric values.
///
/// This is deliberately a separate type from `CaseRecord` equality, which
/// compares all fields. Dedup goes through `RecordKey`, never through
/// `CaseRecord == CaseRecord`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub province: String,
    pub date: NaiveDate,
}

impl CaseRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey {
            province: self.province.clone(),
            date: self.date,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        self.province == AGGREGATE_PROVINCE
    }

    /// Canonical dataset ordering: province lexicographic, then date.
    pub fn canonical_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.province
            .cmp(&other.province)
            .then(self.date.cmp(&other.date))
    }

    /// Parses one persisted CSV row. Column order matches `to_row`.
    pub fn from_row(row: &StringRecord) -> Result<Self> {
        if row.len() < 7 {
            return Err(anyhow!("Expected 7 columns, found {}", row.len()));
        }
        let field = |i: usize| row.get(i).unwrap_or("");
        Ok(CaseRecord {
            date: dates::parse_day(field(0))?,
            province: field(1).to_string(),
            confirmed: field(2).parse()?,
            deaths: field(3).parse()?,
            recovered: field(4).parse()?,
            active: field(5).parse()?,
            new_cases: field(6).parse()?,
        })
    }

    /// Columns in persisted order: date, province, confirmed, deaths,
    /// recovered, active, new cases.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            dates::format_day(self.date),
            self.province.clone(),
            self.confirmed.to_string(),
            self.deaths.to_string(),
            self.recovered.to_string(),
            self.active.to_string(),
            self.new_cases.to_string(),
        ]
    }
}
