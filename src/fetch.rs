use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::dates::{self, DateRange};
use crate::errors::FetchError;
use crate::record::CaseRecord;

pub const DEFAULT_BASE_URL: &str = "https://api.covid19api.com";
pub const DEFAULT_COUNTRY: &str = "canada";

/// Source of per-province daily case counts for a date window.
///
/// Implementations fetch one extra day before the window (the seed day) so
/// the delta stage has a predecessor for the first requested day.
#[async_trait]
pub trait CaseSource {
    async fn fetch(&self, range: &DateRange) -> Result<Vec<CaseRecord>, FetchError>;
}

/// Shape of one entry in the covid19api country endpoint's JSON array.
/// Fields the collector does not use (country, coordinates, city) are
/// ignored on deserialization.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ApiRecord {
    province: String,
    confirmed: u64,
    deaths: u64,
    recovered: u64,
    active: u64,
    date: DateTime<Utc>,
}

impl From<ApiRecord> for CaseRecord {
    fn from(api: ApiRecord) -> Self {
        CaseRecord {
            date: api.date.date_naive(),
            province: api.province,
            confirmed: api.confirmed,
            deaths: api.deaths,
            recovered: api.recovered,
            active: api.active,
            new_cases: 0,
        }
    }
}

/// Client for the covid19api historical country endpoint.
pub struct Covid19Api {
    client: reqwest::Client,
    base_url: String,
    country: String,
}

impl Covid19Api {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_BASE_URL, DEFAULT_COUNTRY)
    }

    pub fn with_endpoint(base_url: &str, country: &str) -> Self {
        Covid19Api {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            country: country.to_string(),
        }
    }
}

impl Default for Covid19Api {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaseSource for Covid19Api {
    async fn fetch(&self, range: &DateRange) -> Result<Vec<CaseRecord>, FetchError> {
        let url = format!("{}/country/{}", self.base_url, self.country);
        let from = dates::format_day(range.seed_day());
        let to = dates::format_timestamp(range.end);
        debug!("GET {} from={} to={}", url, from, to);

        let response = self
            .client
            .get(&url)
            .query(&[("from", from.as_str()), ("to", to.as_str())])
            .send()
            .await
            .map_err(FetchError::Connection)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let records: Vec<ApiRecord> = response.json().await.map_err(FetchError::MalformedBody)?;
        info!("Fetched {} records from the case API", records.len());
        Ok(records.into_iter().map(CaseRecord::from).collect())
    }
}
