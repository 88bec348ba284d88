//! Structured error types for the collector's boundaries.
//!
//! Date validation and fetch failures are reported to the user and halt the
//! run without touching the persisted file; nothing here is retried.

use thiserror::Error;

/// Rejections produced while validating a collection window.
#[derive(Error, Debug)]
pub enum DateRangeError {
    /// Input did not match the yyyy-MM-ddTHH:mm:ssZ format
    #[error("Dates provided are not in a valid format: {0}")]
    InvalidFormat(String),

    /// End of the window lies after the current time
    #[error("endDate is in the future: {0}")]
    EndInFuture(String),

    /// Start and end are the same instant
    #[error("startDate is same as endDate: {0}")]
    EmptyRange(String),

    /// Start lies after end
    #[error("Dates provided are not in chronological order: {start} > {end}")]
    OutOfOrder { start: String, end: String },
}

/// Ways the case API can be unavailable. The pipeline treats every variant
/// the same: report, halt, leave the stored dataset untouched.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Could not reach the API at all
    #[error("Could not connect to the case API: {0}")]
    Connection(#[source] reqwest::Error),

    /// Reached the API but got a non-success response
    #[error("Case API returned status {0}")]
    Status(reqwest::StatusCode),

    /// Response body was not the expected JSON payload
    #[error("Could not decode case API response: {0}")]
    MalformedBody(#[source] reqwest::Error),
}
