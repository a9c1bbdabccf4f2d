//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for bandsight.
#[derive(Debug, thiserror::Error)]
pub enum BandsightError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid band parameters {params}: {reason}")]
    InvalidParams { params: String, reason: String },

    #[error("invalid date '{input}' (expected YYYY-MM-DD or an RFC 3339 timestamp)")]
    InvalidDate { input: String },

    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("no price data for {ticker}")]
    DataUnavailable { ticker: String },

    #[error("price data for {ticker} is not strictly increasing by date at {date}")]
    UnorderedData { ticker: String, date: NaiveDate },

    #[error("invalid adjusted close {value} on {date}")]
    InvalidPrice { date: NaiveDate, value: f64 },

    #[error("date out of bounds: no trading day within {max_lookback_days} days before {date}")]
    OutOfBounds {
        date: NaiveDate,
        max_lookback_days: u32,
    },

    #[error("bands undefined on {date}: not enough history for the rolling window")]
    UndefinedBand { date: NaiveDate },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BandsightError> for std::process::ExitCode {
    fn from(err: &BandsightError) -> Self {
        let code: u8 = match err {
            BandsightError::Io(_) => 1,
            BandsightError::ConfigParse { .. }
            | BandsightError::ConfigMissing { .. }
            | BandsightError::ConfigInvalid { .. }
            | BandsightError::InvalidDate { .. }
            | BandsightError::InvalidParams { .. } => 2,
            BandsightError::Database { .. } | BandsightError::DatabaseQuery { .. } => 3,
            BandsightError::InvalidRange { .. }
            | BandsightError::DataUnavailable { .. }
            | BandsightError::UnorderedData { .. }
            | BandsightError::InvalidPrice { .. } => 5,
            BandsightError::OutOfBounds { .. } | BandsightError::UndefinedBand { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
