//! Configuration validation.
//!
//! Validates all config fields before a store is built. Every key is optional;
//! only values that are present are checked against their bounds.

use crate::domain::error::BandsightError;
use crate::domain::indicator::MAX_WINDOW;
use crate::ports::config_port::ConfigPort;

pub const DATA_SOURCES: &[&str] = &["csv", "sqlite"];

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), BandsightError> {
    validate_data_source(config)?;
    validate_window(config)?;
    validate_span(config)?;
    validate_num_std(config)?;
    validate_lookback(config)?;
    validate_dates(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> BandsightError {
    BandsightError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_data_source(config: &dyn ConfigPort) -> Result<(), BandsightError> {
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "csv".to_string());
    if !DATA_SOURCES.contains(&source.to_lowercase().as_str()) {
        return Err(invalid("data", "source", "source must be one of: csv, sqlite"));
    }
    if source.eq_ignore_ascii_case("sqlite") && config.get_string("sqlite", "path").is_none() {
        return Err(BandsightError::ConfigMissing {
            section: "sqlite".to_string(),
            key: "path".to_string(),
        });
    }
    Ok(())
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), BandsightError> {
    let value = config.get_int("bands", "window", 30);
    if value < 2 {
        return Err(invalid("bands", "window", "window must be at least 2"));
    }
    if value > MAX_WINDOW as i64 {
        return Err(invalid("bands", "window", "window must be at most 10000"));
    }
    Ok(())
}

fn validate_span(config: &dyn ConfigPort) -> Result<(), BandsightError> {
    let value = config.get_int("bands", "span", 30);
    if value < 1 {
        return Err(invalid("bands", "span", "span must be at least 1"));
    }
    Ok(())
}

fn validate_num_std(config: &dyn ConfigPort) -> Result<(), BandsightError> {
    let value = config.get_double("bands", "num_std", 2.0);
    if !value.is_finite() || value < 0.0 {
        return Err(invalid("bands", "num_std", "num_std must be non-negative"));
    }
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), BandsightError> {
    let days = config.get_int("query", "max_lookback_days", 365);
    if !(0..=i64::from(u32::MAX)).contains(&days) {
        return Err(invalid(
            "query",
            "max_lookback_days",
            "max_lookback_days must be non-negative",
        ));
    }
    let business_days = config.get_int("query", "default_business_days", 60);
    if !(0..=i64::from(u32::MAX)).contains(&business_days) {
        return Err(invalid(
            "query",
            "default_business_days",
            "default_business_days must be non-negative",
        ));
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), BandsightError> {
    let start = config.get_date("query", "start_date")?;
    let end = config.get_date("query", "end_date")?;
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(invalid(
                "query",
                "start_date",
                "start_date must not be after end_date",
            ));
        }
    }
    Ok(())
}
