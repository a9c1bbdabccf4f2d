//! Configuration access port.

use crate::domain::calendar::parse_date;
use crate::domain::error::BandsightError;
use chrono::NaiveDate;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;

    /// Optional date value; present but unparseable is a `ConfigInvalid`.
    fn get_date(&self, section: &str, key: &str) -> Result<Option<NaiveDate>, BandsightError> {
        match self.get_string(section, key) {
            None => Ok(None),
            Some(raw) => parse_date(&raw)
                .map(Some)
                .map_err(|e| BandsightError::ConfigInvalid {
                    section: section.to_string(),
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
        }
    }
}
