//! Price data access port.

use crate::domain::error::BandsightError;
use crate::domain::price::PriceObservation;
use chrono::NaiveDate;

/// Source of daily adjusted closes for a ticker.
///
/// Implementations return observations with `start_date <= date <= end_date`,
/// ordered by date ascending with no duplicate dates. An unknown ticker or an
/// empty range yields an empty vector, not an error.
pub trait PriceDataPort {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceObservation>, BandsightError>;

    /// First date, last date and row count stored for `ticker`.
    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BandsightError>;
}
