//! Presentation port.

use chrono::NaiveDate;

use crate::domain::asof::BandSnapshot;
use crate::domain::error::BandsightError;
use crate::domain::store::BandStore;

/// Port for turning query results into human-readable output.
pub trait ReportPort {
    /// One verdict for a single as-of query.
    fn render_snapshot(&self, ticker: &str, snapshot: &BandSnapshot) -> String;

    /// Overview of the whole store as seen on `today`.
    fn render_summary(&self, store: &BandStore, today: NaiveDate)
    -> Result<String, BandsightError>;
}
