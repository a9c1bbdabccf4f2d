//! Plain-text rendering of band queries.

use chrono::NaiveDate;

use crate::domain::asof::{BandPosition, BandSnapshot};
use crate::domain::error::BandsightError;
use crate::domain::store::BandStore;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default)]
pub struct TextReport;

/// "January 03, 2020"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

impl ReportPort for TextReport {
    fn render_snapshot(&self, ticker: &str, snapshot: &BandSnapshot) -> String {
        let when = long_date(snapshot.requested);
        let price = snapshot.price;
        match snapshot.position {
            BandPosition::Above => format!(
                "On {when}, {ticker} was trading above its upper Bollinger volatility margin \
                 at a price of {price}. This is much higher than normal - consider closing \
                 your position or be cautious when investing at this time."
            ),
            BandPosition::Below => format!(
                "On {when}, {ticker} was trading below its lower Bollinger volatility margin \
                 at a price of {price}. Consider whether the market is overreacting to an \
                 event - this stock may be currently undervalued."
            ),
            BandPosition::Stable => format!(
                "On {when}, {ticker} was trading stably within its Bollinger volatility \
                 margins at a price of {price}."
            ),
        }
    }

    fn render_summary(
        &self,
        store: &BandStore,
        today: NaiveDate,
    ) -> Result<String, BandsightError> {
        let last_close = store.last_close_price(today)?;
        let latest = store.row_as_of(today)?;

        let mut out = format!(
            "Ticker:        {}\n\
             Range:         {} to {} ({} trading days)\n\
             Parameters:    {}\n\
             Last close:    {:.2} on {}\n\
             Max close:     {:.2} on {}\n\
             EWMA:          {:.2}\n",
            store.ticker(),
            store.first_date(),
            store.last_date(),
            store.trading_days(),
            store.params(),
            last_close,
            latest.date,
            store.max_value(),
            store.date_of_max_value(),
            latest.ewma,
        );
        match latest.bands {
            Some(bands) => {
                out.push_str(&format!("Upper band:    {:.2}\n", bands.upper));
                out.push_str(&format!("Lower band:    {:.2}\n", bands.lower));
                out.push_str(&format!("Position:      {}\n", store.classify(today)?));
            }
            None => out.push_str(&format!(
                "Bands:         undefined (need {} trading days, have {})\n",
                store.params().window,
                store.trading_days()
            )),
        }
        Ok(out)
    }
}
