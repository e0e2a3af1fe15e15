//! Basis and latest price selection
//!
//! | Anchor  | Fetch from            | Target date                                  |
//! |---------|-----------------------|----------------------------------------------|
//! | mention | mention timestamp     | exchange-local date of the mention           |
//! | month   | selected month start  | exchange-local date of the UTC month start   |
//!
//! The basis is read from the first trading day on/after the target date
//! (open for `oc`, close for `cc`), gap-filled forward. The latest price is
//! the last close (`cc`) or the live quote (`oc`), each falling back to the
//! other.

use crate::error::{Error, Result};
use crate::models::{Anchor, MonthKey, PriceBasis, PriceMode, PriceSeries};
use crate::services::month::{local_calendar_date, month_first_local_date};
use crate::services::price_cache::PriceSeriesCache;
use chrono::{DateTime, NaiveDate, Utc};

/// Index of the first trading day whose exchange-local date is on/after
/// `target`; falls back to the earliest day when the series ends before it
pub fn anchor_index(series: &PriceSeries, target: NaiveDate) -> usize {
    series
        .timestamps
        .iter()
        .position(|ts| local_calendar_date(*ts, series.tz) >= target)
        .unwrap_or(0)
}

/// Exchange-local date the basis is measured from
pub fn target_date(
    series: &PriceSeries,
    mention_ts: DateTime<Utc>,
    anchor: Anchor,
    month: MonthKey,
) -> NaiveDate {
    match anchor {
        Anchor::Month => month_first_local_date(series.tz, month.year(), month.month() as i32),
        Anchor::Mention => local_calendar_date(mention_ts, series.tz),
    }
}

/// Basis price at `index` for `mode`, gap-filled forward
pub fn basis_at(series: &PriceSeries, index: usize, mode: PriceMode) -> Option<f64> {
    series.first_finite_from(mode, index)
}

/// Latest price for `mode`
pub fn latest_price(series: &PriceSeries, mode: PriceMode) -> Option<f64> {
    let (primary, secondary) = match mode {
        PriceMode::Cc => (series.last_close, series.last_price),
        PriceMode::Oc => (series.last_price, series.last_close),
    };

    [primary, secondary].into_iter().flatten().find(|v| is_positive(*v))
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Select basis and latest from an already fetched series
pub fn select_prices(
    series: &PriceSeries,
    mention_ts: DateTime<Utc>,
    anchor: Anchor,
    mode: PriceMode,
    month: MonthKey,
) -> Result<PriceBasis> {
    let target = target_date(series, mention_ts, anchor, month);
    let index = anchor_index(series, target);

    let basis = basis_at(series, index, mode)
        .filter(|v| is_positive(*v))
        .ok_or_else(|| {
            Error::DataUnavailable(format!(
                "No usable {} basis for {} on/after {}",
                mode, series.symbol, target
            ))
        })?;

    let latest = latest_price(series, mode).ok_or_else(|| {
        Error::DataUnavailable(format!("No usable latest price for {}", series.symbol))
    })?;

    Ok(PriceBasis { basis, latest })
}

/// Fetch (through the cache) and resolve basis and latest for one symbol
pub async fn resolve(
    cache: &PriceSeriesCache,
    symbol: &str,
    mention_ts: DateTime<Utc>,
    anchor: Anchor,
    mode: PriceMode,
    month: MonthKey,
) -> Result<PriceBasis> {
    let from = match anchor {
        Anchor::Mention => mention_ts,
        Anchor::Month => month.start(),
    };

    let series = cache.fetch(symbol, from).await?;
    select_prices(&series, mention_ts, anchor, mode, month)
}
