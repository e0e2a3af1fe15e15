use super::PriceMode;
use crate::constants::{RANGE_ONE_MONTH_MAX_DAYS, RANGE_ONE_YEAR_MAX_DAYS, RANGE_THREE_MONTHS_MAX_DAYS};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Preset history ranges served by the chart API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChartRange {
    OneMonth,
    ThreeMonths,
    OneYear,
    FiveYears,
}

impl ChartRange {
    /// Smallest preset covering `elapsed_days` of history
    pub fn for_elapsed_days(elapsed_days: i64) -> Self {
        let days = elapsed_days.max(1);
        if days <= RANGE_ONE_MONTH_MAX_DAYS {
            ChartRange::OneMonth
        } else if days <= RANGE_THREE_MONTHS_MAX_DAYS {
            ChartRange::ThreeMonths
        } else if days <= RANGE_ONE_YEAR_MAX_DAYS {
            ChartRange::OneYear
        } else {
            ChartRange::FiveYears
        }
    }

    /// Convert to chart API format ("1mo", "3mo", "1y", "5y")
    pub fn to_api_format(&self) -> &'static str {
        match self {
            ChartRange::OneMonth => "1mo",
            ChartRange::ThreeMonths => "3mo",
            ChartRange::OneYear => "1y",
            ChartRange::FiveYears => "5y",
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_api_format())
    }
}

/// Daily open/close history for one symbol
///
/// `opens` and `closes` run parallel to `timestamps`; holidays and gaps show
/// up as `None` (or a non-finite value) and are skipped by lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub symbol: String,

    /// One entry per trading day, ascending
    pub timestamps: Vec<DateTime<Utc>>,
    pub opens: Vec<Option<f64>>,
    pub closes: Vec<Option<f64>>,

    /// Last finite close in the series
    pub last_close: Option<f64>,

    /// Live quote when the provider reports one, else `last_close`
    pub last_price: Option<f64>,

    /// Exchange time zone
    #[serde(serialize_with = "serialize_tz")]
    pub tz: Tz,
}

fn serialize_tz<S>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(tz.name())
}

impl PriceSeries {
    /// Build a series, deriving `last_close` and `last_price`
    pub fn new(
        symbol: &str,
        timestamps: Vec<DateTime<Utc>>,
        opens: Vec<Option<f64>>,
        closes: Vec<Option<f64>>,
        live_price: Option<f64>,
        tz: Tz,
    ) -> Self {
        let last_close = closes.iter().rev().copied().flatten().find(|v| v.is_finite());
        let last_price = live_price.filter(|v| v.is_finite()).or(last_close);

        Self {
            symbol: symbol.to_string(),
            timestamps,
            opens,
            closes,
            last_close,
            last_price,
            tz,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Field values for the given mode (opens for `oc`, closes for `cc`)
    pub fn field(&self, mode: PriceMode) -> &[Option<f64>] {
        match mode {
            PriceMode::Oc => &self.opens,
            PriceMode::Cc => &self.closes,
        }
    }

    /// First finite value of the mode's field at or after `index`
    pub fn first_finite_from(&self, mode: PriceMode, index: usize) -> Option<f64> {
        self.field(mode)
            .iter()
            .skip(index)
            .copied()
            .flatten()
            .find(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_range_buckets() {
        assert_eq!(ChartRange::for_elapsed_days(0), ChartRange::OneMonth);
        assert_eq!(ChartRange::for_elapsed_days(1), ChartRange::OneMonth);
        assert_eq!(ChartRange::for_elapsed_days(30), ChartRange::OneMonth);
        assert_eq!(ChartRange::for_elapsed_days(31), ChartRange::ThreeMonths);
        assert_eq!(ChartRange::for_elapsed_days(62), ChartRange::ThreeMonths);
        assert_eq!(ChartRange::for_elapsed_days(63), ChartRange::OneYear);
        assert_eq!(ChartRange::for_elapsed_days(370), ChartRange::OneYear);
        assert_eq!(ChartRange::for_elapsed_days(371), ChartRange::FiveYears);
        assert_eq!(ChartRange::OneYear.to_api_format(), "1y");
    }

    #[test]
    fn test_last_close_skips_gaps() {
        let series = PriceSeries::new(
            "XYZ",
            vec![day(4), day(5), day(6)],
            vec![Some(10.0), Some(11.0), Some(12.0)],
            vec![Some(11.0), Some(13.0), None],
            None,
            chrono_tz::America::New_York,
        );
        assert_eq!(series.last_close, Some(13.0));
        assert_eq!(series.last_price, Some(13.0));

        let series = PriceSeries::new(
            "XYZ",
            vec![day(4), day(5)],
            vec![None, None],
            vec![Some(11.0), Some(f64::NAN)],
            Some(15.5),
            chrono_tz::America::New_York,
        );
        assert_eq!(series.last_close, Some(11.0));
        assert_eq!(series.last_price, Some(15.5));
    }

    #[test]
    fn test_first_finite_from_gap_fills() {
        let series = PriceSeries::new(
            "XYZ",
            vec![day(4), day(5), day(6)],
            vec![Some(10.0), None, Some(12.0)],
            vec![Some(11.0), Some(13.0), Some(14.0)],
            None,
            chrono_tz::America::New_York,
        );
        assert_eq!(series.first_finite_from(PriceMode::Oc, 1), Some(12.0));
        assert_eq!(series.first_finite_from(PriceMode::Cc, 1), Some(13.0));
        assert_eq!(series.first_finite_from(PriceMode::Oc, 3), None);
    }
}
