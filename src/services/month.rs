//! Month partitioning
//!
//! Mentions are grouped by UTC month. Price series are indexed by exchange
//! trading day, so month boundaries for basis lookup are translated into the
//! exchange's local calendar.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// 00:00:00 UTC on day 1 of the month
///
/// `month` is 1-based; out-of-range values roll over (`13` is January of the
/// next year, `0` is December of the previous one).
pub fn month_start(year: i32, month: i32) -> DateTime<Utc> {
    let zero_based = month - 1;
    let year = year + zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;

    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Whether `ts` falls in the same UTC year and month as `month_start`
pub fn is_in_month(ts: DateTime<Utc>, month_start: DateTime<Utc>) -> bool {
    ts.year() == month_start.year() && ts.month() == month_start.month()
}

/// Local calendar date of the UTC month start, observed in `tz`
///
/// Zones west of UTC observe the instant on the last day of the previous
/// month.
pub fn month_first_local_date(tz: Tz, year: i32, month: i32) -> NaiveDate {
    local_calendar_date(month_start(year, month), tz)
}

/// Calendar date of `ts` observed in `tz`
pub fn local_calendar_date(ts: DateTime<Utc>, tz: Tz) -> NaiveDate {
    ts.with_timezone(&tz).date_naive()
}
