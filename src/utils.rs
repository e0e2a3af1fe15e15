use crate::constants::{
    DEFAULT_CHART_BASE_URL, DEFAULT_EXCHANGE_TZ, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MENTIONS_PATH,
};
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::path::PathBuf;
use std::time::Duration;

/// Get mention log path from environment variable or use default
pub fn get_mentions_path() -> PathBuf {
    std::env::var("MENTIONS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MENTIONS_PATH))
}

/// Get chart API base URL from environment variable or use default
pub fn get_chart_base_url() -> String {
    std::env::var("CHART_API_BASE_URL")
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_CHART_BASE_URL.to_string())
}

/// Get chart fetch timeout from environment variable or use default
pub fn get_fetch_timeout() -> Duration {
    let secs = std::env::var("CHART_FETCH_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Get fallback exchange time zone from environment variable or use default
pub fn get_default_exchange_tz() -> Tz {
    std::env::var("DEFAULT_EXCHANGE_TZ")
        .ok()
        .and_then(|name| match name.trim().parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(e) => {
                tracing::warn!("Failed to parse DEFAULT_EXCHANGE_TZ '{}': {}", name, e);
                None
            }
        })
        .unwrap_or_else(default_exchange_tz)
}

/// Parse the fallback zone constant; used where no environment is consulted
pub fn default_exchange_tz() -> Tz {
    DEFAULT_EXCHANGE_TZ.parse().unwrap_or(chrono_tz::America::New_York)
}

/// Parse a mention timestamp into UTC
///
/// Accepts RFC 3339 (`2024-03-05T10:00:00Z`, with offset or fractional
/// seconds), naive `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` treated as
/// UTC, and a bare `YYYY-MM-DD` meaning midnight UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(Error::Parse("Empty timestamp".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(Error::Parse(format!("Unrecognized timestamp: '{}'", raw)))
}
