//! Chart API client
//!
//! Fetches daily open/close history for a symbol from a chart endpoint
//! (Yahoo v8 response shape):
//!
//! ```text
//! { "chart": { "result": [ {
//!     "timestamp": [epoch-seconds, ...],
//!     "indicators": {
//!         "quote": [ { "open": [...], "close": [...] } ],
//!         "adjclose": [ { "adjclose": [...] } ]
//!     },
//!     "meta": { "regularMarketPrice": 123.4, "exchangeTimezoneName": "America/New_York" }
//! } ] } }
//! ```
//!
//! A response without `result[0]`, or whose timestamp/open/close fields are
//! not arrays, is rejected. There is no retry.

use crate::constants::USER_AGENT;
use crate::error::{Error, Result};
use crate::models::{ChartRange, PriceSeries};
use crate::utils::{get_chart_base_url, get_default_exchange_tz, get_fetch_timeout};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of daily price history
#[async_trait]
pub trait PriceDataProvider: Send + Sync {
    async fn fetch_chart(&self, symbol: &str, range: ChartRange) -> Result<PriceSeries>;
}

/// HTTP chart client
pub struct ChartClient {
    base_url: String,
    fallback_tz: Tz,
    client: reqwest::Client,
}

impl ChartClient {
    /// Create a client from environment configuration
    pub fn from_env() -> Result<Self> {
        Self::new(get_chart_base_url(), get_fetch_timeout(), get_default_exchange_tz())
    }

    /// Create a new chart client
    ///
    /// # Arguments
    /// * `base_url` - Chart endpoint; the symbol is appended as a path segment
    /// * `timeout` - Per-request timeout
    /// * `fallback_tz` - Exchange zone used when the response does not name one
    pub fn new(base_url: String, timeout: Duration, fallback_tz: Tz) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "Invalid chart base_url: must start with http:// or https://, got: '{}'",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        debug!(base_url = %base_url, timeout_s = timeout.as_secs(), "Created ChartClient");

        Ok(Self {
            base_url,
            fallback_tz,
            client,
        })
    }

    fn chart_url(&self, symbol: &str, range: ChartRange) -> String {
        format!(
            "{}/{}?range={}&interval=1d",
            self.base_url,
            symbol,
            range.to_api_format()
        )
    }
}

#[async_trait]
impl PriceDataProvider for ChartClient {
    async fn fetch_chart(&self, symbol: &str, range: ChartRange) -> Result<PriceSeries> {
        let url = self.chart_url(symbol, range);
        debug!(symbol, range = %range, url = %url, "Fetching chart");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Chart request failed for {}: {}", symbol, e)))?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            // The status already tells us the request failed
            Err(_) if !status.is_success() => String::new(),
            Err(e) => {
                return Err(Error::Network(format!("Failed to read chart body for {}: {}", symbol, e)));
            }
        };

        parse_chart_body(symbol, status, &body, self.fallback_tz)
    }
}

/// Map an HTTP status and raw body to a price series
fn parse_chart_body(symbol: &str, status: StatusCode, body: &str, fallback_tz: Tz) -> Result<PriceSeries> {
    if !status.is_success() {
        return Err(Error::Network(format!(
            "Chart API returned {} for {}: {}",
            status,
            symbol,
            body.chars().take(200).collect::<String>()
        )));
    }

    let json: Value = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("Failed to parse chart JSON for {}: {}", symbol, e)))?;

    parse_chart_response(symbol, &json, fallback_tz)
}

/// Parse a chart response body into a price series
pub fn parse_chart_response(symbol: &str, json: &Value, fallback_tz: Tz) -> Result<PriceSeries> {
    let result = json
        .pointer("/chart/result/0")
        .filter(|v| !v.is_null())
        .ok_or_else(|| Error::DataUnavailable(format!("No chart result for {}", symbol)))?;

    let raw_timestamps = result["timestamp"]
        .as_array()
        .ok_or_else(|| Error::Parse(format!("Chart timestamps missing for {}", symbol)))?;

    let quote = &result["indicators"]["quote"][0];

    let opens = quote["open"]
        .as_array()
        .ok_or_else(|| Error::Parse(format!("Chart opens missing for {}", symbol)))?;

    let closes = match quote["close"].as_array() {
        Some(closes) => closes,
        None => result["indicators"]["adjclose"][0]["adjclose"]
            .as_array()
            .ok_or_else(|| Error::Parse(format!("Chart closes missing for {}", symbol)))?,
    };

    let mut timestamps = Vec::with_capacity(raw_timestamps.len());
    for value in raw_timestamps {
        let secs = value
            .as_i64()
            .ok_or_else(|| Error::Parse(format!("Invalid chart timestamp for {}: {}", symbol, value)))?;
        let ts = DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| Error::Parse(format!("Chart timestamp out of range for {}: {}", symbol, secs)))?;
        timestamps.push(ts);
    }

    let meta = &result["meta"];
    let live_price = meta["regularMarketPrice"].as_f64();
    let tz = match meta["exchangeTimezoneName"].as_str() {
        Some(name) => name.parse::<Tz>().unwrap_or_else(|e| {
            warn!(symbol, tz = name, error = %e, "Unknown exchange time zone, using fallback");
            fallback_tz
        }),
        None => fallback_tz,
    };

    Ok(PriceSeries::new(
        symbol,
        timestamps,
        opens.iter().map(Value::as_f64).collect(),
        closes.iter().map(Value::as_f64).collect(),
        live_price,
        tz,
    ))
}
