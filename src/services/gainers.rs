//! Gainers ranking
//!
//! Resolves basis/latest prices for a batch of tickers with bounded
//! concurrency and ranks the survivors by percentage gain. A failing symbol
//! only removes itself from the ranking.

use crate::error::{Error, Result};
use crate::models::{GainResult, GainerOptions, PriceBasis, TickerMonthAggregate};
use crate::services::price_cache::PriceSeriesCache;
use crate::services::resolver::resolve;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Ranking service over a shared price cache
#[derive(Clone)]
pub struct GainersService {
    cache: Arc<PriceSeriesCache>,
}

impl GainersService {
    pub fn new(cache: Arc<PriceSeriesCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<PriceSeriesCache> {
        &self.cache
    }

    /// Resolve every item, positionally
    ///
    /// Items beyond `limit_tickers` are not resolved. At most `concurrency`
    /// resolutions run at once; each outcome is independent of its siblings.
    pub async fn resolve_all(
        &self,
        items: &[TickerMonthAggregate],
        options: &GainerOptions,
    ) -> Vec<Result<PriceBasis>> {
        let options = options.clamped();
        let batch = &items[..items.len().min(options.limit_tickers)];
        if batch.is_empty() {
            return Vec::new();
        }

        let semaphore = Arc::new(Semaphore::new(options.concurrency));

        let tasks = batch.iter().map(|item| {
            let semaphore = semaphore.clone();
            let cache = &self.cache;
            let options = &options;
            async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .map_err(|e| Error::Other(format!("Worker pool closed: {}", e)))?;

                let result = resolve(
                    cache,
                    &item.symbol,
                    item.first_ts,
                    options.anchor,
                    options.mode,
                    options.month,
                )
                .await;

                if let Err(e) = &result {
                    warn!(symbol = %item.symbol, error = %e, "Price resolution failed");
                }
                result
            }
        });

        join_all(tasks).await
    }

    /// Ranked gainers for the given tickers
    ///
    /// Input order decides which tickers survive truncation (callers usually
    /// pass tickers sorted by mention count). Failed symbols are omitted.
    pub async fn compute_gainers(
        &self,
        items: &[TickerMonthAggregate],
        options: &GainerOptions,
    ) -> Vec<GainResult> {
        let options = options.clamped();
        let start = Instant::now();

        info!(
            month = %options.month,
            anchor = %options.anchor,
            mode = %options.mode,
            items = items.len(),
            limit = options.limit_tickers,
            concurrency = options.concurrency,
            "Computing gainers"
        );

        let outcomes = self.resolve_all(items, &options).await;
        let attempted = outcomes.len();

        let resolved: Vec<GainResult> = items
            .iter()
            .zip(outcomes)
            .filter_map(|(item, outcome)| outcome.ok().map(|prices| GainResult::new(item.clone(), prices)))
            .collect();

        let failed = attempted - resolved.len();
        info!(
            resolved = resolved.len(),
            failed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Gainers computed"
        );

        rank_gainers(resolved)
    }
}

/// Sort by `pct` descending
///
/// Equal percentages keep no guaranteed relative order.
pub fn rank_gainers(mut results: Vec<GainResult>) -> Vec<GainResult> {
    results.sort_by(|a, b| b.pct.partial_cmp(&a.pct).unwrap_or(std::cmp::Ordering::Equal));
    debug!(count = results.len(), "Ranked gainers");
    results
}

/// Gainers first mentioned by `user_id`, in ranking order
pub fn user_gainers(results: &[GainResult], user_id: &str) -> Vec<GainResult> {
    results
        .iter()
        .filter(|r| r.info.first_user_id == user_id)
        .cloned()
        .collect()
}

/// Mean percentage gain; `None` for an empty ranking
pub fn average_gain(results: &[GainResult]) -> Option<f64> {
    if results.is_empty() {
        return None;
    }
    Some(results.iter().map(|r| r.pct).sum::<f64>() / results.len() as f64)
}
