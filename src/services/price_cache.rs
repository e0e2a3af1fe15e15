//! Price series cache
//!
//! Memoizes chart fetches per `(symbol, range)`. Entries are never refreshed
//! by age; what leaves the cache is decided by the [`EvictionPolicy`], which
//! defaults to keeping everything for the cache's lifetime.
//!
//! The lock guards the map only and is never held across a fetch. Two
//! concurrent misses on the same key both go upstream and the later insert
//! wins; both results are interchangeable.

use crate::error::Result;
use crate::models::{ChartRange, PriceSeries};
use crate::services::chart_client::PriceDataProvider;
use crate::services::clock::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// A cached series and when it was stored
#[derive(Debug, Clone)]
pub struct CachedSeries {
    pub series: Arc<PriceSeries>,
    pub fetched_at: DateTime<Utc>,
}

/// Decides which entries to drop before a new one is inserted
pub trait EvictionPolicy: Send + Sync {
    /// Keys to remove to make room for `incoming`
    fn victims(&self, entries: &HashMap<String, CachedSeries>, incoming: &str) -> Vec<String>;
}

/// Keep everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverEvict;

impl EvictionPolicy for NeverEvict {
    fn victims(&self, _entries: &HashMap<String, CachedSeries>, _incoming: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Bound the number of entries, dropping the oldest fetches first
#[derive(Debug, Clone, Copy)]
pub struct MaxEntries(pub usize);

impl EvictionPolicy for MaxEntries {
    fn victims(&self, entries: &HashMap<String, CachedSeries>, incoming: &str) -> Vec<String> {
        let capacity = self.0.max(1);
        let after_insert = if entries.contains_key(incoming) {
            entries.len()
        } else {
            entries.len() + 1
        };
        if after_insert <= capacity {
            return Vec::new();
        }

        let mut by_age: Vec<(&String, DateTime<Utc>)> = entries
            .iter()
            .filter(|(key, _)| key.as_str() != incoming)
            .map(|(key, cached)| (key, cached.fetched_at))
            .collect();
        by_age.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

        by_age
            .into_iter()
            .take(after_insert - capacity)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

/// Cache key for a symbol and range
pub fn cache_key(symbol: &str, range: ChartRange) -> String {
    format!("{}|{}", symbol, range.to_api_format())
}

/// Shared, append-only price series cache
pub struct PriceSeriesCache {
    provider: Arc<dyn PriceDataProvider>,
    clock: Arc<dyn Clock>,
    policy: Box<dyn EvictionPolicy>,
    entries: RwLock<HashMap<String, CachedSeries>>,
}

impl PriceSeriesCache {
    /// Cache over `provider` using the system clock and no eviction
    pub fn new(provider: Arc<dyn PriceDataProvider>) -> Self {
        Self::with_options(provider, Arc::new(SystemClock), Box::new(NeverEvict))
    }

    pub fn with_options(
        provider: Arc<dyn PriceDataProvider>,
        clock: Arc<dyn Clock>,
        policy: Box<dyn EvictionPolicy>,
    ) -> Self {
        Self {
            provider,
            clock,
            policy,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Range needed to cover history back to `from`
    pub fn range_for(&self, from: DateTime<Utc>) -> ChartRange {
        let elapsed_days = (self.clock.now() - from).num_days().max(1);
        ChartRange::for_elapsed_days(elapsed_days)
    }

    /// Series for `symbol` covering at least `from` through now
    ///
    /// Failures are returned to the caller and not cached.
    pub async fn fetch(&self, symbol: &str, from: DateTime<Utc>) -> Result<Arc<PriceSeries>> {
        let range = self.range_for(from);
        let key = cache_key(symbol, range);

        if let Some(cached) = self.entries.read().await.get(&key) {
            debug!(key = %key, "Price cache hit");
            return Ok(cached.series.clone());
        }

        debug!(key = %key, "Price cache miss");
        let series = Arc::new(self.provider.fetch_chart(symbol, range).await?);

        let mut entries = self.entries.write().await;
        let victims = self.policy.victims(&entries, &key);
        if !victims.is_empty() {
            info!(evicted = victims.len(), "Evicting cached price series");
        }
        for victim in victims {
            entries.remove(&victim);
        }
        entries.insert(
            key,
            CachedSeries {
                series: series.clone(),
                fetched_at: self.clock.now(),
            },
        );

        Ok(series)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn contains(&self, symbol: &str, range: ChartRange) -> bool {
        self.entries.read().await.contains_key(&cache_key(symbol, range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::services::clock::FixedClock;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Provider that records each request and fails for "BAD"
    struct CountingProvider {
        calls: AtomicUsize,
        ranges: Mutex<Vec<ChartRange>>,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                ranges: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PriceDataProvider for CountingProvider {
        async fn fetch_chart(&self, symbol: &str, range: ChartRange) -> Result<PriceSeries> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.ranges.lock().unwrap().push(range);
            if symbol == "BAD" {
                return Err(Error::Network("connection refused".to_string()));
            }
            Ok(PriceSeries::new(
                symbol,
                vec![Utc.with_ymd_and_hms(2024, 3, 4, 14, 30, 0).unwrap()],
                vec![Some(10.0)],
                vec![Some(11.0)],
                None,
                chrono_tz::America::New_York,
            ))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn cache_with(provider: Arc<CountingProvider>, policy: Box<dyn EvictionPolicy>) -> PriceSeriesCache {
        PriceSeriesCache::with_options(provider, Arc::new(FixedClock(now())), policy)
    }

    #[tokio::test]
    async fn test_range_selection() {
        let cache = cache_with(Arc::new(CountingProvider::new()), Box::new(NeverEvict));
        assert_eq!(cache.range_for(now()), ChartRange::OneMonth);
        assert_eq!(cache.range_for(now() + Duration::days(3)), ChartRange::OneMonth);
        assert_eq!(cache.range_for(now() - Duration::days(30)), ChartRange::OneMonth);
        assert_eq!(cache.range_for(now() - Duration::days(45)), ChartRange::ThreeMonths);
        assert_eq!(cache.range_for(now() - Duration::days(200)), ChartRange::OneYear);
        assert_eq!(cache.range_for(now() - Duration::days(800)), ChartRange::FiveYears);
    }

    #[tokio::test]
    async fn test_hit_does_not_refetch() {
        let provider = Arc::new(CountingProvider::new());
        let cache = cache_with(provider.clone(), Box::new(NeverEvict));

        let from = now() - Duration::days(10);
        let first = cache.fetch("XYZ", from).await.unwrap();
        let second = cache.fetch("XYZ", from - Duration::days(5)).await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.contains("XYZ", ChartRange::OneMonth).await);
    }

    #[tokio::test]
    async fn test_different_ranges_are_separate_keys() {
        let provider = Arc::new(CountingProvider::new());
        let cache = cache_with(provider.clone(), Box::new(NeverEvict));

        cache.fetch("XYZ", now() - Duration::days(10)).await.unwrap();
        cache.fetch("XYZ", now() - Duration::days(100)).await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            *provider.ranges.lock().unwrap(),
            vec![ChartRange::OneMonth, ChartRange::OneYear]
        );
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let provider = Arc::new(CountingProvider::new());
        let cache = cache_with(provider.clone(), Box::new(NeverEvict));

        assert!(cache.fetch("BAD", now()).await.is_err());
        assert!(cache.fetch("BAD", now()).await.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_max_entries_evicts_oldest() {
        let provider = Arc::new(CountingProvider::new());
        let cache = cache_with(provider.clone(), Box::new(MaxEntries(2)));

        for symbol in ["AAA", "BBB", "CCC"] {
            cache.fetch(symbol, now()).await.unwrap();
        }

        assert_eq!(cache.len().await, 2);
        assert!(cache.contains("CCC", ChartRange::OneMonth).await);
    }

    #[test]
    fn test_max_entries_victims_by_age() {
        let series = Arc::new(PriceSeries::new("X", vec![], vec![], vec![], None, chrono_tz::UTC));
        let mut entries = HashMap::new();
        for (key, hours) in [("A|1mo", 3), ("B|1mo", 1), ("C|1mo", 2)] {
            entries.insert(
                key.to_string(),
                CachedSeries {
                    series: series.clone(),
                    fetched_at: now() - Duration::hours(hours),
                },
            );
        }

        assert_eq!(MaxEntries(3).victims(&entries, "D|1mo"), vec!["A|1mo".to_string()]);
        assert_eq!(
            MaxEntries(2).victims(&entries, "D|1mo"),
            vec!["A|1mo".to_string(), "C|1mo".to_string()]
        );
        assert!(MaxEntries(3).victims(&entries, "B|1mo").is_empty());
        assert!(NeverEvict.victims(&entries, "D|1mo").is_empty());
    }
}
