use super::{Anchor, MonthKey, PriceMode};
use crate::constants::{DEFAULT_CONCURRENCY, DEFAULT_LIMIT_TICKERS, MAX_CONCURRENCY};

/// Configuration for a gainers batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GainerOptions {
    /// Maximum number of tickers to resolve (0 means default: 50)
    pub limit_tickers: usize,

    /// Maximum concurrent resolutions (0 means default: 3, capped at 10)
    pub concurrency: usize,

    pub anchor: Anchor,
    pub mode: PriceMode,

    /// Reporting month
    pub month: MonthKey,
}

impl Default for GainerOptions {
    fn default() -> Self {
        Self {
            limit_tickers: DEFAULT_LIMIT_TICKERS,
            concurrency: DEFAULT_CONCURRENCY,
            anchor: Anchor::default(),
            mode: PriceMode::default(),
            month: MonthKey::current(),
        }
    }
}

impl GainerOptions {
    pub fn new(month: MonthKey, anchor: Anchor, mode: PriceMode) -> Self {
        Self {
            month,
            anchor,
            mode,
            ..Self::default()
        }
    }

    pub fn with_limits(mut self, limit_tickers: usize, concurrency: usize) -> Self {
        self.limit_tickers = limit_tickers;
        self.concurrency = concurrency;
        self
    }

    /// Options with limits normalized to their usable ranges
    pub fn clamped(&self) -> Self {
        let limit_tickers = if self.limit_tickers == 0 {
            DEFAULT_LIMIT_TICKERS
        } else {
            self.limit_tickers
        };

        let concurrency = if self.concurrency == 0 {
            DEFAULT_CONCURRENCY
        } else {
            self.concurrency.min(MAX_CONCURRENCY)
        };

        Self {
            limit_tickers,
            concurrency,
            ..self.clone()
        }
    }
}
