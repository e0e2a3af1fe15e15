use super::TickerMonthAggregate;
use serde::Serialize;

/// Resolved basis and latest price for one symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBasis {
    pub basis: f64,
    pub latest: f64,
}

impl PriceBasis {
    /// Percentage change from basis to latest; unclamped
    pub fn pct(&self) -> f64 {
        (self.latest - self.basis) / self.basis * 100.0
    }
}

/// A ticker that resolved successfully, with its gain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GainResult {
    #[serde(flatten)]
    pub info: TickerMonthAggregate,
    pub basis: f64,
    pub latest: f64,
    pub pct: f64,
}

impl GainResult {
    pub fn new(info: TickerMonthAggregate, prices: PriceBasis) -> Self {
        Self {
            info,
            basis: prices.basis,
            latest: prices.latest,
            pct: prices.pct(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.info.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct() {
        let up = PriceBasis { basis: 10.0, latest: 12.5 };
        assert!((up.pct() - 25.0).abs() < 1e-9);

        let down = PriceBasis { basis: 20.0, latest: 5.0 };
        assert!((down.pct() + 75.0).abs() < 1e-9);

        let moon = PriceBasis { basis: 0.01, latest: 10.0 };
        assert!(moon.pct() > 99_000.0);
    }
}
