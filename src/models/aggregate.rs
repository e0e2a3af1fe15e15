use super::MonthKey;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Per-ticker mention summary for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerMonthAggregate {
    /// Uppercased ticker symbol
    pub symbol: String,

    /// Number of qualifying mentions in the month (always >= 1)
    pub count_mtd: u32,

    /// Earliest qualifying mention
    pub first_ts: DateTime<Utc>,
    pub first_link: String,
    pub first_user_id: String,
    pub first_user_name: String,

    /// Latest qualifying mention
    pub last_ts: DateTime<Utc>,
    pub last_link: String,
}

/// Number of tickers a user mentioned first in a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFirstMentionCount {
    pub user_id: String,
    pub name: String,
    pub count: u32,
}

/// Result of aggregating one month of mentions
#[derive(Debug, Clone, Serialize)]
pub struct MonthAggregation {
    pub month: MonthKey,

    /// Symbol -> aggregate
    pub tickers: HashMap<String, TickerMonthAggregate>,

    /// User id -> first-mention count
    pub users: HashMap<String, UserFirstMentionCount>,
}

impl MonthAggregation {
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn total_mentions(&self) -> u64 {
        self.tickers.values().map(|t| t.count_mtd as u64).sum()
    }
}
