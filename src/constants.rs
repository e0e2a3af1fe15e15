//! Ranking and market-data constants
//!
//! Defaults shared by the gainers pipeline, the chart client and the CLI.

/// Default number of tickers considered by a gainers batch
pub const DEFAULT_LIMIT_TICKERS: usize = 50;

/// Default number of concurrent price resolutions
pub const DEFAULT_CONCURRENCY: usize = 3;

/// Upper bound for concurrent price resolutions
pub const MAX_CONCURRENCY: usize = 10;

/// Default chart endpoint; the symbol is appended to this path
pub const DEFAULT_CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Per-request timeout for chart fetches
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Exchange time zone used when chart metadata does not name one
pub const DEFAULT_EXCHANGE_TZ: &str = "America/New_York";

/// Default location of the mention log (JSON lines)
pub const DEFAULT_MENTIONS_PATH: &str = "data/mentions.jsonl";

/// Range bucket thresholds, in elapsed days
///
/// | Elapsed days | Range |
/// |--------------|-------|
/// | <= 30        | 1mo   |
/// | <= 62        | 3mo   |
/// | <= 370       | 1y    |
/// | > 370        | 5y    |
pub const RANGE_ONE_MONTH_MAX_DAYS: i64 = 30;
pub const RANGE_THREE_MONTHS_MAX_DAYS: i64 = 62;
pub const RANGE_ONE_YEAR_MAX_DAYS: i64 = 370;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
