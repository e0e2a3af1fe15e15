pub mod aggregator;
pub mod chart_client;
pub mod clock;
pub mod gainers;
pub mod mention_store;
pub mod month;
pub mod price_cache;
pub mod resolver;

pub use aggregator::{aggregate_month, available_months, tickers_first_mentioned_by, top_tickers, user_leaderboard};
pub use chart_client::{parse_chart_response, ChartClient, PriceDataProvider};
pub use clock::{Clock, FixedClock, SystemClock};
pub use gainers::{average_gain, rank_gainers, user_gainers, GainersService};
pub use mention_store::{InMemoryMentionStore, JsonlMentionStore, MentionStore};
pub use month::{is_in_month, local_calendar_date, month_first_local_date, month_start};
pub use price_cache::{EvictionPolicy, MaxEntries, NeverEvict, PriceSeriesCache};
pub use resolver::resolve;
