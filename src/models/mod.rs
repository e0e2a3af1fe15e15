mod aggregate;
mod gain;
mod gainer_options;
mod mention;
mod month_key;
mod policy;
mod price_series;

pub use aggregate::{MonthAggregation, TickerMonthAggregate, UserFirstMentionCount};
pub use gain::{GainResult, PriceBasis};
pub use gainer_options::GainerOptions;
pub use mention::{MentionRecord, MentionUser};
pub use month_key::MonthKey;
pub use policy::{Anchor, PriceMode};
pub use price_series::{ChartRange, PriceSeries};
