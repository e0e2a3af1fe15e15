use crate::models::MonthKey;
use crate::services::{aggregate_month, top_tickers, MentionStore};

pub fn run(store: &dyn MentionStore, month: Option<MonthKey>, limit: usize) {
    let entries = super::load_or_exit(store);
    let month = match super::select_month(&entries, month) {
        Ok(month) => month,
        Err(e) => {
            println!("⚠️  {}", e);
            return;
        }
    };

    let aggregation = aggregate_month(&entries, month);
    if aggregation.is_empty() {
        println!("⚠️  No mentions in {}.", month);
        return;
    }

    println!(
        "📈 Top tickers for {} ({} tickers, {} mentions)\n",
        month,
        aggregation.tickers.len(),
        aggregation.total_mentions()
    );
    println!("{:<4} {:<8} {:>6}  {:<20} {}", "#", "TICKER", "COUNT", "FIRST BY", "FIRST AT");

    for (rank, ticker) in top_tickers(&aggregation).iter().take(limit).enumerate() {
        let first_by = if ticker.first_user_name.is_empty() {
            "-"
        } else {
            ticker.first_user_name.as_str()
        };
        println!(
            "{:<4} {:<8} {:>6}  {:<20} {}",
            rank + 1,
            ticker.symbol,
            ticker.count_mtd,
            first_by,
            ticker.first_ts.format("%Y-%m-%d %H:%M UTC")
        );
    }
}
