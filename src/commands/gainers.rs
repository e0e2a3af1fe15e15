use crate::cli::GainerArgs;
use crate::models::{GainResult, GainerOptions};
use crate::services::{
    aggregate_month, average_gain, tickers_first_mentioned_by, top_tickers, ChartClient, GainersService,
    MentionStore, PriceSeriesCache,
};
use std::sync::Arc;

pub async fn run(store: &dyn MentionStore, args: &GainerArgs, user: Option<&str>) {
    let entries = super::load_or_exit(store);
    let month = match super::select_month(&entries, args.month) {
        Ok(month) => month,
        Err(e) => {
            println!("⚠️  {}", e);
            return;
        }
    };

    let aggregation = aggregate_month(&entries, month);
    let mut tickers = top_tickers(&aggregation);
    if let Some(user_id) = user {
        tickers = tickers_first_mentioned_by(&tickers, user_id);
    }

    if tickers.is_empty() {
        match user {
            Some(user_id) => println!("⚠️  No first mentions by {} in {}.", user_id, month),
            None => println!("⚠️  No tickers to rank for {}.", month),
        }
        return;
    }

    let client = match ChartClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };
    let service = GainersService::new(Arc::new(PriceSeriesCache::new(Arc::new(client))));

    let options = GainerOptions::new(month, args.anchor, args.mode)
        .with_limits(args.limit, args.concurrency)
        .clamped();

    println!(
        "🔍 Pricing {} tickers for {} (anchor={}, mode={}, concurrency={})...",
        tickers.len().min(options.limit_tickers),
        month,
        options.anchor,
        options.mode,
        options.concurrency
    );

    let results = service.compute_gainers(&tickers, &options).await;

    if results.is_empty() {
        println!("⚠️  No prices could be resolved.");
        return;
    }

    print_results(&results, args.top);

    if let Some(avg) = average_gain(&results) {
        println!("\n📊 Average gain across {} tickers: {:+.2}%", results.len(), avg);
    }
}

fn print_results(results: &[GainResult], top: usize) {
    println!("\n{:<4} {:<8} {:>10} {:>10} {:>9}  {}", "#", "TICKER", "BASIS", "LATEST", "GAIN", "FIRST BY");
    for (rank, r) in results.iter().take(top).enumerate() {
        let first_by = if r.info.first_user_name.is_empty() {
            "-"
        } else {
            r.info.first_user_name.as_str()
        };
        println!(
            "{:<4} {:<8} {:>10.2} {:>10.2} {:>+8.2}%  {}",
            rank + 1,
            r.symbol(),
            r.basis,
            r.latest,
            r.pct,
            first_by
        );
    }
}
