use crate::models::MonthKey;
use crate::services::{aggregate_month, user_leaderboard, MentionStore};

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
    let board = user_leaderboard(&aggregation);
    if board.is_empty() {
        println!("⚠️  No attributed first mentions in {}.", month);
        return;
    }

    println!("🏆 First-mention leaderboard for {}\n", month);
    for (rank, user) in board.iter().take(limit).enumerate() {
        println!("{:<4} {:<24} {:>4}", rank + 1, user.name, user.count);
    }
}
