//! Mention aggregation
//!
//! Groups the raw mention log into per-ticker monthly summaries and derives
//! the first-mention leaderboard.

use crate::models::{MentionRecord, MonthAggregation, MonthKey, TickerMonthAggregate, UserFirstMentionCount};
use crate::services::month::is_in_month;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Aggregate mentions for one UTC month
///
/// Records with a missing or malformed timestamp, or an empty ticker, are
/// skipped. First/last use strict comparison, so on equal timestamps the
/// record encountered first is kept.
pub fn aggregate_month(entries: &[MentionRecord], month: MonthKey) -> MonthAggregation {
    let start = month.start();
    let mut tickers: HashMap<String, TickerMonthAggregate> = HashMap::new();
    let mut skipped = 0usize;

    for entry in entries {
        let Some(ts) = entry.parsed_timestamp() else {
            skipped += 1;
            continue;
        };
        if !is_in_month(ts, start) {
            continue;
        }
        let Some(symbol) = entry.normalized_ticker() else {
            skipped += 1;
            continue;
        };

        match tickers.get_mut(&symbol) {
            Some(agg) => {
                agg.count_mtd += 1;
                if ts < agg.first_ts {
                    agg.first_ts = ts;
                    agg.first_link = entry.link_or_empty().to_string();
                    agg.first_user_id = entry.user_id().to_string();
                    agg.first_user_name = entry.user_name().to_string();
                }
                if ts > agg.last_ts {
                    agg.last_ts = ts;
                    agg.last_link = entry.link_or_empty().to_string();
                }
            }
            None => {
                tickers.insert(
                    symbol.clone(),
                    TickerMonthAggregate {
                        symbol,
                        count_mtd: 1,
                        first_ts: ts,
                        first_link: entry.link_or_empty().to_string(),
                        first_user_id: entry.user_id().to_string(),
                        first_user_name: entry.user_name().to_string(),
                        last_ts: ts,
                        last_link: entry.link_or_empty().to_string(),
                    },
                );
            }
        }
    }

    if skipped > 0 {
        debug!(month = %month, skipped, "Skipped malformed mention records");
    }

    let users = first_mention_counts(tickers.values());

    MonthAggregation { month, tickers, users }
}

/// Count first mentions per user across aggregates
fn first_mention_counts<'a>(
    aggregates: impl Iterator<Item = &'a TickerMonthAggregate>,
) -> HashMap<String, UserFirstMentionCount> {
    let mut users: HashMap<String, UserFirstMentionCount> = HashMap::new();

    for agg in aggregates {
        if agg.first_user_id.is_empty() {
            continue;
        }
        users
            .entry(agg.first_user_id.clone())
            .and_modify(|u| u.count += 1)
            .or_insert_with(|| UserFirstMentionCount {
                user_id: agg.first_user_id.clone(),
                name: agg.first_user_name.clone(),
                count: 1,
            });
    }

    users
}

/// Distinct UTC months present in the log, newest first
pub fn available_months(entries: &[MentionRecord]) -> Vec<MonthKey> {
    let months: BTreeSet<MonthKey> = entries
        .iter()
        .filter(|e| e.normalized_ticker().is_some())
        .filter_map(|e| e.parsed_timestamp())
        .map(MonthKey::from_timestamp)
        .collect();

    months.into_iter().rev().collect()
}

/// Tickers ordered by mention count (desc), then symbol (asc)
pub fn top_tickers(aggregation: &MonthAggregation) -> Vec<TickerMonthAggregate> {
    let mut tickers: Vec<TickerMonthAggregate> = aggregation.tickers.values().cloned().collect();
    tickers.sort_by(|a, b| {
        b.count_mtd
            .cmp(&a.count_mtd)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    tickers
}

/// Tickers whose first mention this month belongs to `user_id`, keeping the
/// ranking order of `tickers`
pub fn tickers_first_mentioned_by(tickers: &[TickerMonthAggregate], user_id: &str) -> Vec<TickerMonthAggregate> {
    tickers
        .iter()
        .filter(|t| !t.first_user_id.is_empty() && t.first_user_id == user_id)
        .cloned()
        .collect()
}

/// Users ordered by first-mention count (desc), then name (asc)
pub fn user_leaderboard(aggregation: &MonthAggregation) -> Vec<UserFirstMentionCount> {
    let mut users: Vec<UserFirstMentionCount> = aggregation.users.values().cloned().collect();
    users.sort_by(|a, b| match b.count.cmp(&a.count) {
        Ordering::Equal => a.name.cmp(&b.name).then_with(|| a.user_id.cmp(&b.user_id)),
        other => other,
    });
    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn march() -> MonthKey {
        "2024-03".parse().unwrap()
    }

    #[test]
    fn test_end_to_end_first_user() {
        let entries = vec![
            MentionRecord::new("XYZ", "2024-03-05T10:00:00Z").with_user("u1", "Ann"),
            MentionRecord::new("xyz", "2024-03-20T09:00:00Z").with_user("u2", "Bo"),
        ];

        let agg = aggregate_month(&entries, march());
        let xyz = agg.tickers.get("XYZ").unwrap();
        assert_eq!(xyz.count_mtd, 2);
        assert_eq!(xyz.first_user_id, "u1");
        assert_eq!(xyz.first_user_name, "Ann");
        assert_eq!(xyz.last_ts, Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap());

        assert_eq!(agg.users.len(), 1);
        assert_eq!(agg.users.get("u1").unwrap().count, 1);
    }

    #[test]
    fn test_case_insensitive_collapse() {
        let entries = vec![
            MentionRecord::new("abc", "2024-03-01T00:00:00Z"),
            MentionRecord::new("ABC", "2024-03-02T00:00:00Z"),
            MentionRecord::new(" Abc ", "2024-03-03T00:00:00Z"),
        ];

        let agg = aggregate_month(&entries, march());
        assert_eq!(agg.tickers.len(), 1);
        assert_eq!(agg.tickers.get("ABC").unwrap().count_mtd, 3);
    }

    #[test]
    fn test_filters_other_months_and_malformed() {
        let entries = vec![
            MentionRecord::new("AAA", "2024-02-29T23:59:59Z"),
            MentionRecord::new("AAA", "2024-03-10T12:00:00Z"),
            MentionRecord::new("AAA", "2024-04-01T00:00:00Z"),
            MentionRecord::new("", "2024-03-10T12:00:00Z"),
            MentionRecord::new("BBB", "garbage"),
            MentionRecord::new("CCC", ""),
        ];

        let agg = aggregate_month(&entries, march());
        assert_eq!(agg.tickers.len(), 1);
        assert_eq!(agg.tickers.get("AAA").unwrap().count_mtd, 1);
        assert_eq!(agg.total_mentions(), 1);
    }

    #[test]
    fn test_month_grouping_is_utc() {
        // 2024-04-01T01:00+02:00 is still March in UTC
        let entries = vec![MentionRecord::new("TZ", "2024-04-01T01:00:00+02:00")];
        let agg = aggregate_month(&entries, march());
        assert!(agg.tickers.contains_key("TZ"));
    }

    #[test]
    fn test_first_and_last_out_of_order() {
        let entries = vec![
            MentionRecord::new("Q", "2024-03-15T00:00:00Z").with_user("u2", "Bo").with_link("mid"),
            MentionRecord::new("Q", "2024-03-25T00:00:00Z").with_user("u3", "Cy").with_link("late"),
            MentionRecord::new("Q", "2024-03-02T00:00:00Z").with_user("u1", "Ann").with_link("early"),
        ];

        let agg = aggregate_month(&entries, march());
        let q = agg.tickers.get("Q").unwrap();
        assert_eq!(q.count_mtd, 3);
        assert_eq!(q.first_link, "early");
        assert_eq!(q.first_user_id, "u1");
        assert_eq!(q.last_link, "late");
        assert!(q.first_ts <= q.last_ts);
    }

    #[test]
    fn test_ties_keep_first_encountered() {
        let entries = vec![
            MentionRecord::new("T", "2024-03-05T10:00:00Z").with_user("u1", "Ann").with_link("one"),
            MentionRecord::new("T", "2024-03-05T10:00:00Z").with_user("u2", "Bo").with_link("two"),
        ];

        let agg = aggregate_month(&entries, march());
        let t = agg.tickers.get("T").unwrap();
        assert_eq!(t.first_user_id, "u1");
        assert_eq!(t.first_link, "one");
        assert_eq!(t.last_link, "one");
    }

    #[test]
    fn test_user_counts_ignore_anonymous() {
        let entries = vec![
            MentionRecord::new("A", "2024-03-01T00:00:00Z").with_user("u1", "Ann"),
            MentionRecord::new("B", "2024-03-02T00:00:00Z").with_user("u1", "Ann"),
            MentionRecord::new("C", "2024-03-03T00:00:00Z").with_user("u2", "Bo"),
            MentionRecord::new("D", "2024-03-04T00:00:00Z"),
            MentionRecord::new("A", "2024-03-05T00:00:00Z").with_user("u2", "Bo"),
        ];

        let agg = aggregate_month(&entries, march());
        assert_eq!(agg.users.len(), 2);
        assert_eq!(agg.users.get("u1").unwrap().count, 2);
        assert_eq!(agg.users.get("u2").unwrap().count, 1);

        let board = user_leaderboard(&agg);
        assert_eq!(board[0].user_id, "u1");
        assert_eq!(board[1].user_id, "u2");
    }

    #[test]
    fn test_top_tickers_order() {
        let entries = vec![
            MentionRecord::new("ZZZ", "2024-03-01T00:00:00Z"),
            MentionRecord::new("ZZZ", "2024-03-02T00:00:00Z"),
            MentionRecord::new("BBB", "2024-03-01T00:00:00Z"),
            MentionRecord::new("AAA", "2024-03-03T00:00:00Z"),
        ];

        let agg = aggregate_month(&entries, march());
        let symbols: Vec<String> = top_tickers(&agg).into_iter().map(|t| t.symbol).collect();
        assert_eq!(symbols, vec!["ZZZ", "AAA", "BBB"]);
    }

    #[test]
    fn test_first_mentioned_by_reaches_below_the_fold() {
        let mut entries = Vec::new();
        for i in 0..51 {
            let symbol = format!("T{:02}", i);
            // Every ticker but the last gets two mentions, so the user's pick ranks last
            let mentions = if i == 50 { 1 } else { 2 };
            for _ in 0..mentions {
                let who = if i == 50 { "u1" } else { "u2" };
                entries.push(MentionRecord::new(&symbol, "2024-03-04T00:00:00Z").with_user(who, who));
            }
        }

        let agg = aggregate_month(&entries, march());
        let ranked = top_tickers(&agg);
        assert_eq!(ranked.last().unwrap().symbol, "T50");

        let mine = tickers_first_mentioned_by(&ranked, "u1");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].symbol, "T50");

        assert!(tickers_first_mentioned_by(&ranked, "").is_empty());
        assert!(tickers_first_mentioned_by(&ranked, "nobody").is_empty());
    }

    #[test]
    fn test_user_leaderboard_ties_by_name() {
        let entries = vec![
            MentionRecord::new("A", "2024-03-01T00:00:00Z").with_user("u9", "Zed"),
            MentionRecord::new("B", "2024-03-01T00:00:00Z").with_user("u8", "Amy"),
        ];

        let agg = aggregate_month(&entries, march());
        let names: Vec<String> = user_leaderboard(&agg).into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
    }

    #[test]
    fn test_available_months_descending_unique() {
        let entries = vec![
            MentionRecord::new("A", "2024-01-15T00:00:00Z"),
            MentionRecord::new("B", "2024-03-01T00:00:00Z"),
            MentionRecord::new("C", "2023-12-31T23:00:00Z"),
            MentionRecord::new("D", "2024-03-20T00:00:00Z"),
            MentionRecord::new("E", "bad"),
            MentionRecord::new("", "2022-05-01T00:00:00Z"),
        ];

        let months: Vec<String> = available_months(&entries).iter().map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2024-03", "2024-01", "2023-12"]);
    }

    #[test]
    fn test_empty_input() {
        let agg = aggregate_month(&[], march());
        assert!(agg.is_empty());
        assert!(agg.users.is_empty());
        assert!(available_months(&[]).is_empty());
    }
}
