pub mod gainers;
pub mod months;
pub mod top;
pub mod users;

use crate::error::{Error, Result};
use crate::models::{MentionRecord, MonthKey};
use crate::services::{available_months, JsonlMentionStore, MentionStore};
use crate::utils::get_mentions_path;
use std::path::PathBuf;

/// Mention store at `path`, or the configured default
pub fn open_store(path: Option<PathBuf>) -> JsonlMentionStore {
    JsonlMentionStore::new(path.unwrap_or_else(get_mentions_path))
}

/// Load entries, exiting the process when the store cannot be read
pub(crate) fn load_or_exit(store: &dyn MentionStore) -> Vec<MentionRecord> {
    match store.load_entries() {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Requested month, or the newest month present in the log
pub(crate) fn select_month(entries: &[MentionRecord], requested: Option<MonthKey>) -> Result<MonthKey> {
    match requested {
        Some(month) => Ok(month),
        None => available_months(entries)
            .first()
            .copied()
            .ok_or_else(|| Error::NotFound("No mentions recorded yet".to_string())),
    }
}
