use crate::services::{available_months, MentionStore};

pub fn run(store: &dyn MentionStore) {
    let entries = super::load_or_exit(store);
    let months = available_months(&entries);

    if months.is_empty() {
        println!("⚠️  No mentions recorded yet.");
        return;
    }

    println!("📅 Months with mentions ({}):", months.len());
    for month in months {
        println!("   {}", month);
    }
}
