//! Common test infrastructure
//!
//! Record builders and assertions shared by the integration suites.

#![allow(dead_code)]

use notification_buffer::{NotificationCategory, NotificationRecord, StatusTag};

/// 2023-11-14T00:00:00Z
pub const DAY_START: i64 = 1_699_920_000;

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub fn unread(id: &str, timestamp: i64) -> NotificationRecord {
    NotificationRecord::new(id, format!("Notification {}", id), timestamp)
        .with_subtitle("subtitle")
        .with_status_tag(StatusTag::new("info"))
        .with_category(NotificationCategory::Comment)
        .with_link(format!("/notifications/{}", id))
}

pub fn read(id: &str, timestamp: i64) -> NotificationRecord {
    unread(id, timestamp).read()
}

/// `count` unread records named `{prefix}{i}` with timestamps `start + i`.
pub fn unread_series(prefix: &str, start: i64, count: i64) -> Vec<NotificationRecord> {
    (0..count)
        .map(|i| unread(&format!("{}{}", prefix, i), start + i))
        .collect()
}

pub fn ids(records: &[NotificationRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

pub fn assert_newest_first(records: &[NotificationRecord]) {
    for pair in records.windows(2) {
        assert!(
            pair[0].timestamp >= pair[1].timestamp,
            "{} ({}) is listed before newer {} ({})",
            pair[0].id,
            pair[0].timestamp,
            pair[1].id,
            pair[1].timestamp
        );
    }
}
