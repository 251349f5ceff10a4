//! End-to-end tests for the notification buffer
//!
//! Covers eviction order, read-state transitions and the display order
//! invariant through the public API.

mod common;

use common::{assert_newest_first, ids, read, unread, unread_series};
use notification_buffer::{BufferError, NotificationBuffer, DEFAULT_CAPACITY};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_default_capacity_is_one_hundred() {
    assert_eq!(DEFAULT_CAPACITY, 100);
    assert_eq!(NotificationBuffer::default().capacity(), 100);
}

#[test]
fn test_zero_capacity_is_a_configuration_error() {
    let result = NotificationBuffer::with_records(vec![unread("a", 1)], 0);
    assert_eq!(result.unwrap_err(), BufferError::InvalidCapacity(0));
}

// ============================================================================
// Eviction
// ============================================================================

#[test]
fn test_oversized_unread_batch_keeps_newest_hundred() {
    let mut buffer = NotificationBuffer::new(100).unwrap();
    let outcome = buffer.insert_batch(unread_series("n", 1_000, 110));

    assert_eq!(buffer.len(), 100);
    assert_eq!(ids(&outcome.evicted), ids(&unread_series("n", 1_000, 10)));
    assert_eq!(buffer.records().last().unwrap().id, "n10");
    assert_newest_first(buffer.records());
}

#[test]
fn test_eight_read_two_unread_plus_three_new() {
    let mut initial: Vec<_> = (1..=8).map(|i| read(&format!("r{}", i), i)).collect();
    initial.extend([unread("u1", 9), unread("u2", 10)]);
    let mut buffer = NotificationBuffer::with_records(initial, 10).unwrap();

    let outcome =
        buffer.insert_batch(vec![unread("n1", 11), unread("n2", 12), unread("n3", 13)]);

    assert_eq!(ids(&outcome.evicted), vec!["r1", "r2", "r3"]);
    assert_eq!(buffer.len(), 10);
    assert_eq!(buffer.records().iter().filter(|r| !r.unread).count(), 5);
    for id in ["u1", "u2", "n1", "n2", "n3"] {
        assert!(buffer.get(id).is_some(), "{} should survive", id);
    }
}

#[test]
fn test_two_read_eight_unread_plus_three_new() {
    let mut initial = vec![read("r1", 1), read("r2", 2)];
    initial.extend((3..=10).map(|i| unread(&format!("u{}", i), i)));
    let mut buffer = NotificationBuffer::with_records(initial, 10).unwrap();

    let outcome =
        buffer.insert_batch(vec![unread("n1", 11), unread("n2", 12), unread("n3", 13)]);

    assert_eq!(ids(&outcome.evicted), vec!["r1", "r2", "u3"]);
    assert_eq!(buffer.len(), 10);
    assert_eq!(buffer.unread_count(), 10);
    assert_newest_first(buffer.records());
}

#[test]
fn test_full_buffer_without_read_records_evicts_oldest_unread() {
    let mut buffer = NotificationBuffer::with_records(unread_series("u", 100, 5), 5).unwrap();
    let outcome = buffer.insert_batch(vec![unread("late", 50)]);

    // the incoming record is itself the oldest unread one
    assert_eq!(ids(&outcome.evicted), vec!["late"]);
    assert_eq!(ids(buffer.records()), vec!["u4", "u3", "u2", "u1", "u0"]);
}

#[test]
fn test_equal_timestamps_tie_break_by_arrival() {
    let mut buffer = NotificationBuffer::with_records(vec![unread("fresh", 500)], 2).unwrap();
    let outcome = buffer.insert_batch(vec![unread("twin-a", 100), unread("twin-b", 100)]);

    assert_eq!(ids(&outcome.evicted), vec!["twin-a"]);
    assert_eq!(ids(buffer.records()), vec!["fresh", "twin-b"]);
}

#[test]
fn test_mark_all_read_then_insert_evicts_read_history() {
    let mut buffer = NotificationBuffer::with_records(unread_series("old", 0, 4), 4).unwrap();
    buffer.mark_all_read();
    buffer.insert_batch(unread_series("new", 1_000, 2));

    assert_eq!(ids(buffer.records()), vec!["new1", "new0", "old3", "old2"]);
    assert_eq!(buffer.unread_count(), 2);
}

#[test]
fn test_capacity_and_order_hold_across_mixed_operations() {
    let mut buffer = NotificationBuffer::new(12).unwrap();
    for round in 0..30i64 {
        let batch: Vec<_> = (0..(round % 4) + 1)
            .map(|i| {
                let id = format!("n{}-{}", round, i);
                let timestamp = (round * 7919 + i * 104_729) % 1_000;
                if (round + i) % 3 == 0 {
                    read(&id, timestamp)
                } else {
                    unread(&id, timestamp)
                }
            })
            .collect();
        buffer.insert_batch(batch);
        if round % 5 == 0 {
            let first = buffer.records()[0].id.clone();
            buffer.mark_read(&first);
        }

        assert!(buffer.len() <= buffer.capacity());
        assert_newest_first(buffer.records());
    }
}

// ============================================================================
// Read state
// ============================================================================

#[test]
fn test_mark_read_twice_matches_once() {
    let mut once =
        NotificationBuffer::with_records(vec![unread("x", 1), unread("y", 2)], 5).unwrap();
    let mut twice = once.clone();

    once.mark_read("x");
    twice.mark_read("x");
    twice.mark_read("x");

    assert_eq!(once.records(), twice.records());
}

#[test]
fn test_mark_read_on_read_record_changes_nothing() {
    let mut buffer = NotificationBuffer::with_records(vec![read("x", 1)], 5).unwrap();
    let before = buffer.records().to_vec();

    assert!(!buffer.mark_read("x"));
    assert_eq!(buffer.records(), before.as_slice());
    assert_eq!(buffer.revision(), 0);
}

#[test]
fn test_mark_all_read_twice_returns_no_unread() {
    let mut buffer = NotificationBuffer::with_records(unread_series("n", 0, 3), 5).unwrap();

    let first = buffer.mark_all_read().to_vec();
    let second = buffer.mark_all_read().to_vec();

    assert_eq!(first, second);
    assert!(second.iter().all(|r| !r.unread));
    assert_eq!(buffer.unread_count(), 0);
}

#[test]
fn test_fields_pass_through_untouched() {
    let original = unread("keep", 42);
    let mut buffer = NotificationBuffer::with_records(vec![original.clone()], 5).unwrap();
    buffer.mark_read("keep");

    let stored = buffer.get("keep").unwrap();
    assert_eq!(stored.title, original.title);
    assert_eq!(stored.subtitle, original.subtitle);
    assert_eq!(stored.status_tag, original.status_tag);
    assert_eq!(stored.category, original.category);
    assert_eq!(stored.link, original.link);
    assert_eq!(stored.timestamp, original.timestamp);
    assert!(!stored.unread);
}

#[test]
fn test_duplicate_ids_are_kept() {
    let mut buffer = NotificationBuffer::with_records(vec![unread("dup", 1)], 5).unwrap();
    buffer.insert_batch(vec![unread("dup", 2)]);

    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.unread_count(), 2);
}
