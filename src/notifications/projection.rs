//! Date-grouped projection of a record set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::models::NotificationRecord;

/// Records sharing one group label, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationGroup {
    pub label: String,
    pub members: Vec<NotificationRecord>,
}

/// Bucket `records` by `label_fn(timestamp)`.
///
/// Groups appear in the order their label is first seen and members keep
/// their relative input order. Given a newest-first input, the newest day
/// comes first.
pub fn project<F>(records: &[NotificationRecord], mut label_fn: F) -> Vec<NotificationGroup>
where
    F: FnMut(i64) -> String,
{
    let mut groups: Vec<NotificationGroup> = Vec::new();
    let mut index_by_label: HashMap<String, usize> = HashMap::new();

    for record in records {
        let label = label_fn(record.timestamp);
        let index = match index_by_label.get(&label) {
            Some(&index) => index,
            None => {
                index_by_label.insert(label.clone(), groups.len());
                groups.push(NotificationGroup {
                    label,
                    members: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[index].members.push(record.clone());
    }

    groups
}

pub fn unread_count(records: &[NotificationRecord]) -> usize {
    records.iter().filter(|r| r.unread).count()
}
