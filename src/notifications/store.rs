//! Capped notification buffer.
//!
//! The buffer keeps at most `capacity` records, ordered newest first. When an
//! insert overflows the cap, read records are evicted before unread ones, and
//! inside each class the oldest go first.
//!
//! Records with equal timestamps are ordered by their position in the combined
//! sequence (records already stored, in stored order, followed by the inserted
//! batch in the order given). Eviction drops the earliest of tied records in
//! that order and the display order keeps it among survivors.

use std::cmp::Reverse;

use thiserror::Error;
use tracing::debug;

use super::models::NotificationRecord;
use super::projection;

/// Number of records a buffer keeps unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 100;

/// Errors that can occur when building a buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

/// Result of an `insert_batch` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertOutcome {
    /// Number of records offered by the batch.
    pub inserted: usize,
    /// Records dropped to get back under capacity, read ones first, each
    /// class oldest first.
    pub evicted: Vec<NotificationRecord>,
}

impl InsertOutcome {
    pub fn changed(&self) -> bool {
        self.inserted > 0
    }
}

/// Owner of the notification working set.
#[derive(Debug, Clone)]
pub struct NotificationBuffer {
    records: Vec<NotificationRecord>,
    capacity: usize,
    revision: u64,
}

impl NotificationBuffer {
    /// Create an empty buffer.
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity(capacity));
        }
        Ok(Self {
            records: Vec::new(),
            capacity,
            revision: 0,
        })
    }

    /// Create a buffer holding an initial record set.
    ///
    /// The initial set goes through the same path as `insert_batch`, so an
    /// oversized set is evicted and sorted exactly like a later insert.
    pub fn with_records(
        records: Vec<NotificationRecord>,
        capacity: usize,
    ) -> Result<Self, BufferError> {
        let mut buffer = Self::new(capacity)?;
        buffer.insert_batch(records);
        buffer.revision = 0;
        Ok(buffer)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records in display order, newest first.
    pub fn records(&self) -> &[NotificationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with the given id, in display order.
    pub fn get(&self, id: &str) -> Option<&NotificationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Counter bumped on every operation that changed the buffer.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn unread_count(&self) -> usize {
        projection::unread_count(&self.records)
    }

    /// Append a batch and evict down to capacity.
    ///
    /// An empty batch leaves the buffer and its revision untouched.
    pub fn insert_batch(
        &mut self,
        batch: impl IntoIterator<Item = NotificationRecord>,
    ) -> InsertOutcome {
        let batch: Vec<NotificationRecord> = batch.into_iter().collect();
        if batch.is_empty() {
            return InsertOutcome::default();
        }

        let inserted = batch.len();
        let mut combined = std::mem::take(&mut self.records);
        combined.extend(batch);

        let evicted = self.settle(combined);
        self.revision += 1;

        debug!(
            "Inserted {} notifications, evicted {}, holding {}/{}",
            inserted,
            evicted.len(),
            self.records.len(),
            self.capacity
        );

        InsertOutcome { inserted, evicted }
    }

    /// Mark one record as read. Returns false when nothing changed.
    ///
    /// With duplicate ids only the first unread match is marked.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.records.iter_mut().find(|r| r.id == id && r.unread) {
            Some(record) => {
                record.unread = false;
                self.revision += 1;
                true
            }
            None => {
                debug!("mark_read({}) had no unread match", id);
                false
            }
        }
    }

    /// Mark every record as read and return the full record set.
    pub fn mark_all_read(&mut self) -> &[NotificationRecord] {
        let mut changed = 0;
        for record in self.records.iter_mut().filter(|r| r.unread) {
            record.unread = false;
            changed += 1;
        }
        if changed > 0 {
            self.revision += 1;
            debug!("Marked {} notifications as read", changed);
        }
        &self.records
    }

    /// Apply the eviction policy to `combined` and store the survivors newest
    /// first. Returns the evicted records.
    fn settle(&mut self, combined: Vec<NotificationRecord>) -> Vec<NotificationRecord> {
        let excess = combined.len().saturating_sub(self.capacity);

        let (mut read, mut unread): (Vec<_>, Vec<_>) = combined
            .into_iter()
            .enumerate()
            .partition(|(_, record)| !record.unread);

        let mut evicted = Vec::new();
        if excess > 0 {
            read.sort_by_key(|(pos, record)| (record.timestamp, *pos));
            unread.sort_by_key(|(pos, record)| (record.timestamp, *pos));

            if read.len() >= excess {
                evicted.extend(read.drain(..excess));
            } else {
                let from_unread = excess - read.len();
                evicted.append(&mut read);
                evicted.extend(unread.drain(..from_unread));
            }
        }

        let mut kept = read;
        kept.append(&mut unread);
        kept.sort_by_key(|(pos, record)| (Reverse(record.timestamp), *pos));

        self.records = kept.into_iter().map(|(_, record)| record).collect();
        evicted.into_iter().map(|(_, record)| record).collect()
    }
}

impl Default for NotificationBuffer {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            capacity: DEFAULT_CAPACITY,
            revision: 0,
        }
    }
}
