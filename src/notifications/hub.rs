//! Shared handle between the notification button and panel.
//!
//! Both surfaces hold a clone of the same [`NotificationHub`] and read their
//! views from the single buffer behind it, so a badge and an open panel always
//! agree on the post-mutation state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

use super::models::NotificationRecord;
use super::projection::{self, NotificationGroup};
use super::store::{BufferError, InsertOutcome, NotificationBuffer};

type AllReadCallback = Arc<dyn Fn(&[NotificationRecord]) + Send + Sync>;

/// What the notification button renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    pub unread_count: usize,
    pub has_unread: bool,
}

/// What the notification panel renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub groups: Vec<NotificationGroup>,
    pub unread_count: usize,
    /// No records at all, the panel shows its empty state.
    pub all_caught_up: bool,
    pub revision: u64,
}

struct HubState {
    buffer: NotificationBuffer,
    unread_count_override: Option<usize>,
    on_all_read: Option<AllReadCallback>,
}

impl HubState {
    fn displayed_unread_count(&self) -> usize {
        self.unread_count_override
            .unwrap_or_else(|| self.buffer.unread_count())
    }
}

#[derive(Clone)]
pub struct NotificationHub {
    state: Arc<Mutex<HubState>>,
}

impl NotificationHub {
    pub fn new(records: Vec<NotificationRecord>, capacity: usize) -> Result<Self, BufferError> {
        Ok(Self::from_buffer(NotificationBuffer::with_records(
            records, capacity,
        )?))
    }

    pub fn from_buffer(buffer: NotificationBuffer) -> Self {
        Self {
            state: Arc::new(Mutex::new(HubState {
                buffer,
                unread_count_override: None,
                on_all_read: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register the callback fired by [`NotificationHub::mark_all_read`].
    pub fn on_all_read<F>(&self, callback: F)
    where
        F: Fn(&[NotificationRecord]) + Send + Sync + 'static,
    {
        self.lock().on_all_read = Some(Arc::new(callback));
    }

    /// Imperative entry point for records arriving after construction.
    pub fn push_batch(&self, records: Vec<NotificationRecord>) -> InsertOutcome {
        let outcome = self.lock().buffer.insert_batch(records);
        if !outcome.evicted.is_empty() {
            info!(
                "Evicted {} notifications to stay within capacity",
                outcome.evicted.len()
            );
        }
        outcome
    }

    pub fn mark_read(&self, id: &str) -> bool {
        self.lock().buffer.mark_read(id)
    }

    /// Mark everything read and hand the full record list to the all-read
    /// callback, if any. The callback runs after the lock is released.
    pub fn mark_all_read(&self) -> Vec<NotificationRecord> {
        let (records, callback) = {
            let mut state = self.lock();
            let records = state.buffer.mark_all_read().to_vec();
            (records, state.on_all_read.clone())
        };

        if let Some(callback) = callback {
            debug!("Dispatching all-read callback for {} notifications", records.len());
            callback(&records);
        }
        records
    }

    /// Count derived from the buffer, ignoring any display override.
    pub fn unread_count(&self) -> usize {
        self.lock().buffer.unread_count()
    }

    /// Show `count` on the badge and panel instead of the derived count.
    /// Eviction and read-state handling keep using the derived count.
    pub fn set_unread_count_override(&self, count: Option<usize>) {
        self.lock().unread_count_override = count;
    }

    pub fn displayed_unread_count(&self) -> usize {
        self.lock().displayed_unread_count()
    }

    pub fn badge(&self) -> BadgeView {
        let unread_count = self.displayed_unread_count();
        BadgeView {
            unread_count,
            has_unread: unread_count > 0,
        }
    }

    pub fn panel_view<F>(&self, label_fn: F) -> PanelView
    where
        F: FnMut(i64) -> String,
    {
        let state = self.lock();
        let groups = projection::project(state.buffer.records(), label_fn);
        PanelView {
            all_caught_up: groups.is_empty(),
            groups,
            unread_count: state.displayed_unread_count(),
            revision: state.buffer.revision(),
        }
    }

    /// Copy of the current records, newest first.
    pub fn snapshot(&self) -> Vec<NotificationRecord> {
        self.lock().buffer.records().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().buffer.capacity()
    }

    pub fn revision(&self) -> u64 {
        self.lock().buffer.revision()
    }
}
