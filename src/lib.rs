//! Notification Buffer Library
//!
//! Capped in-memory notification working set with read-state tracking and a
//! date-grouped presentation view for notification button/panel surfaces.

pub mod config;
pub mod notifications;

// Re-export commonly used types for convenience
pub use notifications::{
    project, BadgeView, BufferError, DayLabeler, InsertOutcome, NotificationBuffer,
    NotificationCategory, NotificationGroup, NotificationHub, NotificationRecord, PanelView,
    StatusTag, DEFAULT_CAPACITY,
};
