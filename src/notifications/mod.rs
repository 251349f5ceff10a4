//! User notifications module

mod hub;
mod labels;
mod models;
mod projection;
mod store;

pub use hub::{BadgeView, NotificationHub, PanelView};
pub use labels::{DayLabeler, LabelError, DEFAULT_DATE_FORMAT};
pub use models::{load_records, NotificationCategory, NotificationRecord, StatusTag};
pub use projection::{project, unread_count, NotificationGroup};
pub use store::{BufferError, InsertOutcome, NotificationBuffer, DEFAULT_CAPACITY};
