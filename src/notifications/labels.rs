//! Calendar-day group labels.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use thiserror::Error;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

const MAX_OFFSET_MINUTES: u32 = 24 * 60 - 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("UTC offset out of range: {0} minutes")]
    InvalidOffset(i32),

    #[error("Invalid date format: {0:?}")]
    InvalidFormat(String),
}

/// Maps unix timestamps to calendar-day strings in a fixed UTC offset.
#[derive(Debug, Clone)]
pub struct DayLabeler {
    offset: FixedOffset,
    format: String,
}

impl DayLabeler {
    pub fn new(utc_offset_minutes: i32, format: impl Into<String>) -> Result<Self, LabelError> {
        if utc_offset_minutes.unsigned_abs() > MAX_OFFSET_MINUTES {
            return Err(LabelError::InvalidOffset(utc_offset_minutes));
        }
        let offset = FixedOffset::east_opt(utc_offset_minutes * 60)
            .ok_or(LabelError::InvalidOffset(utc_offset_minutes))?;

        let format = format.into();
        // chrono panics while rendering a malformed pattern, so reject it here
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(LabelError::InvalidFormat(format));
        }

        Ok(Self { offset, format })
    }

    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
            format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Label for `timestamp`. Timestamps chrono cannot represent fall back to
    /// their decimal form.
    pub fn label(&self, timestamp: i64) -> String {
        match DateTime::from_timestamp(timestamp, 0) {
            Some(utc) => utc
                .with_timezone(&self.offset)
                .format(&self.format)
                .to_string(),
            None => timestamp.to_string(),
        }
    }
}

impl Default for DayLabeler {
    fn default() -> Self {
        Self::utc()
    }
}
