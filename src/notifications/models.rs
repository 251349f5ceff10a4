//! Notification data models

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kind of notification. Carried through the buffer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Comment,
    Transfer,
    #[default]
    Other,
}

impl NotificationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Comment => "comment",
            NotificationCategory::Transfer => "transfer",
            NotificationCategory::Other => "other",
        }
    }
}

/// Status code from the caller's status vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusTag(pub String);

impl StatusTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single notification entry.
///
/// Only `unread` is ever changed while the record lives inside a buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub status_tag: StatusTag,
    #[serde(default)]
    pub category: NotificationCategory,
    #[serde(default)]
    pub link: Option<String>,
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    #[serde(default = "default_unread")]
    pub unread: bool,
}

fn default_unread() -> bool {
    true
}

impl NotificationRecord {
    /// Create an unread record with empty display extras.
    pub fn new(id: impl Into<String>, title: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: String::new(),
            status_tag: StatusTag::default(),
            category: NotificationCategory::default(),
            link: None,
            timestamp,
            unread: true,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn with_status_tag(mut self, tag: StatusTag) -> Self {
        self.status_tag = tag;
        self
    }

    pub fn with_category(mut self, category: NotificationCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn read(mut self) -> Self {
        self.unread = false;
        self
    }
}

/// Load an initial record set from a JSON array file.
pub fn load_records(path: &Path) -> Result<Vec<NotificationRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read notifications file: {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse notifications file: {:?}", path))
}
