mod file_config;

pub use file_config::{FileConfig, LabelsConfig};

use crate::notifications::{DayLabeler, DEFAULT_CAPACITY, DEFAULT_DATE_FORMAT};
use anyhow::{bail, Context, Result};

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub capacity: usize,
    pub utc_offset_minutes: i32,
    pub date_format: String,
    pub unread_count_override: Option<usize>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            utc_offset_minutes: 0,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            unread_count_override: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub capacity: usize,
    pub unread_count_override: Option<usize>,
    pub labels: LabelSettings,
}

#[derive(Debug, Clone)]
pub struct LabelSettings {
    pub utc_offset_minutes: i32,
    pub date_format: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let capacity = file.capacity.unwrap_or(cli.capacity);
        if capacity == 0 {
            bail!("capacity must be at least 1");
        }

        let unread_count_override = file
            .unread_count_override
            .or(cli.unread_count_override);

        let labels_file = file.labels.unwrap_or_default();
        let labels = LabelSettings {
            utc_offset_minutes: labels_file
                .utc_offset_minutes
                .unwrap_or(cli.utc_offset_minutes),
            date_format: labels_file
                .date_format
                .unwrap_or_else(|| cli.date_format.clone()),
        };

        let config = Self {
            capacity,
            unread_count_override,
            labels,
        };
        config.day_labeler()?;
        Ok(config)
    }

    pub fn day_labeler(&self) -> Result<DayLabeler> {
        DayLabeler::new(self.labels.utc_offset_minutes, self.labels.date_format.clone())
            .context("Invalid label settings")
    }
}
