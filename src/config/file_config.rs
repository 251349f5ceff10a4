use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Buffer settings (can override CLI)
    pub capacity: Option<usize>,
    pub unread_count_override: Option<usize>,

    // Group labels
    pub labels: Option<LabelsConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct LabelsConfig {
    pub utc_offset_minutes: Option<i32>,
    /// strftime pattern, e.g. "%Y-%m-%d"
    pub date_format: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
capacity = 50
unread_count_override = 7

[labels]
utc_offset_minutes = 60
date_format = "%d/%m/%Y"
"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.capacity, Some(50));
        assert_eq!(config.unread_count_override, Some(7));
        let labels = config.labels.unwrap();
        assert_eq!(labels.utc_offset_minutes, Some(60));
        assert_eq!(labels.date_format.as_deref(), Some("%d/%m/%Y"));
    }

    #[test]
    fn test_load_empty_config() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = FileConfig::load(file.path()).unwrap();
        assert!(config.capacity.is_none());
        assert!(config.labels.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "capacity = \"lots\"").unwrap();

        let result = FileConfig::load(file.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse config file"));
    }
}
