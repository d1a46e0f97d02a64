use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use downloads_engine::{ExportOptions, SourceSettings};
use engine_logging::engine_info;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILENAME: &str = "downloads.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceSettings,
    pub export: ExportOptions,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceSettings::default(),
            export: ExportOptions::default(),
            output_dir: PathBuf::from("out"),
        }
    }
}

/// Loads `explicit` when given, else `./downloads.ron` if it exists.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    load_config_from(explicit, Path::new(DEFAULT_CONFIG_FILENAME))
}

fn load_config_from(explicit: Option<&Path>, default_path: &Path) -> anyhow::Result<AppConfig> {
    let (path, required) = match explicit {
        Some(path) => (path, true),
        None => (default_path, false),
    };

    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if !required && err.kind() == ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {path:?}"));
        }
    };

    let config: AppConfig =
        ron::from_str(&content).with_context(|| format!("failed to parse config {path:?}"))?;
    engine_info!("Loaded configuration from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_default_file_means_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(None, &dir.path().join(DEFAULT_CONFIG_FILENAME)).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.ron");
        assert!(load_config_from(Some(&path), Path::new("unused.ron")).is_err());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.ron");
        fs::write(
            &path,
            r#"(
                source: (
                    slot_name: None,
                    base_url: Some("https://www.example.com/"),
                    markers: (name: "dl-title"),
                ),
                export: (pretty: false),
                output_dir: "exports",
            )"#,
        )
        .unwrap();

        let config = load_config_from(Some(&path), Path::new("unused.ron")).unwrap();
        assert_eq!(config.source.slot_name, None);
        assert_eq!(
            config.source.base_url.as_deref(),
            Some("https://www.example.com/")
        );
        assert_eq!(config.source.markers.name, "dl-title");
        assert_eq!(config.source.markers.file_link, "sch-data-file");
        assert_eq!(config.source.item_selector, SourceSettings::default().item_selector);
        assert!(!config.export.pretty);
        assert_eq!(config.export.records_filename, "downloads.json");
        assert_eq!(config.output_dir, PathBuf::from("exports"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
        fs::write(&path, "(source: (slot_name: 42))").unwrap();
        assert!(load_config_from(None, &path).is_err());
    }
}
