//! Configuration management for the directory manager
//!
//! Loads `config.toml` (optional) with `RAX_DIR_*` environment overrides.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Default file stem searched in the current directory
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Compression used for file entries in archives
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveCompression {
    Stored,
    #[default]
    Deflated,
}

impl From<ArchiveCompression> for zip::CompressionMethod {
    fn from(compression: ArchiveCompression) -> Self {
        match compression {
            ArchiveCompression::Stored => zip::CompressionMethod::Stored,
            ArchiveCompression::Deflated => zip::CompressionMethod::Deflated,
        }
    }
}

/// Manager configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ManagerConfig {
    /// Initial working root; the process current directory when absent
    /// Environment: RAX_DIR_WORKING_ROOT
    pub working_root: Option<String>,

    /// Sort archive entries by name for reproducible archives
    pub sort_archive_entries: bool,

    pub compression: ArchiveCompression,

    /// Permission bits for created directories (Unix only, before umask)
    pub directory_mode: u32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            working_root: None,
            sort_archive_entries: false,
            compression: ArchiveCompression::Deflated,
            directory_mode: 0o755,
        }
    }
}

impl ManagerConfig {
    /// Load from `./config.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(DEFAULT_CONFIG_PATH, false)
    }

    /// Load from an explicit file path (extension optional); the file must exist
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        Self::build(path, true)
    }

    fn build(path: &str, required: bool) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix("RAX_DIR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: ManagerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if matches!(self.working_root.as_deref(), Some(root) if root.trim().is_empty()) {
            return Err(config::ConfigError::Message(
                "working_root cannot be empty".into(),
            ));
        }

        if self.directory_mode & !0o7777 != 0 {
            return Err(config::ConfigError::Message(format!(
                "directory_mode {:o} has bits outside 0o7777",
                self.directory_mode
            )));
        }

        Ok(())
    }

    /// Get the configured working root as PathBuf
    pub fn working_root_path(&self) -> Option<PathBuf> {
        self.working_root.as_ref().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");

        let config = ManagerConfig::build(path.to_str().unwrap(), false).unwrap();
        assert_eq!(config.directory_mode, 0o755);
        assert_eq!(config.compression, ArchiveCompression::Deflated);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(ManagerConfig::load_from(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_values_read_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manager.toml");
        fs::write(
            &path,
            "working_root = \"/srv/data\"\nsort_archive_entries = true\ncompression = \"stored\"\ndirectory_mode = 0o700\n",
        )
        .unwrap();

        let config = ManagerConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.working_root_path(), Some(PathBuf::from("/srv/data")));
        assert!(config.sort_archive_entries);
        assert_eq!(config.compression, ArchiveCompression::Stored);
        assert_eq!(config.directory_mode, 0o700);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ManagerConfig {
            working_root: Some("  ".into()),
            ..ManagerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ManagerConfig {
            directory_mode: 0o17777,
            ..ManagerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
