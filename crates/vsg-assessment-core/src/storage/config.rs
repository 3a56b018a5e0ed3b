//! TOML-based application configuration.
//!
//! Stores:
//! - Where exported documents are written
//! - Document paper size and footer program name
//! - The default log filter
//!
//! Configuration is stored at `~/.config/vsg-assessment/config.toml`. A
//! missing file means defaults; nothing is written until `save`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{data_dir, ensure_data_dir};
use crate::document::{DocumentOptions, Paper};
use crate::error::ConfigError;

/// Export destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

/// Document appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default)]
    pub paper: Paper,
    #[serde(default = "default_program_name")]
    pub program_name: String,
}

/// Logging defaults, overridden by RUST_LOG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/vsg-assessment/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default functions
fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_program_name() -> String {
    "VSG Internship Program".into()
}
fn default_log_filter() -> String {
    "info".into()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            paper: Paper::default(),
            program_name: default_program_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let (parent, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent) = parent {
            for part in parent.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<u64>()
                    .map_err(|e| invalid(e.to_string()))?
                    .into(),
            ),
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(invalid("not a leaf value".to_string()));
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Path of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location or return defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        ensure_data_dir()?;
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Document options with the configured overrides applied.
    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            paper: self.document.paper,
            program_name: self.document.program_name.clone(),
            ..DocumentOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.document.paper, Paper::Letter);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[document]\npaper = \"a4\"\n").unwrap();
        assert_eq!(parsed.document.paper, Paper::A4);
        assert_eq!(parsed.document.program_name, "VSG Internship Program");
        assert_eq!(parsed.export.directory, PathBuf::from("."));
        assert_eq!(parsed.logging.filter, "info");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("document.paper").as_deref(), Some("letter"));
        assert_eq!(cfg.get("export.directory").as_deref(), Some("."));
        assert!(cfg.get("document").is_none());
        assert!(cfg.get("document.missing_key").is_none());
    }

    #[test]
    fn set_updates_nested_string() {
        let mut cfg = Config::default();
        cfg.set("document.program_name", "Summer Cohort").unwrap();
        assert_eq!(cfg.document.program_name, "Summer Cohort");
        cfg.set("document.paper", "a4").unwrap();
        assert_eq!(cfg.document.paper, Paper::A4);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("document.nonexistent_key", "value"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("", "value"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_paper() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("document.paper", "legal"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg.document.paper, Paper::Letter);
    }

    #[test]
    fn missing_file_loads_defaults_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(!path.exists());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("export.directory", "/tmp/exports").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "export = 3").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn document_options_apply_overrides() {
        let mut cfg = Config::default();
        cfg.set("document.program_name", "Fall Cohort").unwrap();
        let options = cfg.document_options();
        assert_eq!(options.program_name, "Fall Cohort");
        assert_eq!(options.title, "VSG Week 1 Assessment");
    }
}
