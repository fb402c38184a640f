//! TOML-based application configuration.
//!
//! Stores CLI-facing preferences:
//! - Export destination and formatting
//! - Report decoration
//!
//! Configuration is stored at `<data_dir>/config.toml`, next to the task
//! database but independent of it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exports are written into when no explicit destination is
    /// given. Relative to the current directory when unset.
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default = "default_true")]
    pub pretty: bool,
}

/// Report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_true")]
    pub quotes: bool,
    /// Path to a custom quotes file (one quote per line).
    /// If set, report decoration draws from this file instead of the
    /// bundled set.
    #[serde(default)]
    pub custom_quotes: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

fn default_true() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: None,
            pretty: true,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            quotes: true,
            custom_quotes: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl AppConfig {
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
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => {
                        let parsed =
                            value
                                .parse::<bool>()
                                .map_err(|_| ConfigError::InvalidValue {
                                    key: key.to_string(),
                                    message: format!("cannot parse '{value}' as bool"),
                                })?;
                        serde_json::Value::Bool(parsed)
                    }
                    // string fields and unset optional fields
                    _ => serde_json::Value::String(value.to_string()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk; a missing file is written out with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: AppConfig =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path,
                        message: e.to_string(),
                    })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to
    /// disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
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
        self.save()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = AppConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert!(parsed.export.pretty);
        assert!(parsed.report.quotes);
        assert_eq!(parsed.export.dir, None);
    }

    #[test]
    fn empty_toml_fills_defaults() {
        let parsed: AppConfig = toml::from_str("").unwrap();
        assert!(parsed.export.pretty);
        assert!(parsed.report.quotes);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("export.pretty").as_deref(), Some("true"));
        assert_eq!(cfg.get("report.quotes").as_deref(), Some("true"));
        assert!(cfg.get("report.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_bool() {
        let mut json = serde_json::to_value(AppConfig::default()).unwrap();
        AppConfig::set_json_value_by_path(&mut json, "report.quotes", "false").unwrap();
        assert_eq!(
            AppConfig::get_json_value_by_path(&json, "report.quotes").unwrap(),
            &serde_json::Value::Bool(false)
        );
    }

    #[test]
    fn set_json_value_by_path_fills_unset_optional_field() {
        let mut json = serde_json::to_value(AppConfig::default()).unwrap();
        AppConfig::set_json_value_by_path(&mut json, "export.dir", "/tmp/exports").unwrap();
        assert_eq!(
            AppConfig::get_json_value_by_path(&json, "export.dir").unwrap(),
            &serde_json::Value::String("/tmp/exports".to_string())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(AppConfig::default()).unwrap();
        let result = AppConfig::set_json_value_by_path(&mut json, "report.nonexistent", "value");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_bool() {
        let mut json = serde_json::to_value(AppConfig::default()).unwrap();
        let result = AppConfig::set_json_value_by_path(&mut json, "export.pretty", "not_a_bool");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
