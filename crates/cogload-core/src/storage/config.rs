//! TOML-based application configuration.
//!
//! Stores:
//! - Scoring options (ordering validation)
//! - Per-label weight overrides merged onto the built-in weight table
//!
//! Configuration is stored at `~/.config/cogload/config.toml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::weights::{WeightCategory, WeightOverrides, WeightTable};

/// Scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Reject meetings that start before their predecessor.
    #[serde(default = "default_true")]
    pub validate_order: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/cogload/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// category -> label -> weight
    #[serde(default)]
    pub weights: BTreeMap<String, BTreeMap<String, f64>>,
}

fn default_true() -> bool {
    true
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            validate_order: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            weights: BTreeMap::new(),
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
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".to_string(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            value
                                .parse::<f64>()
                                .ok()
                                .and_then(serde_json::Number::from_f64)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/cogload"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location, writing defaults there if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`]. Weight overrides are validated on load.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.weight_table()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
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
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
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

    /// Set a config value by key without saving.
    ///
    /// `weights.<category>.<label>` keys add or replace a weight override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or is out of range.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        if let Some(rest) = key.strip_prefix("weights.") {
            return self.set_weight(key, rest, value);
        }
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    /// Set a config value by key and save to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Config::apply`] fails or the config cannot be
    /// saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    fn set_weight(&mut self, key: &str, rest: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let (category, label) = rest
            .split_once('.')
            .ok_or_else(|| invalid("expected weights.<category>.<label>".to_string()))?;
        let weight: f64 = value
            .parse()
            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;

        let mut candidate = self.clone();
        candidate
            .weights
            .entry(category.to_string())
            .or_default()
            .insert(label.to_string(), weight);
        candidate.weight_table()?;
        *self = candidate;
        Ok(())
    }

    /// Weight overrides keyed by category.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown category.
    pub fn weight_overrides(&self) -> Result<WeightOverrides, ConfigError> {
        let mut overrides = WeightOverrides::new();
        for (name, labels) in &self.weights {
            let category = WeightCategory::parse(name).ok_or_else(|| ConfigError::InvalidValue {
                key: format!("weights.{name}"),
                message: "unknown weight category".to_string(),
            })?;
            overrides.insert(category, labels.clone());
        }
        Ok(overrides)
    }

    /// The effective weight table: built-in values plus overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if an override names an unknown
    /// category or label, or is out of range.
    pub fn weight_table(&self) -> Result<WeightTable, ConfigError> {
        WeightTable::with_overrides(&self.weight_overrides()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::{MeetingType, Role};

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(parsed.scoring.validate_order);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let parsed: Config = toml::from_str("[weights.role]\npresenter = 0.9\n").unwrap();
        assert!(parsed.scoring.validate_order);
        assert_eq!(parsed.weights["role"]["presenter"], 0.9);
    }

    #[test]
    fn only_scoring_and_weights_are_settable() {
        let mut cfg = Config::default();
        assert!(cfg.get("classifier.max_concurrency").is_none());
        assert!(cfg.apply("classifier.max_concurrency", "8").is_err());
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        assert!(!toml_str.contains("classifier"));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("scoring.validate_order").as_deref(), Some("true"));
        assert!(cfg.get("scoring.missing_key").is_none());
    }

    #[test]
    fn apply_updates_nested_bool() {
        let mut cfg = Config::default();
        cfg.apply("scoring.validate_order", "false").unwrap();
        assert!(!cfg.scoring.validate_order);
        assert_eq!(cfg.get("scoring.validate_order").as_deref(), Some("false"));
    }

    #[test]
    fn apply_rejects_unknown_key_and_bad_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("scoring.nonexistent", "1").is_err());
        assert!(cfg.apply("scoring.validate_order", "not_a_bool").is_err());
        assert!(cfg.apply("", "1").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn apply_weight_override() {
        let mut cfg = Config::default();
        cfg.apply("weights.role.presenter", "0.95").unwrap();
        let table = cfg.weight_table().unwrap();
        assert_eq!(table.role_load(&Role::Presenter), 0.95);
        assert_eq!(cfg.get("weights.role.presenter").as_deref(), Some("0.95"));
    }

    #[test]
    fn apply_weight_override_is_validated() {
        let mut cfg = Config::default();
        assert!(cfg.apply("weights.role.presenter", "2.0").is_err());
        assert!(cfg.apply("weights.mood.presenter", "0.5").is_err());
        assert!(cfg.apply("weights.role", "0.5").is_err());
        assert!(cfg.weights.is_empty());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_load_preserve_weight_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("weights.complexity.standup", "0.25").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        let table = loaded.weight_table().unwrap();
        assert_eq!(table.complexity(&MeetingType::Standup), 0.25);
    }

    #[test]
    fn load_from_rejects_invalid_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weights.gap]\nwithin_90 = 0.1\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scoring = [").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
    }
}
