//! Runtime configuration.
//!
//! Every field has a compiled-in default. A JSON document may override any
//! subset of them. On wasm32 it is read from `localStorage["gold_clicker_config"]`;
//! native builds (tests, tooling) read the `GOLD_CLICKER_CONFIG` environment variable.

use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gold::catalog::{default_entries, validate_entries, EntryDef};

/// localStorage key holding an optional JSON config override.
#[cfg(target_arch = "wasm32")]
const CONFIG_STORAGE_KEY: &str = "gold_clicker_config";

/// Environment variable holding the JSON override off wasm32.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV_VAR: &str = "GOLD_CLICKER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Game clock rate.
    pub ticks_per_sec: u32,
    /// Ticks between autosave checks. 10 ticks/sec × 30s = 300.
    pub autosave_interval_ticks: u32,
    /// localStorage key of the save snapshot.
    pub storage_key: String,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    /// Shop table in display order.
    pub catalog: Vec<EntryDef>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ticks_per_sec: 10,
            autosave_interval_ticks: 300,
            storage_key: "gold_clicker_save".into(),
            log_level: "info".into(),
            catalog: default_entries(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_sec == 0 {
            return Err(ConfigError::Validation {
                message: "ticks_per_sec must be positive".into(),
            });
        }
        if self.autosave_interval_ticks == 0 {
            return Err(ConfigError::Validation {
                message: "autosave_interval_ticks must be positive".into(),
            });
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "storage_key must not be empty".into(),
            });
        }
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::Validation {
                message: format!("unknown log_level '{}'", self.log_level),
            });
        }
        validate_entries(&self.catalog)
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Load the override from localStorage, falling back to defaults on any error.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(CONFIG_STORAGE_KEY).ok().flatten());

        match json {
            Some(json) => Self::from_json(&json).unwrap_or_else(|e| {
                warn!("ignoring config override: {e}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load the override from `GOLD_CLICKER_CONFIG`, falling back to defaults on any error.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                warn!("ignoring config override: {e}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog.len(), 7);
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = GameConfig::from_json(r#"{ "log_level": "debug" }"#).unwrap();
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_eq!(config.ticks_per_sec, 10);
        assert_eq!(config.storage_key, "gold_clicker_save");
    }

    #[test]
    fn custom_catalog_override() {
        let json = r#"{
            "catalog": [
                { "id": "pick", "name": "Pick", "price": 10, "yield_increase": 1 },
                { "id": "drill", "name": "Drill", "price": 100, "yield_increase": 8, "icon": "D" }
            ]
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.catalog.len(), 2);
        assert_eq!(config.catalog[0].icon, "");
        assert_eq!(config.catalog[1].yield_increase, 8);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_zero_tick_rate() {
        let err = GameConfig::from_json(r#"{ "ticks_per_sec": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let err = GameConfig::from_json(r#"{ "log_level": "chatty" }"#).unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn rejects_invalid_catalog() {
        let json = r#"{ "catalog": [ { "id": "x", "name": "X", "price": 0, "yield_increase": 1 } ] }"#;
        assert!(GameConfig::from_json(json).is_err());
        assert!(GameConfig::from_json(r#"{ "catalog": [] }"#).is_err());
    }

    // The only test touching the variable, so no other test observes it.
    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn load_reads_env_override_and_falls_back() {
        std::env::set_var(CONFIG_ENV_VAR, r#"{ "ticks_per_sec": 20 }"#);
        assert_eq!(GameConfig::load().ticks_per_sec, 20);

        std::env::set_var(CONFIG_ENV_VAR, r#"{ "ticks_per_sec": 0 }"#);
        assert_eq!(GameConfig::load(), GameConfig::default());

        std::env::remove_var(CONFIG_ENV_VAR);
        assert_eq!(GameConfig::load(), GameConfig::default());
    }
}
