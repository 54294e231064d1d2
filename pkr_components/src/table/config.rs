//! Table configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::game::{
    constants::{DEFAULT_MAX_PLAYERS, MAX_PLAYERS, MIN_PLAYERS},
    entities::Chips,
};
use crate::tournament::BlindLevel;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("max players must be between 4 and 10, got {0}")]
    MaxPlayers(usize),
    #[error("big blind ({big}) must be greater than small blind ({small})")]
    Blinds { small: Chips, big: Chips },
    #[error("malformed table settings: {0}")]
    Parse(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Table configuration
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct TableSettings {
    /// Table name
    pub name: String,

    /// Maximum number of seats (default: 9)
    pub max_players: usize,

    /// Small blind amount
    pub small_blind: Chips,

    /// Big blind amount
    pub big_blind: Chips,

    /// Ante posted by every dealt-in player (0 for none)
    pub ante: Chips,

    /// Seed for random draws; replays with the same seed deal the same cards
    pub seed: Option<u64>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            name: "Default Table".to_string(),
            max_players: DEFAULT_MAX_PLAYERS,
            small_blind: 50,
            big_blind: 100,
            ante: 0,
            seed: None,
        }
    }
}

impl TableSettings {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.max_players) {
            return Err(ConfigError::MaxPlayers(self.max_players));
        }

        if self.big_blind <= self.small_blind {
            return Err(ConfigError::Blinds {
                small: self.small_blind,
                big: self.big_blind,
            });
        }

        Ok(())
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read table settings from {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("invalid table settings in {}", path.display()))
    }

    /// The blind level these settings describe.
    #[must_use]
    pub fn blind_level(&self) -> BlindLevel {
        BlindLevel::new(1, self.big_blind)
            .with_small_blind(self.small_blind)
            .with_ante(self.ante)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = TableSettings::default();
        assert_eq!(settings.max_players, 9);
        assert_eq!(settings.blind_level(), BlindLevel::new(1, 100).with_ante(0));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_max_players_range() {
        for max_players in [3, 11, 0] {
            let settings = TableSettings {
                max_players,
                ..Default::default()
            };
            assert_eq!(settings.validate(), Err(ConfigError::MaxPlayers(max_players)));
        }
    }

    #[test]
    fn test_blinds_must_increase() {
        let settings = TableSettings {
            small_blind: 100,
            big_blind: 100,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Blinds { .. })));
    }

    #[test]
    fn test_from_json_with_defaults() {
        let settings = TableSettings::from_json(r#"{"max_players": 6, "seed": 7}"#).unwrap();
        assert_eq!(settings.max_players, 6);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.big_blind, 100);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            TableSettings::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(
            TableSettings::from_json(r#"{"max_players": 12}"#),
            Err(ConfigError::MaxPlayers(12))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = TableSettings::load("/nonexistent/table.json").unwrap_err();
        assert!(err.to_string().contains("failed to read table settings"));
    }
}
