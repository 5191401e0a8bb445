//! Tunable battle rules, loadable from a RON file.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Odds used when a combatant tries to flee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeOdds {
    /// Failure percent when both active units share the same initiative.
    pub base_failure: i32,
    pub min_failure: i32,
    pub max_failure: i32,
}

impl Default for EscapeOdds {
    fn default() -> Self {
        Self {
            base_failure: 50,
            min_failure: 5,
            max_failure: 95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioTracks {
    pub battle: String,
    pub battle_end: String,
}

impl Default for AudioTracks {
    fn default() -> Self {
        Self {
            battle: "battle_loop".to_string(),
            battle_end: "battle_end".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Catch bonus added when the battle takes place in the designated wild zone.
    pub wild_zone_catch_bonus: f64,
    pub escape: EscapeOdds,
    /// Multiplier applied to the XP total before it is handed to the winner.
    pub xp_award_factor: u32,
    /// Only this many leading roster slots take part in a battle.
    pub battle_roster_size: usize,
    pub tracks: AudioTracks,
    pub seed: Option<u64>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            wild_zone_catch_bonus: 20.0,
            escape: EscapeOdds::default(),
            xp_award_factor: 2,
            battle_roster_size: 6,
            tracks: AudioTracks::default(),
            seed: None,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(|e| ConfigError::MalformedData(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BattleConfig::from_ron_str("()").unwrap();
        assert_eq!(config, BattleConfig::default());
    }

    #[test]
    fn test_partial_config_overrides_fields() {
        let config =
            BattleConfig::from_ron_str("(seed: Some(7), escape: (base_failure: 40))").unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.escape.base_failure, 40);
        assert_eq!(config.escape.min_failure, 5);
        assert_eq!(config.wild_zone_catch_bonus, 20.0);
    }

    #[test]
    fn test_malformed_config_is_reported() {
        let result = BattleConfig::from_ron_str("(seed: \"soon\")");
        assert!(matches!(result, Err(ConfigError::MalformedData(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = BattleConfig::load(Path::new("does/not/exist.ron"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
