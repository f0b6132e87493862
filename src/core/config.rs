//! Engine configuration.
//!
//! Hosts configure the rules engine once at startup. Every field has a
//! default, so a partial JSON document is enough:
//!
//! ```
//! use realm_magic::core::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "player_count": 4 }"#).unwrap();
//! assert_eq!(config.player_count, 4);
//! assert_eq!(config.max_hero_level, 10);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Tunable constants of the rules engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Cap of each of the five mana counters.
    pub max_mana: u32,

    /// Highest level a hero can reach; proficiency is `level / max_hero_level`.
    pub max_hero_level: u32,

    /// Fraction of casualties prevented by a damage-reduction treasure.
    pub damage_reduction: f64,

    /// Added to both percent bounds at full proficiency.
    pub proficiency_percent_bonus: f64,

    /// Source mana spent by one mana exchange.
    pub mana_exchange_cost: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            max_mana: 1000,
            max_hero_level: 10,
            damage_reduction: 0.35,
            proficiency_percent_bonus: 0.1,
            mana_exchange_cost: 100,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration for `player_count` players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is within its legal range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count == 0 || self.player_count > 255 {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.max_hero_level == 0 {
            return Err(ConfigError::ZeroHeroLevel);
        }
        if !(0.0..=1.0).contains(&self.damage_reduction) {
            return Err(ConfigError::OutOfRange {
                field: "damage_reduction",
                value: self.damage_reduction,
            });
        }
        if !(0.0..=1.0).contains(&self.proficiency_percent_bonus) {
            return Err(ConfigError::OutOfRange {
                field: "proficiency_percent_bonus",
                value: self.proficiency_percent_bonus,
            });
        }
        Ok(())
    }

    /// Set the mana cap.
    #[must_use]
    pub fn with_max_mana(mut self, max: u32) -> Self {
        self.max_mana = max;
        self
    }

    /// Set the maximum hero level.
    #[must_use]
    pub fn with_max_hero_level(mut self, level: u32) -> Self {
        self.max_hero_level = level;
        self
    }

    /// Set the damage-reduction fraction.
    #[must_use]
    pub fn with_damage_reduction(mut self, fraction: f64) -> Self {
        self.damage_reduction = fraction;
        self
    }

    /// Caster proficiency in `[0, 1]` for a hero of the given level.
    #[must_use]
    pub fn proficiency(&self, hero_level: u32) -> f64 {
        if self.max_hero_level == 0 {
            return 0.0;
        }
        (f64::from(hero_level) / f64::from(self.max_hero_level)).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.player_count, 2);
        assert_eq!(config.max_mana, 1000);
        assert_eq!(config.mana_exchange_cost, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new(3)
            .with_max_mana(500)
            .with_max_hero_level(20)
            .with_damage_reduction(0.5);

        assert_eq!(config.player_count, 3);
        assert_eq!(config.max_mana, 500);
        assert_eq!(config.max_hero_level, 20);
        assert_eq!(config.damage_reduction, 0.5);
    }

    #[test]
    fn test_proficiency() {
        let config = EngineConfig::default();

        assert_eq!(config.proficiency(0), 0.0);
        assert_eq!(config.proficiency(5), 0.5);
        assert_eq!(config.proficiency(10), 1.0);
        assert_eq!(config.proficiency(15), 1.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{ "max_mana": 250 }"#).unwrap();
        assert_eq!(config.max_mana, 250);
        assert_eq!(config.player_count, 2);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = EngineConfig::from_json(r#"{ "player_count": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::PlayerCount(0)));

        let err = EngineConfig::from_json(r#"{ "damage_reduction": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "damage_reduction", .. }));

        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_hero_level_rejected() {
        let config = EngineConfig::default().with_max_hero_level(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroHeroLevel)));
        assert_eq!(config.proficiency(3), 0.0);
    }
}
