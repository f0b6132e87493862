//! Error types for the fallible edges of the engine.
//!
//! Casting and turn decay never fail; they report outcomes instead. Errors
//! only arise while configuring the engine, building catalogs, or stamping
//! effects from a source that has no template.

use thiserror::Error;

use crate::effects::EffectSource;
use crate::spells::SpellId;
use crate::treasures::TreasureId;

/// Invalid engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Player count must be between 1 and 255, got {0}")]
    PlayerCount(usize),

    #[error("Maximum hero level must be positive")]
    ZeroHeroLevel,

    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Rejected catalog registration.
#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("Spell {0:?} already registered")]
    DuplicateSpell(SpellId),

    #[error("Treasure {0:?} already registered")]
    DuplicateTreasure(TreasureId),

    #[error("Invalid {bound} range: min {min} exceeds max {max}")]
    InvertedRange { bound: &'static str, min: f64, max: f64 },

    #[error("Negative {bound} bound: {value}")]
    NegativeBound { bound: &'static str, value: f64 },
}

/// Effect creation failure.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EffectError {
    #[error("{0} has no effect template")]
    NoTemplate(EffectSource),

    #[error("{0} is not in any catalog")]
    UnknownSource(EffectSource),
}
