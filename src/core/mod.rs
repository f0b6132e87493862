//! Core engine types: ids, players, state, RNG, configuration, errors.
//!
//! These are the building blocks every other module works through.
//! Hosts tune the engine via `EngineConfig` rather than modifying the core.

pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::EngineConfig;
pub use entity::{ArmyId, EffectId, LandPosition};
pub use error::{CatalogError, ConfigError, EffectError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, TurnContext};
