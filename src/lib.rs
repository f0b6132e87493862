//! # realm-magic
//!
//! Rules engine for a turn-based territorial strategy game: spells, timed
//! effects, and magical attrition against armies.
//!
//! ## Design Principles
//!
//! 1. **Explicit turn context**: Every operation takes the turn owner as a
//!    `TurnContext`; nothing reads a global "current player".
//!
//! 2. **Outcomes, not errors**: Casting and decay never fail. They return a
//!    `CastOutcome` or `DecayReport`, and a skipped call leaves the state
//!    untouched.
//!
//! 3. **Closed behaviours**: Each spell carries a `SpellBehavior` variant.
//!    Spells awaiting battle resolution are `Pending`, not silent
//!    fallthroughs.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Lands and armies live in `im` maps, so
//!   cloning a `GameState` for a snapshot is O(1).
//!
//! - **Deterministic RNG**: ChaCha8-backed `GameRng`, checkpointable and
//!   pinnable for replaying extreme rolls.
//!
//! ## Modules
//!
//! - `core`: Ids, players, state, RNG, configuration, errors
//! - `world`: Lands, armies, player records, mana, topology
//! - `effects`: Effect ledger, factory, turn decay
//! - `spells`: Spell definitions, behaviours, penalty templates, catalog
//! - `treasures`: Treasure catalog
//! - `combat`: Casualty calculator
//! - `rules`: Target legality, conversion table, cast engine
//! - `testing`: World builder for tests

pub mod combat;
pub mod core;
pub mod effects;
pub mod rules;
pub mod spells;
pub mod testing;
pub mod treasures;
pub mod world;

// Re-export commonly used types
pub use crate::core::{
    ArmyId, CatalogError, ConfigError, EffectError, EffectId, EngineConfig, GameRng,
    GameRngState, GameState, LandPosition, PlayerId, PlayerMap, TurnContext,
};

pub use crate::world::{
    Alignment, Army, BuildingKind, Diplomacy, Hero, HeroKind, HexTopology, Land, ManaPool,
    ManaSchool, Movement, Player, Rank, Topology, UnitStack, UnitType,
};

pub use crate::effects::{
    decay_turn_effects, DecayReport, DecayRule, Effect, EffectFactory, EffectKind, EffectLedger,
    EffectScope, EffectSource, EffectTemplate,
};

pub use crate::spells::{
    Destruction, PenaltyTemplate, Spell, SpellBehavior, SpellCatalog, SpellId, TargetScope,
    TierPenalty,
};

pub use crate::treasures::{Treasure, TreasureCatalog, TreasureId};

pub use crate::combat::{apply_casualties, CasualtyLoss, CasualtyReport};

pub use crate::rules::{
    conversion_amount, CastOutcome, CastReport, CastRequest, MagicEngine, Resolution,
    SkipReason, StandardTargeting, TargetLegality,
};
