//! Spell system: definitions, behaviours, penalty templates, and catalog.
//!
//! ## Key Types
//!
//! - `SpellId`: Identifier of every spell
//! - `Spell`: Static spell data (school, cost, scope, templates)
//! - `SpellBehavior`: How a spell resolves once cast
//! - `PenaltyTemplate`: Per-tier casualty ranges
//! - `SpellCatalog`: Spell definition lookup

pub mod behavior;
pub mod definition;
pub mod penalty;
pub mod registry;

pub use behavior::{Destruction, SpellBehavior};
pub use definition::{Spell, SpellId, TargetScope};
pub use penalty::{PenaltyTemplate, TierPenalty};
pub use registry::SpellCatalog;
