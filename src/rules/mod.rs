//! Spell resolution rules.
//!
//! - `MagicEngine`: Casts spells, invokes treasures, starts turns
//! - `TargetLegality`: Which lands a spell may target
//! - `conversion_amount`: Mana exchange table
//!
//! The engine never raises. Every call returns a `CastOutcome` describing
//! what changed.

pub mod conversion;
pub mod engine;
pub mod outcome;
mod resolve;
pub mod targeting;

pub use conversion::conversion_amount;
pub use engine::MagicEngine;
pub use outcome::{CastOutcome, CastReport, CastRequest, Resolution, SkipReason};
pub use targeting::{lands_in_scope, StandardTargeting, TargetLegality};
