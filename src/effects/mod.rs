//! Effect system: timed and permanent modifiers.
//!
//! - `Effect`: One modifier held in an entity's `EffectLedger`
//! - `EffectTemplate`: Shape a spell or treasure stamps onto new effects
//! - `EffectFactory`: Creates effects from catalog templates
//! - `decay_turn_effects`: Ages ledgers once per turn boundary
//!
//! ## Lifecycle
//!
//! Effects are created by spell resolution and treasure invocation. They
//! leave a ledger when decay brings their duration to zero, when a ward is
//! consumed by a hostile spell, or when a cleansing spell strips them.

mod decay;
mod effect;
mod factory;

pub use decay::{decay_turn_effects, DecayReport};
pub use effect::{
    DecayRule, Effect, EffectKind, EffectLedger, EffectScope, EffectSource, EffectTemplate,
    LedgerAging,
};
pub use factory::EffectFactory;
