//! Combat attrition caused by spells and items.
//!
//! Battles between stationary armies are resolved by the host; this module
//! only covers casualties inflicted by magic.

pub mod casualties;

pub use casualties::{apply_casualties, stack_loss, CasualtyLoss, CasualtyReport};
