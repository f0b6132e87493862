//! How each spell resolves.
//!
//! Every catalog entry carries one `SpellBehavior` variant; the cast engine
//! matches on it once. Spells awaiting battle resolution are `Pending`.

use serde::{Deserialize, Serialize};

use crate::world::UnitType;

/// Chance of destroying one building after a casualty spell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Destruction {
    /// Same probability for every caster.
    Fixed(f64),
    /// `base + per_proficiency * proficiency`, capped at 1.
    Scaling { base: f64, per_proficiency: f64 },
}

impl Destruction {
    /// Probability for a caster of the given proficiency (`0..=1`).
    ///
    /// ```
    /// use realm_magic::spells::Destruction;
    ///
    /// assert_eq!(Destruction::Fixed(0.25).probability(1.0), 0.25);
    /// let scaling = Destruction::Scaling { base: 0.5, per_proficiency: 0.5 };
    /// assert_eq!(scaling.probability(0.5), 0.75);
    /// ```
    #[must_use]
    pub fn probability(&self, proficiency: f64) -> f64 {
        match *self {
            Destruction::Fixed(p) => p,
            Destruction::Scaling {
                base,
                per_proficiency,
            } => (base + per_proficiency * proficiency).min(1.0),
        }
    }
}

/// Resolution shape of a spell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpellBehavior {
    /// Stamp the spell's effect on the target land.
    Stamp,
    /// Stamp the effect on every caster-owned land within `radius`.
    StampArea { radius: u32 },
    /// Stamp the target plus a proficiency-scaled random share of the
    /// caster-owned lands within `radius`.
    RandomSpread { radius: u32 },
    /// Run the casualty calculator at the target land.
    Casualties {
        filter: Option<UnitType>,
        destruction: Option<Destruction>,
        /// Stamp the effect on the land owner and refuse repeat casts while
        /// it is present.
        once_per_owner: bool,
    },
    /// Move the caster's armies from the target to the secondary land.
    Teleport,
    /// Convert mana into the requested school.
    ExchangeMana,
    /// Raise units at the target land.
    Spawn {
        unit: UnitType,
        count: u32,
        scales_with_proficiency: bool,
    },
    /// Corrupt the land and stamp the effect.
    Corrupt,
    /// Clear corruption and negative effects.
    Purify,
    /// Not resolvable yet.
    Pending,
}

impl SpellBehavior {
    /// True for spells that cannot be cast yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, SpellBehavior::Pending)
    }

    /// True for behaviours that stamp the spell's effect onto lands.
    #[must_use]
    pub fn stamps_land(&self) -> bool {
        matches!(
            self,
            SpellBehavior::Stamp
                | SpellBehavior::StampArea { .. }
                | SpellBehavior::RandomSpread { .. }
                | SpellBehavior::Corrupt
        )
    }
}
