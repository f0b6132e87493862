//! Casualty penalty templates.
//!
//! A penalty holds one range pair per unit tier. Percent bounds are
//! fractions of the stack (0.1 = 10%); absolute bounds are unit counts.
//! Templates are always complete: all three tiers are present.

use serde::{Deserialize, Serialize};

use crate::core::CatalogError;
use crate::world::Rank;

/// Damage ranges for one unit tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierPenalty {
    pub min_percent: f64,
    pub max_percent: f64,
    pub min_absolute: f64,
    pub max_absolute: f64,
}

impl TierPenalty {
    /// Create a tier penalty.
    #[must_use]
    pub const fn new(min_percent: f64, max_percent: f64, min_absolute: f64, max_absolute: f64) -> Self {
        Self {
            min_percent,
            max_percent,
            min_absolute,
            max_absolute,
        }
    }

    /// Multiply every bound by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            min_percent: self.min_percent * factor,
            max_percent: self.max_percent * factor,
            min_absolute: self.min_absolute * factor,
            max_absolute: self.max_absolute * factor,
        }
    }

    /// Widen the ranges for a caster of the given proficiency (`0..=1`):
    /// percent bounds gain `percent_bonus * proficiency`, absolute bounds
    /// are multiplied by `1 + proficiency`.
    #[must_use]
    pub fn with_proficiency(&self, proficiency: f64, percent_bonus: f64) -> Self {
        let bonus = percent_bonus * proficiency;
        let factor = 1.0 + proficiency;
        Self {
            min_percent: self.min_percent + bonus,
            max_percent: self.max_percent + bonus,
            min_absolute: self.min_absolute * factor,
            max_absolute: self.max_absolute * factor,
        }
    }

    /// Reject negative or inverted ranges.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (bound, value) in [
            ("min_percent", self.min_percent),
            ("min_absolute", self.min_absolute),
        ] {
            if value < 0.0 {
                return Err(CatalogError::NegativeBound { bound, value });
            }
        }
        if self.min_percent > self.max_percent {
            return Err(CatalogError::InvertedRange {
                bound: "percent",
                min: self.min_percent,
                max: self.max_percent,
            });
        }
        if self.min_absolute > self.max_absolute {
            return Err(CatalogError::InvertedRange {
                bound: "absolute",
                min: self.min_absolute,
                max: self.max_absolute,
            });
        }
        Ok(())
    }
}

/// Per-tier casualty ranges.
///
/// ```
/// use realm_magic::spells::{PenaltyTemplate, TierPenalty};
/// use realm_magic::world::Rank;
///
/// let penalty = PenaltyTemplate::from_base(TierPenalty::new(0.2, 0.4, 2.0, 4.0));
/// assert_eq!(penalty.tier(Rank::Veteran).max_absolute, 2.0);
/// assert_eq!(penalty.tier(Rank::Elite).max_absolute, 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PenaltyTemplate {
    pub base: TierPenalty,
    pub veteran: TierPenalty,
    pub elite: TierPenalty,
}

impl PenaltyTemplate {
    /// Veteran damage relative to base.
    pub const VETERAN_FACTOR: f64 = 0.5;
    /// Elite damage relative to base.
    pub const ELITE_FACTOR: f64 = 0.25;

    /// Create a template with independent tiers.
    #[must_use]
    pub const fn new(base: TierPenalty, veteran: TierPenalty, elite: TierPenalty) -> Self {
        Self {
            base,
            veteran,
            elite,
        }
    }

    /// Derive veteran (halved) and elite (quartered) tiers from the base.
    #[must_use]
    pub fn from_base(base: TierPenalty) -> Self {
        Self {
            base,
            veteran: base.scaled(Self::VETERAN_FACTOR),
            elite: base.scaled(Self::ELITE_FACTOR),
        }
    }

    /// Ranges for one tier.
    #[must_use]
    pub fn tier(&self, rank: Rank) -> &TierPenalty {
        match rank {
            Rank::Base => &self.base,
            Rank::Veteran => &self.veteran,
            Rank::Elite => &self.elite,
        }
    }

    /// Apply proficiency scaling to every tier.
    #[must_use]
    pub fn with_proficiency(&self, proficiency: f64, percent_bonus: f64) -> Self {
        Self {
            base: self.base.with_proficiency(proficiency, percent_bonus),
            veteran: self.veteran.with_proficiency(proficiency, percent_bonus),
            elite: self.elite.with_proficiency(proficiency, percent_bonus),
        }
    }

    /// Validate every tier.
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.base.validate()?;
        self.veteran.validate()?;
        self.elite.validate()
    }
}
