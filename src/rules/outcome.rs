//! Cast requests and their outcomes.
//!
//! Casting never fails with an error. A call either applies fully, is
//! absorbed by a ward (mana still charged), or is skipped with nothing
//! changed.

use serde::{Deserialize, Serialize};

use crate::combat::CasualtyReport;
use crate::core::{ArmyId, EffectId, LandPosition};
use crate::effects::EffectSource;
use crate::spells::SpellId;
use crate::world::{BuildingKind, ManaSchool};

/// Arguments of one cast.
///
/// ```
/// use realm_magic::core::LandPosition;
/// use realm_magic::rules::CastRequest;
/// use realm_magic::spells::SpellId;
///
/// let request = CastRequest::new(SpellId::Teleport)
///     .at(LandPosition::new(0, 0))
///     .to(LandPosition::new(4, 4));
/// assert_eq!(request.secondary, Some(LandPosition::new(4, 4)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastRequest {
    pub spell: SpellId,
    pub target: Option<LandPosition>,
    /// Destination of movement spells.
    pub secondary: Option<LandPosition>,
    /// School requested from a mana exchange.
    pub conversion: Option<ManaSchool>,
}

impl CastRequest {
    #[must_use]
    pub const fn new(spell: SpellId) -> Self {
        Self {
            spell,
            target: None,
            secondary: None,
            conversion: None,
        }
    }

    /// Set the primary target land.
    #[must_use]
    pub const fn at(mut self, target: LandPosition) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the secondary target land.
    #[must_use]
    pub const fn to(mut self, secondary: LandPosition) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Set the destination school of a mana exchange.
    #[must_use]
    pub const fn converting_to(mut self, school: ManaSchool) -> Self {
        self.conversion = Some(school);
        self
    }
}

/// Why a cast or invocation changed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// Target missing or not among the legal targets.
    IllegalTarget,
    /// The land owner already carries this spell's once-per-turn guard.
    GuardActive,
    /// The spell awaits battle resolution, or lacks the template its
    /// behaviour needs.
    NotImplemented,
    /// Mana exchange without a destination school.
    MissingConversionTarget,
    /// Spell id not in the catalog.
    UnknownSpell,
    /// Treasure not held, not in the catalog, or passive.
    TreasureUnavailable,
}

/// What resolving a behaviour did to the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Effects stamped, one per entry.
    Stamped(Vec<(LandPosition, EffectId)>),
    Casualties {
        report: CasualtyReport,
        destroyed_building: Option<BuildingKind>,
        /// Once-per-turn guard stamped on the land owner.
        guard: Option<EffectId>,
    },
    /// Armies relocated (empty when the destination was not the caster's).
    Moved(Vec<ArmyId>),
    Exchanged { school: ManaSchool, gained: u32 },
    Spawned { army: ArmyId, count: u32 },
    Corrupted { effect: Option<EffectId> },
    /// Negative effects stripped by a cleansing spell.
    Purified { cleared: usize },
}

/// Details of a fully applied cast or invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastReport {
    pub source: EffectSource,
    /// Mana charged (0 for treasures).
    pub cost: u32,
    /// Part of the cost the pool could not cover.
    pub shortfall: u32,
    pub resolution: Resolution,
}

/// Result of one cast or invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CastOutcome {
    Applied(CastReport),
    /// A ward on the target absorbed a hostile spell. Mana was charged and
    /// the ward consumed.
    Shielded {
        spell: SpellId,
        ward: EffectId,
        cost: u32,
        shortfall: u32,
    },
    Skipped(SkipReason),
}

impl CastOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, CastOutcome::Applied(_))
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, CastOutcome::Skipped(_))
    }

    /// The skip reason, if skipped.
    #[must_use]
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            CastOutcome::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }

    /// The applied report, if applied.
    #[must_use]
    pub fn report(&self) -> Option<&CastReport> {
        match self {
            CastOutcome::Applied(report) => Some(report),
            _ => None,
        }
    }

    /// Mana charged by this outcome.
    #[must_use]
    pub fn mana_charged(&self) -> u32 {
        match self {
            CastOutcome::Applied(report) => report.cost,
            CastOutcome::Shielded { cost, .. } => *cost,
            CastOutcome::Skipped(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let skipped = CastOutcome::Skipped(SkipReason::GuardActive);
        assert!(skipped.is_skipped());
        assert_eq!(skipped.skip_reason(), Some(SkipReason::GuardActive));
        assert_eq!(skipped.mana_charged(), 0);

        let shielded = CastOutcome::Shielded {
            spell: SpellId::Tornado,
            ward: EffectId::new(4),
            cost: 45,
            shortfall: 0,
        };
        assert!(!shielded.is_applied());
        assert_eq!(shielded.mana_charged(), 45);
        assert!(shielded.report().is_none());
    }

    #[test]
    fn test_request_serialization() {
        let request = CastRequest::new(SpellId::ExchangeMana).converting_to(ManaSchool::Red);
        let json = serde_json::to_string(&request).unwrap();
        let back: CastRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }
}
