//! Casualty calculator.
//!
//! Applies an already-assembled penalty template to every army at a land.
//! The calculator knows nothing about spells; proficiency scaling is the
//! caller's job.
//!
//! ## Loss formula
//!
//! Per unit stack, one draw from the tier's percent range and one from its
//! absolute range:
//!
//! ```text
//! raw  = max(count * percent, absolute)
//! raw *= 1 - damage_reduction      (owner holds a damage-reduction treasure)
//! loss = min(ceil(raw), count)
//! ```

use tracing::instrument;

use crate::core::{ArmyId, EngineConfig, GameState, LandPosition, PlayerId};
use crate::spells::PenaltyTemplate;
use crate::treasures::TreasureCatalog;
use crate::world::{Rank, UnitStack, UnitType};

/// Units lost by one stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CasualtyLoss {
    pub army: ArmyId,
    pub owner: PlayerId,
    pub unit: UnitType,
    pub rank: Rank,
    pub lost: u32,
}

/// Outcome of one casualty pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CasualtyReport {
    /// Non-zero losses, in army then stack order.
    pub losses: Vec<CasualtyLoss>,
    /// Armies deleted by the cleanup sweep.
    pub destroyed_armies: Vec<ArmyId>,
}

impl CasualtyReport {
    /// Total units lost.
    #[must_use]
    pub fn total_lost(&self) -> u32 {
        self.losses.iter().map(|l| l.lost).sum()
    }

    /// Units lost by one player.
    #[must_use]
    pub fn lost_by(&self, owner: PlayerId) -> u32 {
        self.losses
            .iter()
            .filter(|l| l.owner == owner)
            .map(|l| l.lost)
            .sum()
    }
}

/// Loss for a stack of `count` units given the two draws.
#[must_use]
pub fn stack_loss(count: u32, percent: f64, absolute: f64, reduction: Option<f64>) -> u32 {
    let mut raw = (f64::from(count) * percent).max(absolute);
    if let Some(fraction) = reduction {
        raw *= 1.0 - fraction;
    }
    // Float-to-int casts saturate; negative raw becomes 0.
    (raw.ceil() as u32).min(count)
}

/// Apply `penalty` to every army at `position`, whoever owns it.
///
/// Only stacks of `filter` are hit when a filter is given. Armies left with
/// no regulars and no heroes are removed afterwards.
#[instrument(skip_all, name = "casualties", fields(position = %position))]
pub fn apply_casualties(
    state: &mut GameState,
    treasures: &TreasureCatalog,
    config: &EngineConfig,
    penalty: &PenaltyTemplate,
    position: LandPosition,
    filter: Option<UnitType>,
) -> CasualtyReport {
    let mut report = CasualtyReport::default();

    for army_id in state.armies_at(position, None) {
        let Some(army) = state.army(army_id) else {
            continue;
        };
        let owner = army.owner;
        let stacks: Vec<UnitStack> = army.regulars.iter().copied().collect();
        let reduction = state
            .player(owner)
            .filter(|p| treasures.any_reduces_damage(&p.treasures))
            .map(|_| config.damage_reduction);

        let mut losses = Vec::new();
        for (slot, stack) in stacks.iter().enumerate() {
            if stack.count == 0 || filter.is_some_and(|f| f != stack.unit) {
                continue;
            }
            let tier = penalty.tier(stack.rank);
            let percent = state.rng.range_f64(tier.min_percent, tier.max_percent);
            let absolute = state.rng.range_f64(tier.min_absolute, tier.max_absolute);
            let lost = stack_loss(stack.count, percent, absolute, reduction);
            log::trace!(
                "{} {:?}/{:?}: {} of {} lost",
                army_id,
                stack.unit,
                stack.rank,
                lost,
                stack.count
            );
            if lost > 0 {
                losses.push((slot, lost));
            }
        }

        if let Some(army) = state.army_mut(army_id) {
            for &(slot, lost) in &losses {
                if let Some(stack) = army.regulars.get_mut(slot) {
                    stack.count = stack.count.saturating_sub(lost);
                    report.losses.push(CasualtyLoss {
                        army: army_id,
                        owner,
                        unit: stack.unit,
                        rank: stack.rank,
                        lost,
                    });
                }
            }
            army.prune_empty_stacks();
        }
    }

    report.destroyed_armies = state.remove_empty_armies();
    log::debug!(
        "{} units lost at {}, {} armies destroyed",
        report.total_lost(),
        position,
        report.destroyed_armies.len()
    );
    report
}
