//! Target legality.
//!
//! Hosts ask which lands a spell may be aimed at before offering it to the
//! player; the cast engine asks again and refuses anything else.

use crate::core::{GameState, LandPosition, PlayerId};
use crate::effects::EffectSource;
use crate::spells::{Spell, TargetScope};
use crate::world::{Diplomacy, Land};

/// Decides which lands a spell may target.
pub trait TargetLegality {
    /// Every legal primary target for `caster`, ordered by position.
    ///
    /// Spells without a land target have none.
    fn valid_targets(&self, state: &GameState, spell: &Spell, caster: PlayerId) -> Vec<LandPosition>;

    /// Check a single target.
    fn is_valid_target(
        &self,
        state: &GameState,
        spell: &Spell,
        caster: PlayerId,
        target: LandPosition,
    ) -> bool {
        self.valid_targets(state, spell, caster).contains(&target)
    }
}

/// Ownership and diplomacy rules of the standard game.
///
/// - `Caster`: lands owned by the caster
/// - `Opponent`: lands owned by another player the caster is not allied with
/// - `AllPlayers`: every land
///
/// Spells requiring an own army only reach lands where the caster has one.
/// Land-stamping spells skip lands already carrying their effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardTargeting;

impl TargetLegality for StandardTargeting {
    fn valid_targets(&self, state: &GameState, spell: &Spell, caster: PlayerId) -> Vec<LandPosition> {
        if !spell.needs_land_target() {
            return Vec::new();
        }
        let source = EffectSource::Spell(spell.id);
        let stamps = spell.behavior.stamps_land() && spell.effect.is_some();

        lands_in_scope(state, spell.scope, caster)
            .into_iter()
            .filter(|&pos| {
                !spell.requires_own_army || !state.armies_at(pos, Some(&[caster])).is_empty()
            })
            .filter(|&pos| {
                !stamps || state.land(pos).map_or(true, |l| !l.effects.has_source(source))
            })
            .collect()
    }

    fn is_valid_target(
        &self,
        state: &GameState,
        spell: &Spell,
        caster: PlayerId,
        target: LandPosition,
    ) -> bool {
        let Some(land) = state.land(target) else {
            return false;
        };
        spell.needs_land_target()
            && in_scope(state, land, spell.scope, caster)
            && (!spell.requires_own_army || !state.armies_at(target, Some(&[caster])).is_empty())
            && !(spell.behavior.stamps_land()
                && spell.effect.is_some()
                && land.effects.has_source(EffectSource::Spell(spell.id)))
    }
}

/// Lands `caster` may reach under `scope`, ordered by position.
#[must_use]
pub fn lands_in_scope(state: &GameState, scope: TargetScope, caster: PlayerId) -> Vec<LandPosition> {
    state
        .lands()
        .filter(|land| in_scope(state, land, scope, caster))
        .map(|land| land.position)
        .collect()
}

fn in_scope(state: &GameState, land: &Land, scope: TargetScope, caster: PlayerId) -> bool {
    match scope {
        TargetScope::Caster => land.is_owned_by(caster),
        TargetScope::Opponent => match land.owner {
            Some(owner) if owner != caster => state
                .player(caster)
                .map_or(true, |p| p.stance_toward(owner) != Diplomacy::Alliance),
            _ => false,
        },
        TargetScope::AllPlayers => true,
    }
}
