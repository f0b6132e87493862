//! Per-behaviour spell resolution.
//!
//! Runs after every precondition has passed, so nothing here can refuse a
//! cast. Mana settlement happens in the engine once resolution returns.

use crate::combat::{apply_casualties, CasualtyReport};
use crate::core::{ArmyId, EffectId, EngineConfig, GameState, LandPosition, PlayerId};
use crate::effects::{EffectFactory, EffectSource, EffectTemplate};
use crate::spells::{Destruction, Spell, SpellBehavior};
use crate::treasures::TreasureCatalog;
use crate::world::{BuildingKind, ManaSchool, Movement, Rank, Topology, UnitType};

use super::conversion::conversion_amount;
use super::outcome::Resolution;

/// Where a prepared cast is aimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Aim {
    Land(LandPosition),
    Exchange(ManaSchool),
}

/// Resolves one cast of one spell.
pub(crate) struct Resolver<'a> {
    pub config: &'a EngineConfig,
    pub treasures: &'a TreasureCatalog,
    pub topology: &'a dyn Topology,
    pub spell: &'a Spell,
    pub caster: PlayerId,
    /// Caster proficiency for the spell's school, `0..=1`.
    pub proficiency: f64,
}

impl Resolver<'_> {
    fn source(&self) -> EffectSource {
        EffectSource::Spell(self.spell.id)
    }

    pub fn resolve(
        &self,
        state: &mut GameState,
        aim: Aim,
        secondary: Option<LandPosition>,
    ) -> Resolution {
        let target = match aim {
            Aim::Exchange(school) => return self.exchange(state, school),
            Aim::Land(target) => target,
        };

        match self.spell.behavior {
            SpellBehavior::Stamp => Resolution::Stamped(self.stamp_lands(state, &[target])),
            SpellBehavior::StampArea { radius } => {
                let lands = state.lands_within(self.topology, target, radius, Some(self.caster));
                Resolution::Stamped(self.stamp_lands(state, &lands))
            }
            SpellBehavior::RandomSpread { radius } => {
                let lands = self.spread_targets(state, target, radius);
                Resolution::Stamped(self.stamp_lands(state, &lands))
            }
            SpellBehavior::Casualties {
                filter,
                destruction,
                once_per_owner,
            } => self.casualties(state, target, filter, destruction, once_per_owner),
            SpellBehavior::Teleport => Resolution::Moved(self.teleport(state, target, secondary)),
            SpellBehavior::Spawn {
                unit,
                count,
                scales_with_proficiency,
            } => self.spawn(state, target, unit, count, scales_with_proficiency),
            SpellBehavior::Corrupt => self.corrupt(state, target),
            SpellBehavior::Purify => self.purify(state, target),
            SpellBehavior::ExchangeMana | SpellBehavior::Pending => {
                log::warn!("{} has no land resolution", self.spell.id);
                Resolution::Stamped(Vec::new())
            }
        }
    }

    /// Stamp the spell's effect on each land not already carrying it.
    fn stamp_lands(
        &self,
        state: &mut GameState,
        lands: &[LandPosition],
    ) -> Vec<(LandPosition, EffectId)> {
        let Some(template) = self.spell.effect.as_ref() else {
            return Vec::new();
        };
        let source = self.source();
        let mut stamped = Vec::with_capacity(lands.len());
        for &pos in lands {
            if state.land(pos).map_or(true, |l| l.effects.has_source(source)) {
                continue;
            }
            let effect = EffectFactory::stamp(state, source, template, self.caster);
            let id = effect.id;
            if let Some(land) = state.land_mut(pos) {
                if land.effects.insert(effect) {
                    stamped.push((pos, id));
                }
            }
        }
        stamped
    }

    /// The target plus `ceil(n * proficiency)` of the `n` caster-owned lands
    /// around it, chosen without replacement. Lands already carrying the
    /// spell are never picked, so each pick yields a fresh stamp.
    fn spread_targets(
        &self,
        state: &mut GameState,
        target: LandPosition,
        radius: u32,
    ) -> Vec<LandPosition> {
        let source = self.source();
        let neighbours: Vec<LandPosition> = state
            .lands_within(self.topology, target, radius, Some(self.caster))
            .into_iter()
            .filter(|&pos| pos != target)
            .collect();
        let extra = (neighbours.len() as f64 * self.proficiency).ceil() as usize;
        let fresh: Vec<LandPosition> = neighbours
            .iter()
            .copied()
            .filter(|&pos| state.land(pos).is_some_and(|l| !l.effects.has_source(source)))
            .collect();

        let mut lands = vec![target];
        lands.extend(state.rng.sample(&fresh, extra));
        log::trace!(
            "spread over {} of {} neighbours ({} fresh)",
            lands.len() - 1,
            neighbours.len(),
            fresh.len()
        );
        lands
    }

    fn casualties(
        &self,
        state: &mut GameState,
        target: LandPosition,
        filter: Option<UnitType>,
        destruction: Option<Destruction>,
        once_per_owner: bool,
    ) -> Resolution {
        let owner = state.land(target).and_then(|l| l.owner);
        let report = match &self.spell.penalty {
            Some(penalty) => {
                let scaled = penalty
                    .with_proficiency(self.proficiency, self.config.proficiency_percent_bonus);
                apply_casualties(state, self.treasures, self.config, &scaled, target, filter)
            }
            None => CasualtyReport::default(),
        };

        let destroyed_building = destruction
            .and_then(|d| destroy_building(state, target, d.probability(self.proficiency)));

        let guard = match (once_per_owner, owner) {
            (true, Some(owner)) => self.stamp_player(state, owner),
            _ => None,
        };

        Resolution::Casualties {
            report,
            destroyed_building,
            guard,
        }
    }

    fn stamp_player(&self, state: &mut GameState, player: PlayerId) -> Option<EffectId> {
        let template: &EffectTemplate = self.spell.effect.as_ref()?;
        let effect = EffectFactory::stamp(state, self.source(), template, self.caster);
        let id = effect.id;
        state
            .player_mut(player)?
            .effects
            .insert(effect)
            .then_some(id)
    }

    /// Relocate the caster's armies when the destination is the caster's.
    fn teleport(
        &self,
        state: &mut GameState,
        from: LandPosition,
        to: Option<LandPosition>,
    ) -> Vec<ArmyId> {
        let Some(to) = to.filter(|&pos| state.land(pos).is_some_and(|l| l.is_owned_by(self.caster)))
        else {
            log::debug!("teleport destination not held by {}", self.caster);
            return Vec::new();
        };

        let moved = state.armies_at(from, Some(&[self.caster]));
        for &id in &moved {
            if let Some(army) = state.army_mut(id) {
                army.position = to;
                army.movement = Movement::Stationary;
            }
        }
        log::debug!("{} armies moved {} -> {}", moved.len(), from, to);
        moved
    }

    fn exchange(&self, state: &mut GameState, school: ManaSchool) -> Resolution {
        let alignment = state
            .player(self.caster)
            .map(|p| p.alignment)
            .unwrap_or_default();
        let amount = conversion_amount(alignment, school);
        let gained = state.add_mana(self.caster, school, amount, self.config.max_mana);
        Resolution::Exchanged { school, gained }
    }

    fn spawn(
        &self,
        state: &mut GameState,
        target: LandPosition,
        unit: UnitType,
        count: u32,
        scales_with_proficiency: bool,
    ) -> Resolution {
        let count = if scales_with_proficiency {
            (f64::from(count) * (1.0 + self.proficiency)).ceil() as u32
        } else {
            count
        };
        let army = state.reinforce_or_spawn(self.caster, target, unit, Rank::Base, count);
        Resolution::Spawned { army, count }
    }

    fn corrupt(&self, state: &mut GameState, target: LandPosition) -> Resolution {
        if let Some(land) = state.land_mut(target) {
            land.corrupted = true;
        }
        let effect = self
            .stamp_lands(state, &[target])
            .first()
            .map(|&(_, id)| id);
        Resolution::Corrupted { effect }
    }

    fn purify(&self, state: &mut GameState, target: LandPosition) -> Resolution {
        let cleared = match state.land_mut(target) {
            Some(land) => {
                land.corrupted = false;
                land.effects.remove_where(|e| e.is_negative()).len()
            }
            None => 0,
        };
        Resolution::Purified { cleared }
    }
}

/// Roll `probability`; on success destroy one random building at `target`.
fn destroy_building(
    state: &mut GameState,
    target: LandPosition,
    probability: f64,
) -> Option<BuildingKind> {
    if !state.rng.chance(probability) {
        return None;
    }
    let count = state.land(target)?.buildings.len();
    if count == 0 {
        return None;
    }
    let slot = state.rng.below(count);
    let destroyed = state.land_mut(target)?.destroy_building(slot);
    log::debug!("{:?} destroyed at {}", destroyed, target);
    destroyed
}
