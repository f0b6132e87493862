//! The magic rules engine.
//!
//! `MagicEngine` bundles the configuration, the spell and treasure catalogs,
//! the map topology and the target legality rules. Hosts call it to:
//! - Start a turn (`begin_turn`, ages effects once)
//! - Query castable spells and legal targets
//! - Cast a spell (`cast`)
//! - Invoke a treasure (`use_treasure`)
//!
//! ## Cast order
//!
//! 1. Look up the spell; pending spells are skipped.
//! 2. Check the target against the legality rules.
//! 3. Refuse repeat casts blocked by a once-per-turn guard.
//! 4. A ward on the target absorbs hostile spells: mana is charged, the ward
//!    is consumed, nothing else happens.
//! 5. Resolve the spell's behaviour.
//! 6. Charge the cost to the caster's pool for the spell's school.
//!
//! Steps 1 to 3 mutate nothing, so a skipped cast leaves the state as it was.
//! Affordability is the caller's contract: settlement saturates at zero and
//! logs a warning.

use tracing::instrument;

use crate::combat::apply_casualties;
use crate::core::{
    ConfigError, EngineConfig, GameState, LandPosition, PlayerId, TurnContext,
};
use crate::effects::{decay_turn_effects, DecayReport, EffectFactory, EffectSource};
use crate::spells::{Spell, SpellBehavior, SpellCatalog, SpellId};
use crate::treasures::{TreasureCatalog, TreasureId};
use crate::world::{HexTopology, ManaSchool, Topology};

use super::outcome::{CastOutcome, CastReport, CastRequest, Resolution, SkipReason};
use super::resolve::{Aim, Resolver};
use super::targeting::{lands_in_scope, StandardTargeting, TargetLegality};

/// Spell resolution engine.
///
/// ```
/// use realm_magic::core::{EngineConfig, LandPosition, PlayerId, TurnContext};
/// use realm_magic::rules::{CastRequest, MagicEngine};
/// use realm_magic::spells::SpellId;
/// use realm_magic::testing::GameStateBuilder;
/// use realm_magic::world::ManaSchool;
///
/// let engine = MagicEngine::new(EngineConfig::default()).unwrap();
/// let me = PlayerId::new(0);
/// let home = LandPosition::new(0, 0);
/// let mut state = GameStateBuilder::new(2)
///     .land(home, Some(me))
///     .mana(me, ManaSchool::Green, 100)
///     .build();
///
/// let turn = TurnContext::new(me, 1);
/// let outcome = engine.cast(&mut state, turn, &CastRequest::new(SpellId::FertileFields).at(home));
/// assert!(outcome.is_applied());
/// assert_eq!(state.mana(me, ManaSchool::Green), 85);
/// ```
#[derive(Clone, Debug)]
pub struct MagicEngine<T = HexTopology, L = StandardTargeting> {
    config: EngineConfig,
    spells: SpellCatalog,
    treasures: TreasureCatalog,
    topology: T,
    targeting: L,
}

impl MagicEngine {
    /// Engine with the standard catalogs, hex topology and standard
    /// targeting rules.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            spells: SpellCatalog::standard(),
            treasures: TreasureCatalog::standard(),
            topology: HexTopology,
            targeting: StandardTargeting,
        })
    }
}

impl<T: Topology, L: TargetLegality> MagicEngine<T, L> {
    /// Replace the map topology.
    #[must_use]
    pub fn with_topology<U: Topology>(self, topology: U) -> MagicEngine<U, L> {
        MagicEngine {
            config: self.config,
            spells: self.spells,
            treasures: self.treasures,
            topology,
            targeting: self.targeting,
        }
    }

    /// Replace the target legality rules.
    #[must_use]
    pub fn with_targeting<M: TargetLegality>(self, targeting: M) -> MagicEngine<T, M> {
        MagicEngine {
            config: self.config,
            spells: self.spells,
            treasures: self.treasures,
            topology: self.topology,
            targeting,
        }
    }

    /// Replace the spell catalog.
    #[must_use]
    pub fn with_spells(mut self, spells: SpellCatalog) -> Self {
        self.spells = spells;
        self
    }

    /// Replace the treasure catalog.
    #[must_use]
    pub fn with_treasures(mut self, treasures: TreasureCatalog) -> Self {
        self.treasures = treasures;
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn spells(&self) -> &SpellCatalog {
        &self.spells
    }

    #[must_use]
    pub fn treasures(&self) -> &TreasureCatalog {
        &self.treasures
    }

    /// An empty world sized for the configured player count.
    #[must_use]
    pub fn new_game(&self, seed: u64) -> GameState {
        GameState::new(self.config.player_count, seed)
    }

    // === Turn boundary ===

    /// Age effects at the start of `turn`. Call once per turn.
    pub fn begin_turn(&self, state: &mut GameState, turn: TurnContext) -> DecayReport {
        decay_turn_effects(state, turn)
    }

    // === Queries ===

    /// Mana charged by one cast of `spell`.
    #[must_use]
    pub fn cost_of(&self, spell: &Spell) -> u32 {
        match spell.behavior {
            SpellBehavior::ExchangeMana => self.config.mana_exchange_cost,
            _ => spell.cost,
        }
    }

    /// Caster proficiency in a school: best hero level of the school's hero
    /// type over the maximum level.
    #[must_use]
    pub fn proficiency(&self, state: &GameState, caster: PlayerId, school: ManaSchool) -> f64 {
        self.config
            .proficiency(state.best_hero_level(caster, school.hero_kind()))
    }

    /// Legal primary targets of `spell` for `caster`.
    #[must_use]
    pub fn valid_targets(&self, state: &GameState, caster: PlayerId, spell: SpellId) -> Vec<LandPosition> {
        self.spells
            .get(spell)
            .map(|s| self.targeting.valid_targets(state, s, caster))
            .unwrap_or_default()
    }

    /// Check whether `caster`'s pool covers `spell`.
    #[must_use]
    pub fn can_afford(&self, state: &GameState, caster: PlayerId, spell: SpellId) -> bool {
        let Some(spell) = self.spells.get(spell) else {
            return false;
        };
        state
            .player(caster)
            .is_some_and(|p| p.mana.can_afford(spell.school, self.cost_of(spell)))
    }

    /// Spells `caster` can cast right now: affordable, implemented, and with
    /// a legal target (or needing none). Ordered by id.
    #[must_use]
    pub fn castable_spells(&self, state: &GameState, caster: PlayerId) -> Vec<SpellId> {
        self.spells
            .iter()
            .filter(|s| !s.behavior.is_pending())
            .filter(|s| self.can_afford(state, caster, s.id))
            .filter(|s| {
                !s.needs_land_target() || !self.targeting.valid_targets(state, s, caster).is_empty()
            })
            .map(|s| s.id)
            .collect()
    }

    /// Lands `holder` may invoke `treasure` on.
    #[must_use]
    pub fn treasure_targets(
        &self,
        state: &GameState,
        holder: PlayerId,
        treasure: TreasureId,
    ) -> Vec<LandPosition> {
        match self.treasures.get(treasure).and_then(|t| t.scope) {
            Some(scope) => lands_in_scope(state, scope, holder),
            None => Vec::new(),
        }
    }

    // === Casting ===

    /// Cast a spell for the turn owner.
    #[instrument(skip_all, name = "cast", fields(spell = %request.spell, caster = %turn.turn_owner))]
    pub fn cast(&self, state: &mut GameState, turn: TurnContext, request: &CastRequest) -> CastOutcome {
        let caster = turn.turn_owner;
        let (spell, aim) = match self.prepare(state, caster, request) {
            Ok(prepared) => prepared,
            Err(reason) => {
                log::debug!("{} skipped: {:?}", request.spell, reason);
                return CastOutcome::Skipped(reason);
            }
        };
        let cost = self.cost_of(spell);

        if let Aim::Land(target) = aim {
            if spell.is_harmful() {
                if let Some(ward) = state.land(target).and_then(|l| l.effects.ward()).map(|w| w.id) {
                    if let Some(land) = state.land_mut(target) {
                        land.effects.remove(ward);
                    }
                    let shortfall = self.settle(state, caster, spell.school, cost);
                    log::debug!("{} absorbed by {} at {}", spell.id, ward, target);
                    return CastOutcome::Shielded {
                        spell: spell.id,
                        ward,
                        cost,
                        shortfall,
                    };
                }
            }
        }

        let resolver = Resolver {
            config: &self.config,
            treasures: &self.treasures,
            topology: &self.topology,
            spell,
            caster,
            proficiency: self.proficiency(state, caster, spell.school),
        };
        let resolution = resolver.resolve(state, aim, request.secondary);
        let shortfall = self.settle(state, caster, spell.school, cost);
        log::debug!("{} resolved: {:?}", spell.id, resolution);

        CastOutcome::Applied(CastReport {
            source: EffectSource::Spell(spell.id),
            cost,
            shortfall,
            resolution,
        })
    }

    /// Every check that can refuse a cast. Mutates nothing.
    fn prepare(
        &self,
        state: &GameState,
        caster: PlayerId,
        request: &CastRequest,
    ) -> Result<(&Spell, Aim), SkipReason> {
        let spell = self.spells.get(request.spell).ok_or(SkipReason::UnknownSpell)?;
        check_resolvable(spell)?;

        let aim = if spell.needs_land_target() {
            let target = request.target.ok_or(SkipReason::IllegalTarget)?;
            if !self.targeting.is_valid_target(state, spell, caster, target) {
                return Err(SkipReason::IllegalTarget);
            }
            Aim::Land(target)
        } else {
            Aim::Exchange(request.conversion.ok_or(SkipReason::MissingConversionTarget)?)
        };

        if let (SpellBehavior::Casualties { once_per_owner: true, .. }, Aim::Land(target)) =
            (spell.behavior, aim)
        {
            let source = EffectSource::Spell(spell.id);
            let guarded = state
                .land(target)
                .and_then(|l| l.owner)
                .and_then(|owner| state.player(owner))
                .is_some_and(|p| p.effects.has_source(source));
            if guarded {
                return Err(SkipReason::GuardActive);
            }
        }

        Ok((spell, aim))
    }

    /// Charge `cost` to the caster. Returns the uncovered part.
    fn settle(&self, state: &mut GameState, caster: PlayerId, school: ManaSchool, cost: u32) -> u32 {
        let shortfall = state.spend_mana(caster, school, cost);
        if shortfall > 0 {
            log::warn!(
                "{} short by {} {:?} mana; pool floored at zero",
                caster,
                shortfall,
                school
            );
        }
        shortfall
    }

    // === Treasures ===

    /// Invoke a held treasure on a land for the turn owner.
    ///
    /// Treasures cost no mana and are not blocked by wards. Consumable
    /// treasures leave the holder.
    #[instrument(skip_all, name = "treasure", fields(treasure = %treasure, holder = %turn.turn_owner))]
    pub fn use_treasure(
        &self,
        state: &mut GameState,
        turn: TurnContext,
        treasure: TreasureId,
        target: LandPosition,
    ) -> CastOutcome {
        let holder = turn.turn_owner;
        let Some(definition) = self.treasures.get(treasure) else {
            return CastOutcome::Skipped(SkipReason::TreasureUnavailable);
        };
        let Some(scope) = definition.scope else {
            return CastOutcome::Skipped(SkipReason::TreasureUnavailable);
        };
        if !state.player(holder).is_some_and(|p| p.has_treasure(treasure)) {
            return CastOutcome::Skipped(SkipReason::TreasureUnavailable);
        }
        if !lands_in_scope(state, scope, holder).contains(&target) {
            return CastOutcome::Skipped(SkipReason::IllegalTarget);
        }

        let source = EffectSource::Treasure(treasure);
        let resolution = if let Some(penalty) = &definition.penalty {
            let report =
                apply_casualties(state, &self.treasures, &self.config, penalty, target, None);
            Resolution::Casualties {
                report,
                destroyed_building: None,
                guard: None,
            }
        } else if let Some(template) = &definition.effect {
            let effect = EffectFactory::stamp(state, source, template, holder);
            let id = effect.id;
            let stamped = state
                .land_mut(target)
                .is_some_and(|land| land.effects.insert(effect));
            Resolution::Stamped(if stamped { vec![(target, id)] } else { Vec::new() })
        } else {
            return CastOutcome::Skipped(SkipReason::NotImplemented);
        };

        // A consumable is spent only when it left a mark.
        let took_effect = !matches!(&resolution, Resolution::Stamped(stamped) if stamped.is_empty());
        if definition.consumable && took_effect {
            if let Some(player) = state.player_mut(holder) {
                player.take_treasure(treasure);
            }
        }
        log::debug!("{} invoked at {}", treasure, target);

        CastOutcome::Applied(CastReport {
            source,
            cost: 0,
            shortfall: 0,
            resolution,
        })
    }
}

/// Refuse spells whose behaviour cannot run with what the catalog gives it.
fn check_resolvable(spell: &Spell) -> Result<(), SkipReason> {
    let ready = match spell.behavior {
        SpellBehavior::Pending => false,
        SpellBehavior::Casualties { once_per_owner, .. } => {
            spell.penalty.is_some() && (!once_per_owner || spell.effect.is_some())
        }
        behavior if behavior.stamps_land() => spell.effect.is_some(),
        _ => true,
    };
    if ready {
        Ok(())
    } else {
        Err(SkipReason::NotImplemented)
    }
}
