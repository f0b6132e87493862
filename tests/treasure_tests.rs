//! Treasure invocation through `MagicEngine::use_treasure`.

use realm_magic::core::{EngineConfig, GameRng, GameState, LandPosition, PlayerId, TurnContext};
use realm_magic::effects::{EffectKind, EffectScope, EffectSource, EffectTemplate};
use realm_magic::rules::{CastOutcome, CastRequest, MagicEngine, Resolution, SkipReason};
use realm_magic::spells::{SpellId, TargetScope};
use realm_magic::testing::GameStateBuilder;
use realm_magic::treasures::{Treasure, TreasureCatalog, TreasureId};
use realm_magic::world::{ManaSchool, Rank, UnitType};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);
const HOME: LandPosition = LandPosition::new(0, 0);
const AWAY: LandPosition = LandPosition::new(0, 4);

fn engine() -> MagicEngine {
    MagicEngine::new(EngineConfig::default()).unwrap()
}

fn footmen_at(state: &GameState, pos: LandPosition) -> u32 {
    state
        .armies_at(pos, None)
        .into_iter()
        .filter_map(|id| state.army(id))
        .map(|a| a.count_of_type(UnitType::Footmen))
        .sum()
}

/// An Aegis Stone ward turns away the next hostile spell and is used up.
#[test]
fn test_aegis_stone_blocks_tornado() {
    let engine = engine();
    let mut state = GameStateBuilder::new(2)
        .rng(GameRng::pinned(1.0))
        .land(HOME, Some(P0))
        .land(AWAY, Some(P1))
        .treasure(P1, TreasureId::AegisStone)
        .mana(P0, ManaSchool::Red, 100)
        .army(P1, AWAY, |a| a.with_units(UnitType::Footmen, Rank::Base, 5))
        .build();

    let invoked = engine.use_treasure(&mut state, TurnContext::new(P1, 1), TreasureId::AegisStone, AWAY);
    let report = invoked.report().unwrap();
    assert_eq!(report.source, EffectSource::Treasure(TreasureId::AegisStone));
    assert_eq!(report.cost, 0);
    assert!(!state.player(P1).unwrap().has_treasure(TreasureId::AegisStone));

    let outcome = engine.cast(&mut state, TurnContext::new(P0, 2), &CastRequest::new(SpellId::Tornado).at(AWAY));
    assert!(matches!(outcome, CastOutcome::Shielded { .. }));
    assert_eq!(footmen_at(&state, AWAY), 5);
    assert!(state.land(AWAY).unwrap().effects.is_empty());
}

/// Aegis Stone only goes on the holder's own land.
#[test]
fn test_aegis_stone_scope() {
    let engine = engine();
    let mut state = GameStateBuilder::new(2)
        .land(HOME, Some(P0))
        .land(AWAY, Some(P1))
        .treasure(P0, TreasureId::AegisStone)
        .build();

    let outcome = engine.use_treasure(&mut state, TurnContext::new(P0, 1), TreasureId::AegisStone, AWAY);
    assert_eq!(outcome, CastOutcome::Skipped(SkipReason::IllegalTarget));
    assert!(state.player(P0).unwrap().has_treasure(TreasureId::AegisStone));
}

/// The Powder Keg blasts every army on the land once.
#[test]
fn test_powder_keg_consumed() {
    let engine = engine();
    let mut state = GameStateBuilder::new(2)
        .rng(GameRng::pinned(1.0))
        .land(HOME, Some(P0))
        .land(AWAY, Some(P1))
        .treasure(P0, TreasureId::PowderKeg)
        .army(P1, AWAY, |a| a.with_units(UnitType::Footmen, Rank::Base, 10))
        .build();

    let outcome = engine.use_treasure(&mut state, TurnContext::new(P0, 1), TreasureId::PowderKeg, AWAY);
    let Some(Resolution::Casualties { report, .. }) = outcome.report().map(|r| &r.resolution) else {
        panic!("expected casualties, got {outcome:?}");
    };
    // Max roll: 10 * 20% = 2 loses to the absolute 4.
    assert_eq!(report.lost_by(P1), 4);
    assert_eq!(footmen_at(&state, AWAY), 6);

    let again = engine.use_treasure(&mut state, TurnContext::new(P0, 1), TreasureId::PowderKeg, AWAY);
    assert_eq!(again, CastOutcome::Skipped(SkipReason::TreasureUnavailable));
    assert_eq!(footmen_at(&state, AWAY), 6);
}

/// Dragon Scale softens the Powder Keg for its holder.
#[test]
fn test_dragon_scale_reduces_keg_damage() {
    let engine = engine();
    let mut state = GameStateBuilder::new(2)
        .rng(GameRng::pinned(1.0))
        .land(HOME, Some(P0))
        .land(AWAY, Some(P1))
        .treasure(P0, TreasureId::PowderKeg)
        .treasure(P1, TreasureId::DragonScale)
        .army(P1, AWAY, |a| a.with_units(UnitType::Footmen, Rank::Base, 10))
        .build();

    engine.use_treasure(&mut state, TurnContext::new(P0, 1), TreasureId::PowderKeg, AWAY);

    // 4 * (1 - 0.35) = 2.6, rounded up.
    assert_eq!(footmen_at(&state, AWAY), 7);
}

/// Treasures ignore wards and leave them standing.
#[test]
fn test_powder_keg_ignores_ward() {
    let engine = engine();
    let mut state = GameStateBuilder::new(2)
        .rng(GameRng::pinned(1.0))
        .land(HOME, Some(P0))
        .land(AWAY, Some(P1))
        .mana(P1, ManaSchool::Blue, 100)
        .treasure(P0, TreasureId::PowderKeg)
        .army(P1, AWAY, |a| a.with_units(UnitType::Footmen, Rank::Base, 10))
        .build();
    engine.cast(&mut state, TurnContext::new(P1, 1), &CastRequest::new(SpellId::ArcaneWard).at(AWAY));

    let outcome = engine.use_treasure(&mut state, TurnContext::new(P0, 2), TreasureId::PowderKeg, AWAY);

    assert!(outcome.is_applied());
    assert_eq!(footmen_at(&state, AWAY), 6);
    assert!(state.land(AWAY).unwrap().effects.ward().is_some());
}

/// The Seeing Orb marks an opponent's land and stays with its holder.
#[test]
fn test_seeing_orb_reusable() {
    let engine = engine();
    let mut state = GameStateBuilder::new(2)
        .land(HOME, Some(P0))
        .land(AWAY, Some(P1))
        .mana(P0, ManaSchool::Blue, 40)
        .treasure(P0, TreasureId::SeeingOrb)
        .build();

    let outcome = engine.use_treasure(&mut state, TurnContext::new(P0, 1), TreasureId::SeeingOrb, AWAY);
    assert_eq!(outcome.mana_charged(), 0);
    assert_eq!(state.mana(P0, ManaSchool::Blue), 40);
    assert!(state.player(P0).unwrap().has_treasure(TreasureId::SeeingOrb));

    let effect = state.land(AWAY).unwrap().effects.iter().next().cloned().unwrap();
    assert_eq!(effect.kind, EffectKind::Negative);
    assert_eq!(effect.duration, 2);
    assert_eq!(effect.applied_by, P0);

    assert_eq!(
        engine
            .use_treasure(&mut state, TurnContext::new(P0, 1), TreasureId::SeeingOrb, HOME)
            .skip_reason(),
        Some(SkipReason::IllegalTarget)
    );
}

/// A consumable whose effect never lands stays with its holder.
#[test]
fn test_consumable_kept_when_nothing_stamped() {
    let mut catalog = TreasureCatalog::new();
    catalog
        .register(
            Treasure::invocable(TreasureId::AegisStone, TargetScope::Caster)
                .with_effect(EffectTemplate::positive(EffectScope::Land, 0))
                .consumable(),
        )
        .unwrap();
    let engine = engine().with_treasures(catalog);
    let mut state = GameStateBuilder::new(2)
        .land(HOME, Some(P0))
        .treasure(P0, TreasureId::AegisStone)
        .build();

    let outcome = engine.use_treasure(&mut state, TurnContext::new(P0, 1), TreasureId::AegisStone, HOME);

    assert!(outcome.is_applied());
    assert_eq!(
        outcome.report().map(|r| &r.resolution),
        Some(&Resolution::Stamped(Vec::new()))
    );
    assert!(state.land(HOME).unwrap().effects.is_empty());
    assert!(state.player(P0).unwrap().has_treasure(TreasureId::AegisStone));
}

/// Passive and missing treasures cannot be invoked.
#[test]
fn test_unavailable_treasures() {
    let engine = engine();
    let mut state = GameStateBuilder::new(2)
        .land(HOME, Some(P0))
        .land(AWAY, Some(P1))
        .treasure(P0, TreasureId::DragonScale)
        .build();

    for treasure in [TreasureId::DragonScale, TreasureId::PowderKeg] {
        let outcome = engine.use_treasure(&mut state, TurnContext::new(P0, 1), treasure, AWAY);
        assert_eq!(outcome, CastOutcome::Skipped(SkipReason::TreasureUnavailable), "{treasure}");
    }
}
