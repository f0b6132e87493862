//! Effect lifetime across turn boundaries.
//!
//! Effects are stamped by real casts and aged with `MagicEngine::begin_turn`
//! over a multi-player turn order.

use proptest::prelude::*;

use realm_magic::core::{EngineConfig, GameState, LandPosition, PlayerId, TurnContext};
use realm_magic::effects::{
    decay_turn_effects, Effect, EffectFactory, EffectScope, EffectSource, EffectTemplate,
};
use realm_magic::rules::{CastRequest, MagicEngine};
use realm_magic::spells::SpellId;
use realm_magic::testing::GameStateBuilder;
use realm_magic::treasures::TreasureId;
use realm_magic::world::{Land, ManaSchool, Rank, UnitType};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);
const P2: PlayerId = PlayerId::new(2);
const HOME: LandPosition = LandPosition::new(0, 0);
const AWAY: LandPosition = LandPosition::new(0, 4);

fn engine() -> MagicEngine {
    MagicEngine::new(EngineConfig::new(3)).unwrap()
}

fn durations(state: &GameState, pos: LandPosition) -> Vec<(EffectSource, u32)> {
    state
        .land(pos)
        .map(|l| l.effects.iter().map(|e| (e.source, e.duration)).collect())
        .unwrap_or_default()
}

/// A caster's effect only ticks on the caster's own turns, wherever it sits.
#[test]
fn test_reveal_ticks_on_caster_turns() {
    let engine = engine();
    let mut state = GameStateBuilder::new(3)
        .land(HOME, Some(P0))
        .land(AWAY, Some(P1))
        .mana(P0, ManaSchool::Blue, 100)
        .build();
    let reveal = EffectSource::Spell(SpellId::RevealTerritory);

    engine.cast(&mut state, TurnContext::new(P0, 1), &CastRequest::new(SpellId::RevealTerritory).at(AWAY));
    assert_eq!(durations(&state, AWAY), vec![(reveal, 2)]);

    engine.begin_turn(&mut state, TurnContext::new(P1, 1));
    engine.begin_turn(&mut state, TurnContext::new(P2, 1));
    assert_eq!(durations(&state, AWAY), vec![(reveal, 2)]);

    let report = engine.begin_turn(&mut state, TurnContext::new(P0, 2));
    assert_eq!(report.decremented, 1);
    assert_eq!(durations(&state, AWAY), vec![(reveal, 1)]);

    engine.begin_turn(&mut state, TurnContext::new(P1, 2));
    engine.begin_turn(&mut state, TurnContext::new(P2, 2));
    let report = engine.begin_turn(&mut state, TurnContext::new(P0, 3));
    assert_eq!(report.expired.len(), 1);
    assert_eq!(report.expired[0].source, reveal);
    assert!(durations(&state, AWAY).is_empty());
}

/// Aegis Stone wards never decay.
#[test]
fn test_treasure_ward_is_permanent() {
    let engine = engine();
    let mut state = GameStateBuilder::new(3)
        .land(HOME, Some(P0))
        .treasure(P0, TreasureId::AegisStone)
        .build();

    assert!(engine
        .use_treasure(&mut state, TurnContext::new(P0, 1), TreasureId::AegisStone, HOME)
        .is_applied());

    for turn in 2..20 {
        for player in [P0, P1, P2] {
            engine.begin_turn(&mut state, TurnContext::new(player, turn));
        }
    }
    assert!(state.land(HOME).unwrap().effects.ward().is_some());
}

/// Aging the same turn twice changes nothing the second time.
#[test]
fn test_begin_turn_is_idempotent() {
    let engine = engine();
    let mut state = GameStateBuilder::new(3)
        .land(HOME, Some(P0))
        .mana(P0, ManaSchool::Green, 100)
        .build();
    engine.cast(&mut state, TurnContext::new(P0, 1), &CastRequest::new(SpellId::FertileFields).at(HOME));

    let first = engine.begin_turn(&mut state, TurnContext::new(P0, 2));
    let second = engine.begin_turn(&mut state, TurnContext::new(P0, 2));

    assert!(!first.skipped);
    assert_eq!(first.decremented, 1);
    assert!(second.skipped);
    assert_eq!(second.decremented, 0);
    assert_eq!(
        durations(&state, HOME),
        vec![(EffectSource::Spell(SpellId::FertileFields), 2)]
    );
    assert_eq!(state.last_decay(P0), Some(2));
}

/// Replaying a realm's turn after other realms have moved ages nothing.
#[test]
fn test_begin_turn_replay_after_rotation() {
    let engine = engine();
    let mut state = GameStateBuilder::new(3)
        .land(HOME, Some(P0))
        .mana(P0, ManaSchool::Green, 100)
        .build();
    engine.cast(&mut state, TurnContext::new(P0, 1), &CastRequest::new(SpellId::FertileFields).at(HOME));

    assert!(!engine.begin_turn(&mut state, TurnContext::new(P0, 1)).skipped);
    assert!(!engine.begin_turn(&mut state, TurnContext::new(P1, 1)).skipped);
    let replay = engine.begin_turn(&mut state, TurnContext::new(P0, 1));

    assert!(replay.skipped);
    assert_eq!(
        durations(&state, HOME),
        vec![(EffectSource::Spell(SpellId::FertileFields), 2)]
    );
    assert_eq!(state.last_decay(P0), Some(1));
    assert_eq!(state.last_decay(P1), Some(1));
    assert_eq!(state.last_decay(P2), None);
}

/// Army ledgers age along with land and player ledgers.
#[test]
fn test_army_effects_decay() {
    let engine = engine();
    let mut state = GameStateBuilder::new(3)
        .land(HOME, Some(P0))
        .army(P0, HOME, |a| a.with_units(UnitType::Archers, Rank::Veteran, 12))
        .build();
    let army = state.armies_at(HOME, None)[0];

    let factory = EffectFactory::new(engine.spells(), engine.treasures());
    let effect = factory
        .create(&mut state, EffectSource::Spell(SpellId::Bless), P0)
        .unwrap();
    state.army_mut(army).unwrap().effects.insert(effect);

    for turn in 1..=3 {
        engine.begin_turn(&mut state, TurnContext::new(P0, turn));
    }
    assert!(state.army(army).unwrap().effects.is_empty());
}

/// Stamping from a source without a template fails.
#[test]
fn test_factory_rejects_templateless_source() {
    let engine = engine();
    let mut state = engine.new_game(7);
    let factory = EffectFactory::new(engine.spells(), engine.treasures());

    assert!(factory
        .create(&mut state, EffectSource::Spell(SpellId::Tornado), P0)
        .is_err());
    assert!(factory
        .create(&mut state, EffectSource::Treasure(TreasureId::DragonScale), P0)
        .is_err());
}

fn seeded_world(specs: &[(u32, u8, bool)]) -> (GameState, Vec<Effect>) {
    let mut state = GameState::new(3, 11);
    state.insert_land(Land::new(HOME).owned_by(P1));
    let mut stamped = Vec::new();
    for &(duration, applier, permanent) in specs {
        let template = if permanent {
            EffectTemplate::permanent(EffectScope::Land)
        } else {
            EffectTemplate::positive(EffectScope::Land, duration)
        };
        let id = state.alloc_effect_id();
        let effect = Effect::from_template(
            id,
            EffectSource::Spell(SpellId::Bless),
            &template,
            PlayerId::new(applier),
        );
        if let Some(land) = state.land_mut(HOME) {
            if land.effects.insert(effect.clone()) {
                stamped.push(effect);
            }
        }
    }
    (state, stamped)
}

proptest! {
    #[test]
    fn prop_decay_steps_by_one_for_the_caster_only(
        specs in prop::collection::vec((1..6u32, 0..3u8, any::<bool>()), 1..12),
        owner in 0..3u8,
    ) {
        let (mut state, before) = seeded_world(&specs);
        let owner = PlayerId::new(owner);

        decay_turn_effects(&mut state, TurnContext::new(owner, 1));

        let land = state.land(HOME).unwrap();
        for effect in before {
            let after = land.effects.get(effect.id).map(|e| e.duration);
            if effect.is_permanent() {
                prop_assert_eq!(after, Some(effect.duration));
            } else if effect.applied_by == owner {
                let expected = (effect.duration > 1).then(|| effect.duration - 1);
                prop_assert_eq!(after, expected);
            } else {
                prop_assert_eq!(after, Some(effect.duration));
            }
        }
    }

    #[test]
    fn prop_full_rotation_never_increases_durations(
        specs in prop::collection::vec((1..6u32, 0..3u8, any::<bool>()), 1..12),
        rounds in 1..6u32,
    ) {
        let (mut state, before) = seeded_world(&specs);

        for round in 1..=rounds {
            for owner in 0..3u8 {
                decay_turn_effects(&mut state, TurnContext::new(PlayerId::new(owner), round));
            }
        }

        let land = state.land(HOME).unwrap();
        for effect in before {
            match land.effects.get(effect.id) {
                Some(after) if effect.is_permanent() => prop_assert_eq!(after.duration, effect.duration),
                Some(after) => prop_assert_eq!(after.duration, effect.duration - rounds),
                None => prop_assert!(!effect.is_permanent() && effect.duration <= rounds),
            }
        }
    }
}
