//! Test helpers for assembling worlds.
//!
//! `GameStateBuilder` sets up lands, armies, mana and treasures in a few
//! lines so engine tests can focus on the cast under test.

use crate::core::{ArmyId, GameRng, GameState, LandPosition, PlayerId};
use crate::treasures::TreasureId;
use crate::world::{Alignment, Army, Diplomacy, Land, ManaSchool};

/// Builder for test worlds.
///
/// ```
/// use realm_magic::core::{LandPosition, PlayerId};
/// use realm_magic::testing::GameStateBuilder;
/// use realm_magic::world::{ManaSchool, Rank, UnitType};
///
/// let p0 = PlayerId::new(0);
/// let pos = LandPosition::new(1, 1);
/// let state = GameStateBuilder::new(2)
///     .land(pos, Some(p0))
///     .mana(p0, ManaSchool::Red, 120)
///     .army(p0, pos, |a| a.with_units(UnitType::Footmen, Rank::Base, 10))
///     .build();
///
/// assert_eq!(state.mana(p0, ManaSchool::Red), 120);
/// assert_eq!(state.armies_at(pos, None).len(), 1);
/// ```
pub struct GameStateBuilder {
    player_count: usize,
    rng: GameRng,
    lands: Vec<Land>,
    armies: Vec<Army>,
    mana: Vec<(PlayerId, ManaSchool, u32)>,
    alignments: Vec<(PlayerId, Alignment)>,
    treasures: Vec<(PlayerId, TreasureId)>,
    stances: Vec<(PlayerId, PlayerId, Diplomacy)>,
}

impl GameStateBuilder {
    /// Start a world for `player_count` players with seed 42.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            rng: GameRng::new(42),
            lands: Vec::new(),
            armies: Vec::new(),
            mana: Vec::new(),
            alignments: Vec::new(),
            treasures: Vec::new(),
            stances: Vec::new(),
        }
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = GameRng::new(seed);
        self
    }

    /// Use a specific random source, e.g. `GameRng::pinned(1.0)`.
    #[must_use]
    pub fn rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    /// Add a plain land.
    #[must_use]
    pub fn land(self, position: LandPosition, owner: Option<PlayerId>) -> Self {
        let land = Land::new(position);
        self.land_with(match owner {
            Some(owner) => land.owned_by(owner),
            None => land,
        })
    }

    /// Add a fully specified land.
    #[must_use]
    pub fn land_with(mut self, land: Land) -> Self {
        self.lands.push(land);
        self
    }

    /// Add an army shaped by `build`.
    #[must_use]
    pub fn army(
        mut self,
        owner: PlayerId,
        position: LandPosition,
        build: impl FnOnce(Army) -> Army,
    ) -> Self {
        self.armies
            .push(build(Army::new(ArmyId::new(0), owner, position)));
        self
    }

    /// Set one mana counter.
    #[must_use]
    pub fn mana(mut self, player: PlayerId, school: ManaSchool, amount: u32) -> Self {
        self.mana.push((player, school, amount));
        self
    }

    #[must_use]
    pub fn alignment(mut self, player: PlayerId, alignment: Alignment) -> Self {
        self.alignments.push((player, alignment));
        self
    }

    /// Give a treasure.
    #[must_use]
    pub fn treasure(mut self, player: PlayerId, treasure: TreasureId) -> Self {
        self.treasures.push((player, treasure));
        self
    }

    /// Set a mutual diplomatic stance.
    #[must_use]
    pub fn stance(mut self, a: PlayerId, b: PlayerId, stance: Diplomacy) -> Self {
        self.stances.push((a, b, stance));
        self
    }

    /// Build the state.
    #[must_use]
    pub fn build(self) -> GameState {
        let mut state = GameState::with_rng(self.player_count, self.rng);

        for land in self.lands {
            state.insert_land(land);
        }
        for army in self.armies {
            state.add_army(army);
        }
        for (player, school, amount) in self.mana {
            if let Some(p) = state.player_mut(player) {
                p.mana = p.mana.with(school, amount);
            }
        }
        for (player, alignment) in self.alignments {
            if let Some(p) = state.player_mut(player) {
                p.alignment = alignment;
            }
        }
        for (player, treasure) in self.treasures {
            if let Some(p) = state.player_mut(player) {
                p.treasures.push(treasure);
            }
        }
        for (a, b, stance) in self.stances {
            for (from, to) in [(a, b), (b, a)] {
                if let Some(slot) = state
                    .player_mut(from)
                    .and_then(|p| p.diplomacy.get_mut(to.index()))
                {
                    *slot = stance;
                }
            }
        }
        state
    }
}
