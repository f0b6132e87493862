//! Game state: players, lands, armies and the shared RNG.
//!
//! ## GameState
//!
//! Complete world state the rules engine reads and mutates:
//! - Player records (mana, treasury, treasures, diplomacy)
//! - Lands keyed by position
//! - Armies keyed by id
//! - Id counters, decay marker and RNG
//!
//! Lands and armies use `im` persistent maps so a host can clone the state
//! in O(1) and keep a pre-cast snapshot.
//!
//! The accessors and mutation primitives here are the only way the engine
//! changes the world; they keep `Player::lands` in sync with `Land::owner`.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::entity::{ArmyId, EffectId, LandPosition};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::world::{Army, HeroKind, Land, ManaSchool, Player, Rank, Topology, UnitType};

/// Whose turn it is. Passed explicitly to every engine operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnContext {
    pub turn_owner: PlayerId,
    /// Turn number (starts at 1).
    pub turn_number: u32,
}

impl TurnContext {
    #[must_use]
    pub const fn new(turn_owner: PlayerId, turn_number: u32) -> Self {
        Self {
            turn_owner,
            turn_number,
        }
    }
}

/// Full game state.
#[derive(Clone, Debug)]
pub struct GameState {
    players: PlayerMap<Player>,
    lands: OrdMap<LandPosition, Land>,
    armies: OrdMap<ArmyId, Army>,

    /// Next effect id to allocate.
    next_effect_id: u32,

    /// Next army id to allocate.
    next_army_id: ArmyId,

    /// Last turn number each realm's turn start aged effects.
    last_decay: PlayerMap<Option<u32>>,

    /// Deterministic RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Create an empty world for `player_count` players.
    #[must_use]
    pub fn new(player_count: usize, seed: u64) -> Self {
        Self::with_rng(player_count, GameRng::new(seed))
    }

    /// Create an empty world drawing from `rng`.
    #[must_use]
    pub fn with_rng(player_count: usize, rng: GameRng) -> Self {
        Self {
            players: PlayerMap::new(player_count, |_| Player::new(player_count)),
            lands: OrdMap::new(),
            armies: OrdMap::new(),
            next_effect_id: 1,
            next_army_id: ArmyId::new(1),
            last_decay: PlayerMap::new(player_count, |_| None),
            rng,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    /// Iterate over all players.
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter()
    }

    /// Iterate over all players mutably.
    pub fn players_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut Player)> {
        self.players.iter_mut()
    }

    // === Lands ===

    #[must_use]
    pub fn land(&self, position: LandPosition) -> Option<&Land> {
        self.lands.get(&position)
    }

    pub fn land_mut(&mut self, position: LandPosition) -> Option<&mut Land> {
        self.lands.get_mut(&position)
    }

    /// Iterate over lands in position order.
    pub fn lands(&self) -> impl Iterator<Item = &Land> {
        self.lands.values()
    }

    /// Positions of every land.
    #[must_use]
    pub fn land_positions(&self) -> Vec<LandPosition> {
        self.lands.keys().copied().collect()
    }

    /// Add or replace a land, updating owners' land sets.
    pub fn insert_land(&mut self, land: Land) {
        let position = land.position;
        let owner = land.owner;
        if let Some(previous) = self.lands.insert(position, land) {
            self.unlink_owner(previous.owner, position);
        }
        self.link_owner(owner, position);
    }

    /// Change a land's owner. Returns false if the land does not exist.
    pub fn set_land_owner(&mut self, position: LandPosition, owner: Option<PlayerId>) -> bool {
        let Some(land) = self.lands.get_mut(&position) else {
            return false;
        };
        let previous = std::mem::replace(&mut land.owner, owner);
        self.unlink_owner(previous, position);
        self.link_owner(owner, position);
        true
    }

    fn link_owner(&mut self, owner: Option<PlayerId>, position: LandPosition) {
        if let Some(player) = owner.and_then(|id| self.players.get_mut(id)) {
            player.lands.insert(position);
        }
    }

    fn unlink_owner(&mut self, owner: Option<PlayerId>, position: LandPosition) {
        if let Some(player) = owner.and_then(|id| self.players.get_mut(id)) {
            player.lands.remove(&position);
        }
    }

    /// Lands within `radius` steps of `center` (center included), optionally
    /// restricted to one owner. Ordered by position.
    #[must_use]
    pub fn lands_within(
        &self,
        topology: &dyn Topology,
        center: LandPosition,
        radius: u32,
        owner: Option<PlayerId>,
    ) -> Vec<LandPosition> {
        self.lands
            .values()
            .filter(|land| topology.within(center, land.position, radius))
            .filter(|land| owner.map_or(true, |o| land.is_owned_by(o)))
            .map(|land| land.position)
            .collect()
    }

    // === Armies ===

    #[must_use]
    pub fn army(&self, id: ArmyId) -> Option<&Army> {
        self.armies.get(&id)
    }

    pub fn army_mut(&mut self, id: ArmyId) -> Option<&mut Army> {
        self.armies.get_mut(&id)
    }

    /// Iterate over armies in id order.
    pub fn armies(&self) -> impl Iterator<Item = &Army> {
        self.armies.values()
    }

    /// Ids of every army.
    #[must_use]
    pub fn army_ids(&self) -> Vec<ArmyId> {
        self.armies.keys().copied().collect()
    }

    /// Number of armies in the world.
    #[must_use]
    pub fn army_count(&self) -> usize {
        self.armies.len()
    }

    /// Armies at a position, optionally limited to some owners.
    #[must_use]
    pub fn armies_at(&self, position: LandPosition, owners: Option<&[PlayerId]>) -> Vec<ArmyId> {
        self.armies
            .values()
            .filter(|a| a.position == position)
            .filter(|a| owners.map_or(true, |o| o.contains(&a.owner)))
            .map(|a| a.id)
            .collect()
    }

    /// Add an army under a freshly allocated id, which is returned. The id
    /// carried by `army` is ignored.
    pub fn add_army(&mut self, mut army: Army) -> ArmyId {
        let id = self.next_army_id;
        self.next_army_id = id.next();
        army.id = id;
        self.armies.insert(id, army);
        id
    }

    /// Create an empty stationary army.
    pub fn spawn_army(&mut self, owner: PlayerId, position: LandPosition) -> ArmyId {
        self.add_army(Army::new(ArmyId::new(0), owner, position))
    }

    /// Merge units into `owner`'s first stationary army at `position`, or
    /// raise a new army there. Returns the receiving army.
    pub fn reinforce_or_spawn(
        &mut self,
        owner: PlayerId,
        position: LandPosition,
        unit: UnitType,
        rank: Rank,
        count: u32,
    ) -> ArmyId {
        let existing = self
            .armies
            .values()
            .find(|a| a.owner == owner && a.position == position && a.is_stationary())
            .map(|a| a.id);
        let id = existing.unwrap_or_else(|| self.spawn_army(owner, position));
        if let Some(army) = self.armies.get_mut(&id) {
            army.add_units(unit, rank, count);
        }
        id
    }

    pub fn remove_army(&mut self, id: ArmyId) -> Option<Army> {
        self.armies.remove(&id)
    }

    /// Delete every army with no regulars and no heroes. Returns their ids.
    pub fn remove_empty_armies(&mut self) -> Vec<ArmyId> {
        let empty: Vec<ArmyId> = self
            .armies
            .values()
            .filter(|a| a.is_empty())
            .map(|a| a.id)
            .collect();
        for id in &empty {
            self.armies.remove(id);
        }
        empty
    }

    /// Best level among `player`'s heroes of `kind`, 0 when there are none.
    #[must_use]
    pub fn best_hero_level(&self, player: PlayerId, kind: HeroKind) -> u32 {
        self.armies
            .values()
            .filter(|a| a.owner == player)
            .filter_map(|a| a.best_hero_level(kind))
            .max()
            .unwrap_or(0)
    }

    // === Mana ===

    /// Spend mana, saturating at zero. Returns the shortfall (0 when the
    /// pool covered the amount, and for unknown players).
    pub fn spend_mana(&mut self, player: PlayerId, school: ManaSchool, amount: u32) -> u32 {
        self.players
            .get_mut(player)
            .map_or(0, |p| p.mana.spend(school, amount))
    }

    /// Add mana up to `cap`. Returns the amount actually added.
    pub fn add_mana(&mut self, player: PlayerId, school: ManaSchool, amount: u32, cap: u32) -> u32 {
        self.players
            .get_mut(player)
            .map_or(0, |p| p.mana.add(school, amount, cap))
    }

    /// Current mana of one school.
    #[must_use]
    pub fn mana(&self, player: PlayerId, school: ManaSchool) -> u32 {
        self.players.get(player).map_or(0, |p| p.mana.get(school))
    }

    // === Bookkeeping ===

    /// Allocate a new effect id.
    pub fn alloc_effect_id(&mut self) -> EffectId {
        let id = EffectId::new(self.next_effect_id);
        self.next_effect_id += 1;
        id
    }

    /// Last turn number on which `player`'s turn start aged effects.
    #[must_use]
    pub fn last_decay(&self, player: PlayerId) -> Option<u32> {
        self.last_decay.get(player).copied().flatten()
    }

    pub(crate) fn mark_decayed(&mut self, turn_number: u32, owner: PlayerId) {
        if let Some(slot) = self.last_decay.get_mut(owner) {
            *slot = Some(turn_number);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::HexTopology;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    #[test]
    fn test_game_state_new() {
        let state = GameState::new(3, 42);

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.army_count(), 0);
        assert!(state.player(PlayerId::new(2)).is_some());
        assert!(state.player(PlayerId::new(3)).is_none());
        assert!(state.last_decay(P0).is_none());
        assert!(state.last_decay(PlayerId::new(2)).is_none());
    }

    #[test]
    fn test_insert_land_links_owner() {
        let mut state = GameState::new(2, 42);
        let pos = LandPosition::new(0, 0);

        state.insert_land(Land::new(pos).owned_by(P0));
        assert!(state.player(P0).unwrap().lands.contains(&pos));

        state.insert_land(Land::new(pos).owned_by(P1));
        assert!(!state.player(P0).unwrap().lands.contains(&pos));
        assert!(state.player(P1).unwrap().lands.contains(&pos));
    }

    #[test]
    fn test_set_land_owner() {
        let mut state = GameState::new(2, 42);
        let pos = LandPosition::new(1, 1);
        state.insert_land(Land::new(pos).owned_by(P0));

        assert!(state.set_land_owner(pos, None));
        assert!(state.player(P0).unwrap().lands.is_empty());
        assert_eq!(state.land(pos).unwrap().owner, None);

        assert!(!state.set_land_owner(LandPosition::new(9, 9), Some(P0)));
    }

    #[test]
    fn test_lands_within() {
        let mut state = GameState::new(2, 42);
        let center = LandPosition::new(2, 2);
        state.insert_land(Land::new(center).owned_by(P0));
        state.insert_land(Land::new(LandPosition::new(2, 3)).owned_by(P0));
        state.insert_land(Land::new(LandPosition::new(2, 1)).owned_by(P1));
        state.insert_land(Land::new(LandPosition::new(2, 5)).owned_by(P0));

        let all = state.lands_within(&HexTopology, center, 1, None);
        assert_eq!(all.len(), 3);

        let own = state.lands_within(&HexTopology, center, 1, Some(P0));
        assert_eq!(own, vec![center, LandPosition::new(2, 3)]);
    }

    #[test]
    fn test_army_ids_are_fresh() {
        let mut state = GameState::new(2, 42);
        let pos = LandPosition::new(0, 0);

        let a = state.spawn_army(P0, pos);
        let b = state.add_army(Army::new(ArmyId::new(77), P1, pos));

        assert_ne!(a, b);
        assert_eq!(state.army(b).unwrap().id, b);
        assert_eq!(state.armies_at(pos, None).len(), 2);
        assert_eq!(state.armies_at(pos, Some(&[P1])), vec![b]);
    }

    #[test]
    fn test_reinforce_merges_into_stationary_army() {
        let mut state = GameState::new(2, 42);
        let pos = LandPosition::new(0, 0);
        let first = state.reinforce_or_spawn(P0, pos, UnitType::Footmen, Rank::Base, 4);
        let second = state.reinforce_or_spawn(P0, pos, UnitType::Footmen, Rank::Base, 2);

        assert_eq!(first, second);
        assert_eq!(state.army(first).unwrap().count_of(UnitType::Footmen, Rank::Base), 6);
    }

    #[test]
    fn test_remove_empty_armies() {
        let mut state = GameState::new(2, 42);
        let pos = LandPosition::new(0, 0);
        let empty = state.spawn_army(P0, pos);
        let full = state.add_army(
            Army::new(ArmyId::new(0), P1, pos).with_units(UnitType::Archers, Rank::Elite, 3),
        );

        assert_eq!(state.remove_empty_armies(), vec![empty]);
        assert!(state.army(empty).is_none());
        assert!(state.army(full).is_some());
    }

    #[test]
    fn test_best_hero_level_across_armies() {
        use crate::world::Hero;

        let mut state = GameState::new(2, 42);
        let pos = LandPosition::new(0, 0);
        state.add_army(Army::new(ArmyId::new(0), P0, pos).with_hero(Hero::new(HeroKind::Priest, 3)));
        state.add_army(Army::new(ArmyId::new(0), P0, pos).with_hero(Hero::new(HeroKind::Priest, 7)));
        state.add_army(Army::new(ArmyId::new(0), P1, pos).with_hero(Hero::new(HeroKind::Priest, 9)));

        assert_eq!(state.best_hero_level(P0, HeroKind::Priest), 7);
        assert_eq!(state.best_hero_level(P0, HeroKind::Wizard), 0);
    }

    #[test]
    fn test_mana_primitives() {
        let mut state = GameState::new(2, 42);

        assert_eq!(state.add_mana(P0, ManaSchool::Blue, 150, 100), 100);
        assert_eq!(state.spend_mana(P0, ManaSchool::Blue, 30), 0);
        assert_eq!(state.mana(P0, ManaSchool::Blue), 70);
        assert_eq!(state.spend_mana(P0, ManaSchool::Blue, 100), 30);
        assert_eq!(state.mana(P0, ManaSchool::Blue), 0);
        assert_eq!(state.mana(P1, ManaSchool::Blue), 0);
    }

    #[test]
    fn test_effect_ids_increase() {
        let mut state = GameState::new(2, 42);
        let a = state.alloc_effect_id();
        let b = state.alloc_effect_id();
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = GameState::new(2, 42);
        let pos = LandPosition::new(0, 0);
        state.insert_land(Land::new(pos).owned_by(P0));

        let snapshot = state.clone();
        state.set_land_owner(pos, Some(P1));

        assert!(snapshot.land(pos).unwrap().is_owned_by(P0));
        assert!(state.land(pos).unwrap().is_owned_by(P1));
    }
}
