//! Unit groups (armies): regular unit stacks, heroes and movement.
//!
//! An army belongs to exactly one player and stands on one land. It is
//! removed from the simulation once it holds neither regulars nor heroes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ArmyId, LandPosition, PlayerId};
use crate::effects::EffectLedger;

/// Regular unit types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Footmen,
    Archers,
    Pikemen,
    Cavalry,
    Undead,
}

/// Unit quality classification; higher tiers suffer fewer casualties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Base,
    Veteran,
    Elite,
}

impl Rank {
    /// All tiers, weakest first.
    pub const ALL: [Rank; 3] = [Rank::Base, Rank::Veteran, Rank::Elite];
}

/// A count of regular units of one type and tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitStack {
    pub unit: UnitType,
    pub rank: Rank,
    pub count: u32,
}

impl UnitStack {
    /// Create a unit stack.
    #[must_use]
    pub const fn new(unit: UnitType, rank: Rank, count: u32) -> Self {
        Self { unit, rank, count }
    }
}

/// Hero specialisations, one per mana school.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeroKind {
    Priest,
    Druid,
    Wizard,
    Sorcerer,
    Necromancer,
}

/// A hero unit attached to an army.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hero {
    pub kind: HeroKind,
    pub level: u32,
}

impl Hero {
    /// Create a hero.
    #[must_use]
    pub const fn new(kind: HeroKind, level: u32) -> Self {
        Self { kind, level }
    }
}

/// Whether an army is standing or marching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    #[default]
    Stationary,
    EnRoute { destination: LandPosition },
}

/// A unit group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Army {
    pub id: ArmyId,
    pub owner: PlayerId,
    pub position: LandPosition,
    pub movement: Movement,
    pub regulars: SmallVec<[UnitStack; 4]>,
    pub heroes: SmallVec<[Hero; 2]>,
    #[serde(default)]
    pub effects: EffectLedger,
}

impl Army {
    /// Create an empty stationary army.
    #[must_use]
    pub fn new(id: ArmyId, owner: PlayerId, position: LandPosition) -> Self {
        Self {
            id,
            owner,
            position,
            movement: Movement::Stationary,
            regulars: SmallVec::new(),
            heroes: SmallVec::new(),
            effects: EffectLedger::new(),
        }
    }

    /// Add regular units (builder pattern).
    #[must_use]
    pub fn with_units(mut self, unit: UnitType, rank: Rank, count: u32) -> Self {
        self.add_units(unit, rank, count);
        self
    }

    /// Add a hero (builder pattern).
    #[must_use]
    pub fn with_hero(mut self, hero: Hero) -> Self {
        self.heroes.push(hero);
        self
    }

    /// Set the movement state (builder pattern).
    #[must_use]
    pub fn with_movement(mut self, movement: Movement) -> Self {
        self.movement = movement;
        self
    }

    /// Merge units into the matching stack, or open a new one.
    pub fn add_units(&mut self, unit: UnitType, rank: Rank, count: u32) {
        if count == 0 {
            return;
        }
        match self
            .regulars
            .iter_mut()
            .find(|s| s.unit == unit && s.rank == rank)
        {
            Some(stack) => stack.count += count,
            None => self.regulars.push(UnitStack::new(unit, rank, count)),
        }
    }

    /// Units of one type and tier.
    #[must_use]
    pub fn count_of(&self, unit: UnitType, rank: Rank) -> u32 {
        self.regulars
            .iter()
            .filter(|s| s.unit == unit && s.rank == rank)
            .map(|s| s.count)
            .sum()
    }

    /// Units of one type across all tiers.
    #[must_use]
    pub fn count_of_type(&self, unit: UnitType) -> u32 {
        self.regulars
            .iter()
            .filter(|s| s.unit == unit)
            .map(|s| s.count)
            .sum()
    }

    /// Total regular units.
    #[must_use]
    pub fn regular_count(&self) -> u32 {
        self.regulars.iter().map(|s| s.count).sum()
    }

    /// Drop stacks whose count reached zero.
    pub fn prune_empty_stacks(&mut self) {
        self.regulars.retain(|s| s.count > 0);
    }

    /// True when the army holds no regulars and no heroes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regular_count() == 0 && self.heroes.is_empty()
    }

    /// Highest level among this army's heroes of `kind`.
    #[must_use]
    pub fn best_hero_level(&self, kind: HeroKind) -> Option<u32> {
        self.heroes
            .iter()
            .filter(|h| h.kind == kind)
            .map(|h| h.level)
            .max()
    }

    /// True when the army is not marching.
    #[must_use]
    pub fn is_stationary(&self) -> bool {
        matches!(self.movement, Movement::Stationary)
    }
}
