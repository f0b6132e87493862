//! Mana schools and per-player mana pools.

use serde::{Deserialize, Serialize};

use super::army::HeroKind;

/// One of the five independent magic resource types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ManaSchool {
    White,
    Green,
    Blue,
    Red,
    Black,
}

impl ManaSchool {
    /// All schools in pool order.
    pub const ALL: [ManaSchool; 5] = [
        ManaSchool::White,
        ManaSchool::Green,
        ManaSchool::Blue,
        ManaSchool::Red,
        ManaSchool::Black,
    ];

    /// Slot of this school in a `ManaPool`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ManaSchool::White => 0,
            ManaSchool::Green => 1,
            ManaSchool::Blue => 2,
            ManaSchool::Red => 3,
            ManaSchool::Black => 4,
        }
    }

    /// The hero type whose level drives proficiency for this school.
    #[must_use]
    pub const fn hero_kind(self) -> HeroKind {
        match self {
            ManaSchool::White => HeroKind::Priest,
            ManaSchool::Green => HeroKind::Druid,
            ManaSchool::Blue => HeroKind::Wizard,
            ManaSchool::Red => HeroKind::Sorcerer,
            ManaSchool::Black => HeroKind::Necromancer,
        }
    }
}

/// Five non-negative mana counters.
///
/// The cap lives in `EngineConfig` and is passed to `add`; counters never
/// exceed it and never drop below zero.
///
/// ```
/// use realm_magic::world::{ManaPool, ManaSchool};
///
/// let mut pool = ManaPool::new().with(ManaSchool::Red, 80);
/// assert_eq!(pool.add(ManaSchool::Red, 50, 100), 20);
/// assert_eq!(pool.get(ManaSchool::Red), 100);
/// assert_eq!(pool.spend(ManaSchool::Red, 30), 0);
/// assert_eq!(pool.get(ManaSchool::Red), 70);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaPool {
    counters: [u32; 5],
}

impl ManaPool {
    /// Create an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self { counters: [0; 5] }
    }

    /// Set one counter (builder pattern, uncapped).
    #[must_use]
    pub const fn with(mut self, school: ManaSchool, amount: u32) -> Self {
        self.counters[school.index()] = amount;
        self
    }

    /// Current amount of one school.
    #[must_use]
    pub const fn get(&self, school: ManaSchool) -> u32 {
        self.counters[school.index()]
    }

    /// Add mana up to `cap`. Returns the amount actually added.
    pub fn add(&mut self, school: ManaSchool, amount: u32, cap: u32) -> u32 {
        let slot = &mut self.counters[school.index()];
        let before = *slot;
        *slot = before.saturating_add(amount).min(cap.max(before));
        *slot - before
    }

    /// Subtract mana, saturating at zero. Returns the shortfall (0 when the
    /// pool could cover the amount).
    pub fn spend(&mut self, school: ManaSchool, amount: u32) -> u32 {
        let slot = &mut self.counters[school.index()];
        let shortfall = amount.saturating_sub(*slot);
        *slot = slot.saturating_sub(amount);
        shortfall
    }

    /// Check whether the pool holds at least `amount` of `school`.
    #[must_use]
    pub const fn can_afford(&self, school: ManaSchool, amount: u32) -> bool {
        self.counters[school.index()] >= amount
    }
}
