//! Player records: mana, treasury, lands, treasures and diplomacy.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::mana::ManaPool;
use crate::core::{LandPosition, PlayerId};
use crate::effects::EffectLedger;
use crate::treasures::TreasureId;

/// A realm's moral alignment; drives the mana conversion table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Lawful,
    #[default]
    Neutral,
    Chaotic,
}

/// Standing of one player toward another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diplomacy {
    War,
    #[default]
    Peace,
    Alliance,
}

/// State of one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub alignment: Alignment,
    pub mana: ManaPool,
    pub gold: u32,
    /// Kept in sync with `Land::owner` by `GameState`.
    pub lands: OrdSet<LandPosition>,
    #[serde(default)]
    pub effects: EffectLedger,
    pub treasures: Vec<TreasureId>,
    /// Indexed by the other player's index; the own slot is unused.
    pub diplomacy: Vec<Diplomacy>,
}

impl Player {
    /// Create a player at peace with all `player_count` players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            alignment: Alignment::default(),
            mana: ManaPool::new(),
            gold: 0,
            lands: OrdSet::new(),
            effects: EffectLedger::new(),
            treasures: Vec::new(),
            diplomacy: vec![Diplomacy::default(); player_count],
        }
    }

    /// Standing toward `other` (peace when unknown).
    #[must_use]
    pub fn stance_toward(&self, other: PlayerId) -> Diplomacy {
        self.diplomacy
            .get(other.index())
            .copied()
            .unwrap_or_default()
    }

    /// Check whether the player holds a treasure.
    #[must_use]
    pub fn has_treasure(&self, treasure: TreasureId) -> bool {
        self.treasures.contains(&treasure)
    }

    /// Remove one copy of a treasure. Returns true if one was held.
    pub fn take_treasure(&mut self, treasure: TreasureId) -> bool {
        match self.treasures.iter().position(|&t| t == treasure) {
            Some(idx) => {
                self.treasures.remove(idx);
                true
            }
            None => false,
        }
    }
}
