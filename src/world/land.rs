//! Land tiles: ownership, corruption, yield and building slots.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{LandPosition, PlayerId};
use crate::effects::EffectLedger;

/// Buildings that can occupy a land's slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Farm,
    Mine,
    Barracks,
    Temple,
    Tower,
}

/// One land tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Land {
    pub position: LandPosition,
    /// `None` for unowned land.
    pub owner: Option<PlayerId>,
    pub corrupted: bool,
    pub gold_yield: u32,
    pub buildings: SmallVec<[BuildingKind; 4]>,
    #[serde(default)]
    pub effects: EffectLedger,
}

impl Land {
    /// Create an unowned, empty land.
    #[must_use]
    pub fn new(position: LandPosition) -> Self {
        Self {
            position,
            owner: None,
            corrupted: false,
            gold_yield: 0,
            buildings: SmallVec::new(),
            effects: EffectLedger::new(),
        }
    }

    /// Set the owner (builder pattern).
    ///
    /// Use `GameState::set_land_owner` on lands already in a state so the
    /// owner's land set stays in sync.
    #[must_use]
    pub fn owned_by(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Add a building (builder pattern).
    #[must_use]
    pub fn with_building(mut self, building: BuildingKind) -> Self {
        self.buildings.push(building);
        self
    }

    /// Set the gold yield (builder pattern).
    #[must_use]
    pub fn with_gold_yield(mut self, gold: u32) -> Self {
        self.gold_yield = gold;
        self
    }

    /// Check ownership.
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Remove the building in `slot`, if any.
    pub fn destroy_building(&mut self, slot: usize) -> Option<BuildingKind> {
        (slot < self.buildings.len()).then(|| self.buildings.remove(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let land = Land::new(LandPosition::new(1, 1))
            .owned_by(PlayerId::new(2))
            .with_gold_yield(12)
            .with_building(BuildingKind::Farm);

        assert!(land.is_owned_by(PlayerId::new(2)));
        assert!(!land.is_owned_by(PlayerId::new(0)));
        assert_eq!(land.gold_yield, 12);
        assert_eq!(land.buildings.as_slice(), &[BuildingKind::Farm]);
        assert!(!land.corrupted);
    }

    #[test]
    fn test_destroy_building() {
        let mut land = Land::new(LandPosition::new(0, 0))
            .with_building(BuildingKind::Mine)
            .with_building(BuildingKind::Tower);

        assert_eq!(land.destroy_building(1), Some(BuildingKind::Tower));
        assert_eq!(land.destroy_building(1), None);
        assert_eq!(land.buildings.len(), 1);
    }
}
