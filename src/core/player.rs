//! Realm identification and per-realm storage.
//!
//! `PlayerId` is a 0-based realm index (at most 255 realms). `PlayerMap`
//! holds one slot per realm in a `Vec`, so lookups are O(1) and iteration
//! follows turn order.

use serde::{Deserialize, Serialize};

/// Index of a realm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Slot of this realm in per-player vectors such as diplomacy tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per realm, in turn order.
///
/// ```
/// use realm_magic::core::{PlayerId, PlayerMap};
///
/// let mut gold: PlayerMap<u32> = PlayerMap::new(2, |_| 100);
/// if let Some(g) = gold.get_mut(PlayerId::new(1)) {
///     *g -= 40;
/// }
/// assert_eq!(gold.get(PlayerId::new(1)), Some(&60));
/// assert_eq!(gold.get(PlayerId::new(2)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    slots: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Fill one slot per realm from `factory`.
    ///
    /// Panics on zero realms or more than 255; `EngineConfig::validate`
    /// rejects both before a state is built.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "a game needs at least one realm");
        assert!(player_count <= 255, "at most 255 realms are supported");

        Self {
            slots: (0..player_count as u8).map(|i| factory(PlayerId(i))).collect(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.slots.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.slots.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.slots.get_mut(player.index())
    }

    /// Realms with their values, in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}
