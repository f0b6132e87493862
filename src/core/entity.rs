//! Identifiers for simulation objects.
//!
//! Effects and armies are allocated sequential ids by `GameState`; lands are
//! keyed by their grid position.
//!
//! ```
//! use realm_magic::core::{ArmyId, EffectId, LandPosition};
//!
//! let effect = EffectId::new(7);
//! assert_eq!(effect.raw(), 7);
//!
//! let land = LandPosition::new(2, 3);
//! assert_eq!(format!("{}", land), "Land(2,3)");
//! assert_eq!(ArmyId::new(1).next(), ArmyId::new(2));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of one effect instance.
///
/// Never reused within a game, so an id found in one ledger identifies
/// exactly one stamping of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u32);

impl EffectId {
    /// Create an effect ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}

/// Unique identifier of a unit group (army).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArmyId(pub u32);

impl ArmyId {
    /// Create an army ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id allocated right after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for ArmyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Army({})", self.0)
    }
}

/// Grid position of a land tile (offset coordinates).
///
/// Ordering is row-major so iteration over lands is deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LandPosition {
    /// Row index.
    pub row: i32,
    /// Column index.
    pub col: i32,
}

impl LandPosition {
    /// Create a land position.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for LandPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Land({},{})", self.row, self.col)
    }
}

impl From<(i32, i32)> for LandPosition {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}
