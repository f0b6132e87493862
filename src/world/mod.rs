//! World model: lands, armies, player records and map topology.
//!
//! These are plain data types. `GameState` owns them and exposes the
//! accessors and mutation primitives the rules engine works through.

pub mod army;
pub mod land;
pub mod mana;
pub mod player;
pub mod topology;

pub use army::{Army, Hero, HeroKind, Movement, Rank, UnitStack, UnitType};
pub use land::{BuildingKind, Land};
pub use mana::{ManaPool, ManaSchool};
pub use player::{Alignment, Diplomacy, Player};
pub use topology::{HexTopology, Topology};
