//! Treasures: passive items and invocable artifacts held by players.
//!
//! A treasure either works passively (damage reduction against casualties)
//! or is invoked on a land, stamping an effect or running the casualty
//! calculator. Consumable treasures leave the holder when invoked.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::CatalogError;
use crate::effects::{EffectScope, EffectTemplate};
use crate::spells::{PenaltyTemplate, TargetScope, TierPenalty};

/// Powder Keg base tier.
pub const POWDER_KEG_PENALTY: TierPenalty = TierPenalty::new(0.1, 0.2, 2.0, 4.0);

/// Identifier of every treasure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TreasureId {
    DragonScale,
    AegisStone,
    SeeingOrb,
    PowderKeg,
}

impl std::fmt::Display for TreasureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Static treasure definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Treasure {
    pub id: TreasureId,
    /// Lands the treasure may be invoked on; `None` for passive items.
    pub scope: Option<TargetScope>,
    pub effect: Option<EffectTemplate>,
    pub penalty: Option<PenaltyTemplate>,
    /// Holder's units take reduced casualties.
    pub damage_reduction: bool,
    pub consumable: bool,
}

impl Treasure {
    /// A passive treasure with no invocation.
    #[must_use]
    pub fn passive(id: TreasureId) -> Self {
        Self {
            id,
            scope: None,
            effect: None,
            penalty: None,
            damage_reduction: false,
            consumable: false,
        }
    }

    /// An invocable treasure aimed at lands in `scope`.
    #[must_use]
    pub fn invocable(id: TreasureId, scope: TargetScope) -> Self {
        Self {
            scope: Some(scope),
            ..Self::passive(id)
        }
    }

    #[must_use]
    pub fn with_effect(mut self, template: EffectTemplate) -> Self {
        self.effect = Some(template);
        self
    }

    #[must_use]
    pub fn with_penalty(mut self, penalty: PenaltyTemplate) -> Self {
        self.penalty = Some(penalty);
        self
    }

    #[must_use]
    pub fn reducing_damage(mut self) -> Self {
        self.damage_reduction = true;
        self
    }

    #[must_use]
    pub fn consumable(mut self) -> Self {
        self.consumable = true;
        self
    }

    /// True if the treasure can be invoked.
    #[must_use]
    pub fn is_invocable(&self) -> bool {
        self.scope.is_some()
    }
}

/// Registry of treasure definitions.
///
/// ```
/// use realm_magic::treasures::{TreasureCatalog, TreasureId};
///
/// let catalog = TreasureCatalog::standard();
/// assert!(catalog.reduces_damage(TreasureId::DragonScale));
/// assert!(!catalog.reduces_damage(TreasureId::PowderKeg));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TreasureCatalog {
    treasures: FxHashMap<TreasureId, Treasure>,
}

impl TreasureCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The game's built-in treasures.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for treasure in [
            Treasure::passive(TreasureId::DragonScale).reducing_damage(),
            Treasure::invocable(TreasureId::AegisStone, TargetScope::Caster)
                .with_effect(EffectTemplate::permanent(EffectScope::Land).ward())
                .consumable(),
            Treasure::invocable(TreasureId::SeeingOrb, TargetScope::Opponent)
                .with_effect(EffectTemplate::negative(EffectScope::Land, 2)),
            Treasure::invocable(TreasureId::PowderKeg, TargetScope::AllPlayers)
                .with_penalty(PenaltyTemplate::from_base(POWDER_KEG_PENALTY))
                .consumable(),
        ] {
            catalog.treasures.insert(treasure.id, treasure);
        }
        catalog
    }

    /// Register a treasure definition.
    pub fn register(&mut self, treasure: Treasure) -> Result<(), CatalogError> {
        if self.treasures.contains_key(&treasure.id) {
            return Err(CatalogError::DuplicateTreasure(treasure.id));
        }
        if let Some(penalty) = &treasure.penalty {
            penalty.validate()?;
        }
        self.treasures.insert(treasure.id, treasure);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: TreasureId) -> Option<&Treasure> {
        self.treasures.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.treasures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.treasures.is_empty()
    }

    /// True if holding `id` reduces casualties.
    #[must_use]
    pub fn reduces_damage(&self, id: TreasureId) -> bool {
        self.get(id).is_some_and(|t| t.damage_reduction)
    }

    /// True if any of `held` reduces casualties.
    #[must_use]
    pub fn any_reduces_damage(&self, held: &[TreasureId]) -> bool {
        held.iter().any(|&id| self.reduces_damage(id))
    }
}
