//! Spell catalog for definition lookup.
//!
//! The `SpellCatalog` stores every spell definition for a game. It provides
//! fast lookup by `SpellId` and iteration in id order.

use rustc_hash::FxHashMap;

use super::behavior::{Destruction, SpellBehavior};
use super::definition::{Spell, SpellId, TargetScope};
use super::penalty::{PenaltyTemplate, TierPenalty};
use crate::core::CatalogError;
use crate::effects::{EffectScope, EffectTemplate};
use crate::world::{ManaSchool, UnitType};

/// TurnUndead base tier.
pub const TURN_UNDEAD_PENALTY: TierPenalty = TierPenalty::new(0.05, 0.1, 1.0, 2.0);
/// Tornado base tier.
pub const TORNADO_PENALTY: TierPenalty = TierPenalty::new(0.2, 0.4, 2.0, 5.0);
/// Earthquake base tier.
pub const EARTHQUAKE_PENALTY: TierPenalty = TierPenalty::new(0.1, 0.25, 1.0, 4.0);
/// MeteorStorm base tier.
pub const METEOR_STORM_PENALTY: TierPenalty = TierPenalty::new(0.25, 0.5, 3.0, 8.0);

/// Registry of spell definitions.
///
/// ## Example
///
/// ```
/// use realm_magic::spells::{SpellCatalog, SpellId};
/// use realm_magic::world::ManaSchool;
///
/// let catalog = SpellCatalog::standard();
/// let tornado = catalog.get(SpellId::Tornado).unwrap();
/// assert_eq!(tornado.school, ManaSchool::Red);
/// assert_eq!(tornado.cost, 45);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpellCatalog {
    spells: FxHashMap<SpellId, Spell>,
}

impl SpellCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The game's built-in spells.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for spell in standard_spells() {
            catalog.spells.insert(spell.id, spell);
        }
        catalog
    }

    /// Register a spell definition.
    ///
    /// Rejects duplicate ids and malformed penalty ranges.
    pub fn register(&mut self, spell: Spell) -> Result<(), CatalogError> {
        if self.spells.contains_key(&spell.id) {
            return Err(CatalogError::DuplicateSpell(spell.id));
        }
        if let Some(penalty) = &spell.penalty {
            penalty.validate()?;
        }
        self.spells.insert(spell.id, spell);
        Ok(())
    }

    /// Get a spell definition by id.
    #[must_use]
    pub fn get(&self, id: SpellId) -> Option<&Spell> {
        self.spells.get(&id)
    }

    /// Check if a spell id is registered.
    #[must_use]
    pub fn contains(&self, id: SpellId) -> bool {
        self.spells.contains_key(&id)
    }

    /// Number of registered spells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spells.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// All definitions, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        let mut spells: Vec<&Spell> = self.spells.values().collect();
        spells.sort_by_key(|s| s.id);
        spells.into_iter()
    }

    /// Spells of one school, ordered by id.
    pub fn by_school(&self, school: ManaSchool) -> impl Iterator<Item = &Spell> {
        self.iter().filter(move |s| s.school == school)
    }
}

fn standard_spells() -> Vec<Spell> {
    use ManaSchool::{Black, Blue, Green, Red, White};
    use TargetScope::{AllPlayers, Caster, Opponent};

    vec![
        // White
        Spell::new(SpellId::Bless, White, 20, Caster, SpellBehavior::StampArea { radius: 1 })
            .with_effect(EffectTemplate::positive(EffectScope::Land, 3)),
        Spell::new(
            SpellId::TurnUndead,
            White,
            30,
            AllPlayers,
            SpellBehavior::Casualties {
                filter: Some(UnitType::Undead),
                destruction: None,
                once_per_owner: true,
            },
        )
        .with_effect(EffectTemplate::negative(EffectScope::Player, 1).every_turn())
        .with_penalty(PenaltyTemplate::from_base(TURN_UNDEAD_PENALTY)),
        Spell::new(SpellId::Purify, White, 25, Caster, SpellBehavior::Purify),
        // Green
        Spell::new(
            SpellId::Concealment,
            Green,
            25,
            Caster,
            SpellBehavior::RandomSpread { radius: 1 },
        )
        .with_effect(EffectTemplate::positive(EffectScope::Land, 3)),
        Spell::new(SpellId::Teleport, Green, 40, AllPlayers, SpellBehavior::Teleport)
            .requiring_own_army(),
        Spell::new(SpellId::FertileFields, Green, 15, Caster, SpellBehavior::Stamp)
            .with_effect(EffectTemplate::positive(EffectScope::Land, 3)),
        // Blue
        Spell::new(SpellId::ExchangeMana, Blue, 100, Caster, SpellBehavior::ExchangeMana),
        Spell::new(SpellId::ArcaneWard, Blue, 35, Caster, SpellBehavior::Stamp)
            .with_effect(EffectTemplate::positive(EffectScope::Land, 5).ward()),
        Spell::new(SpellId::RevealTerritory, Blue, 15, Opponent, SpellBehavior::Stamp)
            .with_effect(EffectTemplate::negative(EffectScope::Land, 2)),
        // Red
        Spell::new(
            SpellId::Tornado,
            Red,
            45,
            Opponent,
            SpellBehavior::Casualties {
                filter: None,
                destruction: None,
                once_per_owner: false,
            },
        )
        .with_penalty(PenaltyTemplate::from_base(TORNADO_PENALTY))
        .harmful(),
        Spell::new(
            SpellId::Earthquake,
            Red,
            60,
            Opponent,
            SpellBehavior::Casualties {
                filter: None,
                destruction: Some(Destruction::Fixed(0.25)),
                once_per_owner: false,
            },
        )
        .with_penalty(PenaltyTemplate::from_base(EARTHQUAKE_PENALTY))
        .harmful(),
        Spell::new(
            SpellId::MeteorStorm,
            Red,
            90,
            Opponent,
            SpellBehavior::Casualties {
                filter: None,
                destruction: Some(Destruction::Scaling {
                    base: 0.3,
                    per_proficiency: 0.4,
                }),
                once_per_owner: false,
            },
        )
        .with_penalty(PenaltyTemplate::from_base(METEOR_STORM_PENALTY))
        .harmful(),
        Spell::new(SpellId::Berserk, Red, 30, Caster, SpellBehavior::Pending),
        // Black
        Spell::new(
            SpellId::SummonUndead,
            Black,
            50,
            Caster,
            SpellBehavior::Spawn {
                unit: UnitType::Undead,
                count: 8,
                scales_with_proficiency: true,
            },
        ),
        Spell::new(
            SpellId::ForcedRecruitment,
            Black,
            30,
            Caster,
            SpellBehavior::Spawn {
                unit: UnitType::Footmen,
                count: 6,
                scales_with_proficiency: false,
            },
        ),
        Spell::new(SpellId::Blight, Black, 35, Opponent, SpellBehavior::Corrupt)
            .with_effect(EffectTemplate::negative(EffectScope::Land, 3)),
        Spell::new(SpellId::Fear, Black, 40, Opponent, SpellBehavior::Pending).harmful(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectKind;

    #[test]
    fn test_standard_catalog_complete() {
        let catalog = SpellCatalog::standard();
        assert_eq!(catalog.len(), 17);

        for school in ManaSchool::ALL {
            assert!(catalog.by_school(school).count() >= 3, "{school:?}");
        }
    }

    #[test]
    fn test_standard_entries_validate() {
        let catalog = SpellCatalog::standard();
        let mut fresh = SpellCatalog::new();
        for spell in catalog.iter() {
            assert_eq!(fresh.register(spell.clone()), Ok(()));
        }
        assert_eq!(fresh.len(), catalog.len());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = SpellCatalog::new();
        let spell = Spell::new(SpellId::Berserk, ManaSchool::Red, 30, TargetScope::Caster, SpellBehavior::Pending);

        assert!(catalog.register(spell.clone()).is_ok());
        assert_eq!(
            catalog.register(spell),
            Err(CatalogError::DuplicateSpell(SpellId::Berserk))
        );
    }

    #[test]
    fn test_malformed_penalty_rejected() {
        let mut catalog = SpellCatalog::new();
        let spell = Spell::new(
            SpellId::Tornado,
            ManaSchool::Red,
            45,
            TargetScope::Opponent,
            SpellBehavior::Pending,
        )
        .with_penalty(PenaltyTemplate::from_base(TierPenalty::new(0.5, 0.2, 1.0, 2.0)));

        assert!(matches!(
            catalog.register(spell),
            Err(CatalogError::InvertedRange { .. })
        ));
        assert!(!catalog.contains(SpellId::Tornado));
    }

    #[test]
    fn test_iteration_is_ordered() {
        let catalog = SpellCatalog::standard();
        let ids: Vec<SpellId> = catalog.iter().map(|s| s.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.first(), Some(&SpellId::Bless));
    }

    #[test]
    fn test_harmful_spells_target_opponents() {
        let catalog = SpellCatalog::standard();
        for spell in catalog.iter().filter(|s| s.harmful) {
            assert_eq!(spell.scope, TargetScope::Opponent, "{}", spell.id);
            assert!(spell.effect.is_none(), "{} is flagged despite its template", spell.id);
        }
    }

    #[test]
    fn test_negative_templates_are_harmful() {
        let catalog = SpellCatalog::standard();
        for spell in catalog.iter() {
            let negative = spell.effect.is_some_and(|e| e.kind == EffectKind::Negative);
            assert_eq!(spell.is_harmful(), negative || spell.harmful, "{}", spell.id);
        }

        let harmful: Vec<SpellId> = catalog
            .iter()
            .filter(|s| s.is_harmful())
            .map(|s| s.id)
            .collect();
        assert_eq!(
            harmful,
            vec![
                SpellId::TurnUndead,
                SpellId::RevealTerritory,
                SpellId::Tornado,
                SpellId::Earthquake,
                SpellId::MeteorStorm,
                SpellId::Blight,
                SpellId::Fear,
            ]
        );
    }

    #[test]
    fn test_pending_spells() {
        let catalog = SpellCatalog::standard();
        let pending: Vec<SpellId> = catalog
            .iter()
            .filter(|s| s.behavior.is_pending())
            .map(|s| s.id)
            .collect();
        assert_eq!(pending, vec![SpellId::Berserk, SpellId::Fear]);
    }
}
