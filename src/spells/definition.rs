//! Spell definitions - immutable catalog entries.
//!
//! A `Spell` carries its school, cost and target scope, optional effect and
//! penalty templates, and the `SpellBehavior` that resolves it.

use serde::{Deserialize, Serialize};

use super::behavior::SpellBehavior;
use super::penalty::PenaltyTemplate;
use crate::effects::{EffectKind, EffectTemplate};
use crate::world::ManaSchool;

/// Identifier of every spell in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpellId {
    // White
    Bless,
    TurnUndead,
    Purify,
    // Green
    Concealment,
    Teleport,
    FertileFields,
    // Blue
    ExchangeMana,
    ArcaneWard,
    RevealTerritory,
    // Red
    Tornado,
    Earthquake,
    MeteorStorm,
    Berserk,
    // Black
    SummonUndead,
    ForcedRecruitment,
    Blight,
    Fear,
}

impl std::fmt::Display for SpellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Whose lands a spell may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetScope {
    /// The caster's own lands.
    Caster,
    /// Lands of players the caster is not allied with.
    Opponent,
    /// Any land.
    AllPlayers,
}

/// Static spell definition.
///
/// ```
/// use realm_magic::spells::{Spell, SpellBehavior, SpellId, TargetScope};
/// use realm_magic::world::ManaSchool;
///
/// let spell = Spell::new(SpellId::Tornado, ManaSchool::Red, 45, TargetScope::Opponent, SpellBehavior::Pending)
///     .harmful();
/// assert!(spell.is_harmful());
/// assert!(spell.needs_land_target());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub id: SpellId,
    pub school: ManaSchool,
    pub cost: u32,
    pub scope: TargetScope,
    /// Hostile without a negative effect template (damage and pending
    /// spells). See `is_harmful`.
    pub harmful: bool,
    /// Only lands where the caster has an army are legal targets.
    pub requires_own_army: bool,
    pub effect: Option<EffectTemplate>,
    pub penalty: Option<PenaltyTemplate>,
    pub behavior: SpellBehavior,
}

impl Spell {
    /// Create a spell with no templates.
    #[must_use]
    pub fn new(
        id: SpellId,
        school: ManaSchool,
        cost: u32,
        scope: TargetScope,
        behavior: SpellBehavior,
    ) -> Self {
        Self {
            id,
            school,
            cost,
            scope,
            harmful: false,
            requires_own_army: false,
            effect: None,
            penalty: None,
            behavior,
        }
    }

    /// Attach an effect template (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, template: EffectTemplate) -> Self {
        self.effect = Some(template);
        self
    }

    /// Attach a penalty template (builder pattern).
    #[must_use]
    pub fn with_penalty(mut self, penalty: PenaltyTemplate) -> Self {
        self.penalty = Some(penalty);
        self
    }

    /// Mark a templateless spell as hostile (builder pattern).
    #[must_use]
    pub fn harmful(mut self) -> Self {
        self.harmful = true;
        self
    }

    /// Restrict targets to lands holding one of the caster's armies.
    #[must_use]
    pub fn requiring_own_army(mut self) -> Self {
        self.requires_own_army = true;
        self
    }

    /// Hostile spells are blocked by wards on the target land. Any spell
    /// stamping a negative effect is hostile, whatever its flag says.
    #[must_use]
    pub fn is_harmful(&self) -> bool {
        self.harmful || self.effect.is_some_and(|e| e.kind == EffectKind::Negative)
    }

    /// False for spells resolved without a land (mana exchange).
    #[must_use]
    pub fn needs_land_target(&self) -> bool {
        !matches!(self.behavior, SpellBehavior::ExchangeMana)
    }
}
