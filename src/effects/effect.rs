//! Effect definitions and the per-entity effect ledger.
//!
//! An effect is a timed or permanent modifier attached to a player, a land
//! or an army. Effects are stamped from an `EffectTemplate` owned by the
//! spell or treasure that created them.

use serde::{Deserialize, Serialize};

use crate::core::{EffectId, PlayerId};
use crate::spells::SpellId;
use crate::treasures::TreasureId;

/// Polarity of an effect.
///
/// `Permanent` effects never decay; they leave a ledger only when consumed
/// (a ward blocking a hostile spell) or cleared by another spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Positive,
    Negative,
    Permanent,
}

/// Which kind of entity an effect attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectScope {
    Player,
    Land,
    Army,
}

/// Whose turn ages an effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecayRule {
    /// Ages at the start of the applying player's turn.
    #[default]
    CasterTurn,
    /// Ages at the start of the turn of the player owning the holder,
    /// whoever applied it. Used for once-per-turn guards.
    EveryTurn,
}

/// What created an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectSource {
    Spell(SpellId),
    Treasure(TreasureId),
}

impl std::fmt::Display for EffectSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectSource::Spell(id) => write!(f, "Spell({:?})", id),
            EffectSource::Treasure(id) => write!(f, "Treasure({:?})", id),
        }
    }
}

/// Shape stamped onto every effect a source creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectTemplate {
    pub kind: EffectKind,
    pub scope: EffectScope,
    /// Turns the effect lasts; 0 means instantaneous (never stored).
    pub duration: u32,
    pub decay: DecayRule,
    /// Wards cancel one incoming hostile spell and are consumed by it.
    pub ward: bool,
}

impl EffectTemplate {
    /// A beneficial effect lasting `duration` turns.
    #[must_use]
    pub const fn positive(scope: EffectScope, duration: u32) -> Self {
        Self {
            kind: EffectKind::Positive,
            scope,
            duration,
            decay: DecayRule::CasterTurn,
            ward: false,
        }
    }

    /// A harmful effect lasting `duration` turns.
    #[must_use]
    pub const fn negative(scope: EffectScope, duration: u32) -> Self {
        Self {
            kind: EffectKind::Negative,
            scope,
            duration,
            decay: DecayRule::CasterTurn,
            ward: false,
        }
    }

    /// An effect that never decays.
    #[must_use]
    pub const fn permanent(scope: EffectScope) -> Self {
        Self {
            kind: EffectKind::Permanent,
            scope,
            duration: 0,
            decay: DecayRule::CasterTurn,
            ward: false,
        }
    }

    /// Age on the holder-owner's turn regardless of who applied it.
    #[must_use]
    pub const fn every_turn(mut self) -> Self {
        self.decay = DecayRule::EveryTurn;
        self
    }

    /// Mark as a ward.
    #[must_use]
    pub const fn ward(mut self) -> Self {
        self.ward = true;
        self
    }

    /// True when stamping this template leaves something in a ledger.
    #[must_use]
    pub const fn is_lasting(&self) -> bool {
        matches!(self.kind, EffectKind::Permanent) || self.duration > 0
    }
}

/// One effect instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Effect {
    pub id: EffectId,
    pub source: EffectSource,
    pub kind: EffectKind,
    pub scope: EffectScope,
    pub duration: u32,
    /// Player who cast or invoked the source.
    pub applied_by: PlayerId,
    pub decay: DecayRule,
    pub ward: bool,
}

impl Effect {
    /// Stamp a template.
    #[must_use]
    pub fn from_template(
        id: EffectId,
        source: EffectSource,
        template: &EffectTemplate,
        applied_by: PlayerId,
    ) -> Self {
        Self {
            id,
            source,
            kind: template.kind,
            scope: template.scope,
            duration: template.duration,
            applied_by,
            decay: template.decay,
            ward: template.ward,
        }
    }

    /// True for effects that never decay.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.kind == EffectKind::Permanent
    }

    /// True for harmful effects.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.kind == EffectKind::Negative
    }

    /// Whether the start of `turn_owner`'s turn ages this effect.
    ///
    /// `holder_owned` is true when the entity holding the ledger belongs to
    /// `turn_owner`.
    #[must_use]
    pub fn ages_on_turn_of(&self, turn_owner: PlayerId, holder_owned: bool) -> bool {
        if self.is_permanent() {
            return false;
        }
        match self.decay {
            DecayRule::CasterTurn => self.applied_by == turn_owner,
            DecayRule::EveryTurn => holder_owned,
        }
    }
}

/// Outcome of aging one ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerAging {
    /// Effects whose duration went down by one.
    pub decremented: usize,
    /// Effects removed because their duration reached zero.
    pub expired: Vec<Effect>,
}

/// Effects attached to one entity.
///
/// ```
/// use realm_magic::core::{EffectId, PlayerId};
/// use realm_magic::effects::{Effect, EffectLedger, EffectScope, EffectSource, EffectTemplate};
/// use realm_magic::spells::SpellId;
///
/// let template = EffectTemplate::positive(EffectScope::Land, 3);
/// let source = EffectSource::Spell(SpellId::Bless);
///
/// let mut ledger = EffectLedger::new();
/// assert!(ledger.insert(Effect::from_template(EffectId::new(1), source, &template, PlayerId::new(0))));
/// assert!(ledger.has_source(source));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectLedger {
    effects: Vec<Effect>,
}

impl EffectLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an effect. Instantaneous effects (duration 0, not permanent)
    /// are refused and `false` is returned.
    pub fn insert(&mut self, effect: Effect) -> bool {
        if effect.duration == 0 && !effect.is_permanent() {
            return false;
        }
        self.effects.push(effect);
        true
    }

    /// Iterate over effects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    /// Number of stored effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// True when no effect is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Look up an effect by id.
    #[must_use]
    pub fn get(&self, id: EffectId) -> Option<&Effect> {
        self.effects.iter().find(|e| e.id == id)
    }

    /// True when some effect came from `source`.
    #[must_use]
    pub fn has_source(&self, source: EffectSource) -> bool {
        self.effects.iter().any(|e| e.source == source)
    }

    /// First ward in the ledger.
    #[must_use]
    pub fn ward(&self) -> Option<&Effect> {
        self.effects.iter().find(|e| e.ward)
    }

    /// Remove an effect by id.
    pub fn remove(&mut self, id: EffectId) -> Option<Effect> {
        let idx = self.effects.iter().position(|e| e.id == id)?;
        Some(self.effects.remove(idx))
    }

    /// Remove every effect matching `predicate`, returning them.
    pub fn remove_where(&mut self, predicate: impl Fn(&Effect) -> bool) -> Vec<Effect> {
        let (removed, kept): (Vec<Effect>, Vec<Effect>) = std::mem::take(&mut self.effects)
            .into_iter()
            .partition(|e| predicate(e));
        self.effects = kept;
        removed
    }

    /// Decrement every effect selected by `ages` (floored at zero), then drop
    /// the non-permanent ones that reached zero.
    pub fn age(&mut self, ages: impl Fn(&Effect) -> bool) -> LedgerAging {
        let mut report = LedgerAging::default();
        let mut aged = Vec::new();
        for effect in &mut self.effects {
            if effect.is_permanent() || !ages(effect) {
                continue;
            }
            effect.duration = effect.duration.saturating_sub(1);
            report.decremented += 1;
            aged.push(effect.id);
        }
        report.expired =
            self.remove_where(|e| !e.is_permanent() && e.duration == 0 && aged.contains(&e.id));
        report
    }
}
