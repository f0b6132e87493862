//! Stamping effects from catalog templates.

use crate::core::{EffectError, GameState, PlayerId};
use crate::spells::SpellCatalog;
use crate::treasures::TreasureCatalog;

use super::effect::{Effect, EffectSource, EffectTemplate};

/// Creates effects from the templates of spells and treasures.
#[derive(Clone, Copy, Debug)]
pub struct EffectFactory<'a> {
    spells: &'a SpellCatalog,
    treasures: &'a TreasureCatalog,
}

impl<'a> EffectFactory<'a> {
    #[must_use]
    pub fn new(spells: &'a SpellCatalog, treasures: &'a TreasureCatalog) -> Self {
        Self { spells, treasures }
    }

    /// The template stamped by `source`.
    pub fn template(&self, source: EffectSource) -> Result<&'a EffectTemplate, EffectError> {
        let template = match source {
            EffectSource::Spell(id) => self
                .spells
                .get(id)
                .ok_or(EffectError::UnknownSource(source))?
                .effect
                .as_ref(),
            EffectSource::Treasure(id) => self
                .treasures
                .get(id)
                .ok_or(EffectError::UnknownSource(source))?
                .effect
                .as_ref(),
        };
        template.ok_or(EffectError::NoTemplate(source))
    }

    /// Stamp a new effect with a fresh id.
    ///
    /// The effect is returned, not attached; callers insert it into the
    /// ledger of the entity it targets.
    pub fn create(
        &self,
        state: &mut GameState,
        source: EffectSource,
        applied_by: PlayerId,
    ) -> Result<Effect, EffectError> {
        let template = self.template(source)?;
        Ok(Self::stamp(state, source, template, applied_by))
    }

    /// Stamp `template` with a fresh id, for callers that already looked the
    /// template up.
    pub fn stamp(
        state: &mut GameState,
        source: EffectSource,
        template: &EffectTemplate,
        applied_by: PlayerId,
    ) -> Effect {
        let id = state.alloc_effect_id();
        log::trace!("stamping {} from {} for {}", id, source, applied_by);
        Effect::from_template(id, source, template, applied_by)
    }
}
