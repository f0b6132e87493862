//! Turn-start effect decay.
//!
//! Once per turn boundary every ledger the turn owner can reach is aged by
//! one turn. Which effects age is decided per effect by
//! [`Effect::ages_on_turn_of`]: caster-turn effects age when the turn owner
//! applied them, every-turn effects age when the turn owner owns the
//! holder, permanent effects never age.

use tracing::instrument;

use crate::core::{GameState, TurnContext};

use super::effect::{Effect, EffectLedger, LedgerAging};

/// What one decay pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecayReport {
    /// Effects whose duration went down by one.
    pub decremented: usize,
    /// Effects removed because they expired.
    pub expired: Vec<Effect>,
    /// True when this turn had already been decayed and nothing changed.
    pub skipped: bool,
}

impl DecayReport {
    fn absorb(&mut self, aging: LedgerAging) {
        self.decremented += aging.decremented;
        self.expired.extend(aging.expired);
    }
}

fn age_ledger(ledger: &mut EffectLedger, turn: TurnContext, holder_owned: bool) -> LedgerAging {
    ledger.age(|e| e.ages_on_turn_of(turn.turn_owner, holder_owned))
}

/// Age every reachable effect at the start of `turn`.
///
/// Covers the turn owner's own ledger, every land and army ledger, and every
/// other player's ledger. Each realm ages at most once per turn number: a
/// call for a turn number the owner has already reached is a no-op that
/// reports `skipped`, even when other realms' turns came in between.
#[instrument(skip_all, name = "decay", fields(owner = %turn.turn_owner, turn = turn.turn_number))]
pub fn decay_turn_effects(state: &mut GameState, turn: TurnContext) -> DecayReport {
    let mut report = DecayReport::default();
    if state
        .last_decay(turn.turn_owner)
        .is_some_and(|last| last >= turn.turn_number)
    {
        log::warn!(
            "effects of {} already aged for turn {}",
            turn.turn_owner,
            turn.turn_number
        );
        report.skipped = true;
        return report;
    }

    for (id, player) in state.players_mut() {
        report.absorb(age_ledger(&mut player.effects, turn, id == turn.turn_owner));
    }

    for position in state.land_positions() {
        if let Some(land) = state.land_mut(position) {
            let owned = land.is_owned_by(turn.turn_owner);
            report.absorb(age_ledger(&mut land.effects, turn, owned));
        }
    }

    for id in state.army_ids() {
        if let Some(army) = state.army_mut(id) {
            let owned = army.owner == turn.turn_owner;
            report.absorb(age_ledger(&mut army.effects, turn, owned));
        }
    }

    state.mark_decayed(turn.turn_number, turn.turn_owner);

    log::debug!(
        "aged {} effects, {} expired",
        report.decremented,
        report.expired.len()
    );
    report
}
