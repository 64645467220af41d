//! The encounter protocol between two colliding creatures.
//!
//! One encounter runs three steps for an initiator `A` and a partner `B`:
//!
//! 1. **Propose**: `A` sees a snapshot of `B` and proposes an
//!    [`Interaction`] (default `ignore`).
//! 2. **Respond**: only for `attack` and `mate`, `B` sees a snapshot of
//!    `A` and the proposal and answers (default `ignore`).
//! 3. **Resolve** on `A`'s proposal: eat, mate, attack or a pointless
//!    defend. Everything else has no effect.
//!
//! The encounter only runs when both creatures are awake or asleep and
//! `A` passes the responsiveness gate.

use rust_decimal::Decimal;
use tracing::warn;

use creatures_ledger::TransferReason;
use creatures_types::{
    AgentState, CreatureId, EventCategory, HistoryRecord, Interaction, InteractionKind, Vec2,
};

use crate::battle;
use crate::behavior::absorb_fault;
use crate::error::AgentError;
use crate::registry::EntityRegistry;
use crate::scope::TickScope;

/// What an encounter came to, for callers and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncounterOutcome {
    /// One side was not awake or asleep, or has gone.
    Skipped,
    /// The initiator failed the responsiveness gate.
    Unresponsive,
    /// The proposal was resolved.
    Resolved {
        /// What the initiator proposed.
        proposal: Interaction,
        /// What the partner answered (`ignore` when not asked).
        response: Interaction,
    },
}

/// Run one encounter of `initiator` with `other`.
pub fn run_encounter(
    scope: &mut TickScope<'_>,
    registry: &mut EntityRegistry,
    initiator: CreatureId,
    other: CreatureId,
) -> Result<EncounterOutcome, AgentError> {
    let Some((a, b)) = registry.pair_mut(initiator, other) else {
        return Ok(EncounterOutcome::Skipped);
    };
    if !a.state.is_live() || !b.state.is_live() {
        return Ok(EncounterOutcome::Skipped);
    }
    if !scope.is_responsive(&a.state) {
        return Ok(EncounterOutcome::Unresponsive);
    }

    let b_view = b.state.snapshot();
    let proposed = a
        .behavior
        .propose_interaction(&mut scope.hook(), &a.state, &b_view);
    let proposal = absorb_fault(proposed, &a.state, "propose_interaction").unwrap_or_default();
    a.state.last_interaction = Some(proposal.clone());

    let response = if proposal.action.invites_response() {
        let a_view = a.state.snapshot();
        let answered =
            b.behavior
                .respond_to_interaction(&mut scope.hook(), &b.state, &a_view, &proposal);
        let response =
            absorb_fault(answered, &b.state, "respond_to_interaction").unwrap_or_default();
        b.state.last_interaction = Some(response.clone());
        response
    } else {
        Interaction::ignore()
    };

    match proposal.action {
        InteractionKind::Eat => eat(scope, registry, initiator, other)?,
        InteractionKind::Mate => mate(scope, registry, initiator, other, &response)?,
        InteractionKind::Attack => attack(scope, registry, initiator, &proposal, other, &response)?,
        InteractionKind::Defend => pointless_defense(scope, registry, initiator, &proposal, other)?,
        InteractionKind::Ignore
        | InteractionKind::Look
        | InteractionKind::Sleep
        | InteractionKind::Move => {}
    }

    Ok(EncounterOutcome::Resolved { proposal, response })
}

// ---------------------------------------------------------------------------
// Eat
// ---------------------------------------------------------------------------

fn eat(
    scope: &mut TickScope<'_>,
    registry: &mut EntityRegistry,
    eater_id: CreatureId,
    eaten_id: CreatureId,
) -> Result<(), AgentError> {
    let (eater, eaten) = registry.require_pair_mut(eater_id, eaten_id)?;

    if eaten_id != scope.sink {
        eater.state.motion.velocity = Vec2::ZERO;
    }

    let bite = eater.state.bite_size.min(eaten.state.remaining_size());
    scope.ledger.transfer(
        scope.tick,
        &mut eaten.state,
        &mut eater.state,
        bite,
        TransferReason::Eat,
    )?;
    eaten.state.damage = eaten.state.damage.saturating_add(bite);

    let tick = scope.tick;
    scope.record(
        HistoryRecord::for_subject(EventCategory::Eat, tick, &eater.state, "eat", "ate")
            .deltas(0, bite, Decimal::ZERO)
            .against(&eaten.state),
    );
    scope.record(
        HistoryRecord::for_subject(EventCategory::Eat, tick, &eaten.state, "", "eaten by")
            .deltas(0, Decimal::ZERO.saturating_sub(bite), bite)
            .against(&eater.state),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Mate
// ---------------------------------------------------------------------------

fn mate(
    scope: &mut TickScope<'_>,
    registry: &mut EntityRegistry,
    first: CreatureId,
    second: CreatureId,
    response: &Interaction,
) -> Result<(), AgentError> {
    let size = registry
        .state(first)
        .map(|s| s.size)
        .ok_or(AgentError::CreatureNotFound(first))?;
    let attempt_cost = size.saturating_mul(scope.rules.mate_attempt_energy_rate);
    let attempt_paid = scope.pay_sink(registry, first, attempt_cost, TransferReason::MateAttempt)?;

    let mut first_gave = Decimal::ZERO;
    let mut second_gave = Decimal::ZERO;
    let result = if response.action != InteractionKind::Mate {
        "refused"
    } else if !mating_succeeds(scope) {
        "no luck"
    } else if let Some(mut baby) = scope.conceive(registry, first)? {
        let rate = scope.rules.mate_energy_transfer_rate;
        let (p1, p2) = registry.require_pair_mut(first, second)?;
        first_gave = p1.state.energy.saturating_mul(rate);
        second_gave = p2.state.energy.saturating_mul(rate);
        scope.ledger.transfer(
            scope.tick,
            &mut p1.state,
            &mut baby.state,
            first_gave,
            TransferReason::MateFunding,
        )?;
        scope.ledger.transfer(
            scope.tick,
            &mut p2.state,
            &mut baby.state,
            second_gave,
            TransferReason::MateFunding,
        )?;
        scope.deliver(registry, baby);
        "mated"
    } else {
        "no offspring"
    };

    let tick = scope.tick;
    let (p1, p2) = registry.require_pair_mut(first, second)?;
    scope.record(
        HistoryRecord::for_subject(EventCategory::Mate, tick, &p1.state, "mate", result)
            .deltas(0, Decimal::ZERO.saturating_sub(attempt_paid.saturating_add(first_gave)), Decimal::ZERO)
            .against(&p2.state),
    );
    scope.record(
        HistoryRecord::for_subject(EventCategory::Mate, tick, &p2.state, "mate response", result)
            .deltas(0, Decimal::ZERO.saturating_sub(second_gave), Decimal::ZERO)
            .against(&p1.state),
    );
    Ok(())
}

/// One draw from `0..denominator`; zero wins.
fn mating_succeeds(scope: &mut TickScope<'_>) -> bool {
    let last = i64::from(scope.rules.mate_success_denominator.max(1)).saturating_sub(1);
    scope.rng.int_inclusive(0, last) == 0
}

// ---------------------------------------------------------------------------
// Attack
// ---------------------------------------------------------------------------

fn attack(
    scope: &mut TickScope<'_>,
    registry: &mut EntityRegistry,
    attacker_id: CreatureId,
    proposal: &Interaction,
    defender_id: CreatureId,
    response: &Interaction,
) -> Result<(), AgentError> {
    if defender_id == scope.sink {
        return drain_into_sink(scope, registry, attacker_id, proposal);
    }

    let (attacker, defender) = registry.require_pair_mut(attacker_id, defender_id)?;
    let Some(weapon) = proposal
        .details
        .as_ref()
        .and_then(|name| attacker.state.weapons.get(name))
        .copied()
    else {
        warn_missing_gear(&attacker.state, "weapon", proposal.details_str());
        return Ok(());
    };
    if response.action == InteractionKind::Defend
        && battle::raised_defense(response, &defender.state.defenses).is_none()
    {
        warn_missing_gear(&defender.state, "defense", response.details_str());
    }

    attacker.state.motion.velocity = Vec2::ZERO;
    defender.state.motion.velocity = Vec2::ZERO;

    let result = battle::resolve(
        &weapon,
        response,
        &defender.state.defenses,
        &mut *scope.rng,
        scope.rules,
    );

    attacker.state.damage = attacker.state.damage.saturating_add(result.attacker_damage_change);
    defender.state.damage = defender.state.damage.saturating_add(result.defender_damage_change);
    attacker.state.alertness = attacker.state.alertness.saturating_sub(1);
    defender.state.alertness = defender.state.alertness.saturating_sub(1);

    let attacker_paid = scope.pay_sink(
        registry,
        attacker_id,
        Decimal::ZERO.saturating_sub(result.attacker_energy_change),
        TransferReason::Attack,
    )?;
    let defender_paid = scope.pay_sink(
        registry,
        defender_id,
        Decimal::ZERO.saturating_sub(result.defender_energy_change),
        TransferReason::Defense,
    )?;

    let defended = response.action == InteractionKind::Defend;
    let tick = scope.tick;
    let (attacker, defender) = registry.require_pair_mut(attacker_id, defender_id)?;
    scope.record(
        HistoryRecord::for_subject(EventCategory::Attack, tick, &attacker.state, "attack", "attacked")
            .details(proposal.details_str())
            .deltas(-1, Decimal::ZERO.saturating_sub(attacker_paid), result.attacker_damage_change)
            .against(&defender.state),
    );
    scope.record(
        HistoryRecord::for_subject(
            EventCategory::Attack,
            tick,
            &defender.state,
            if defended { "defend response" } else { "" },
            "attacked by",
        )
        .details(if defended { response.details_str() } else { "" })
        .deltas(-1, Decimal::ZERO.saturating_sub(defender_paid), result.defender_damage_change)
        .against(&attacker.state),
    );
    Ok(())
}

fn drain_into_sink(
    scope: &mut TickScope<'_>,
    registry: &mut EntityRegistry,
    attacker_id: CreatureId,
    proposal: &Interaction,
) -> Result<(), AgentError> {
    let energy = registry
        .state(attacker_id)
        .map(|s| s.energy)
        .ok_or(AgentError::CreatureNotFound(attacker_id))?;
    let drained = scope.pay_sink(registry, attacker_id, energy, TransferReason::SinkDrain)?;

    let tick = scope.tick;
    let sink = scope.sink;
    let (attacker, sun) = registry.require_pair_mut(attacker_id, sink)?;
    scope.record(
        HistoryRecord::for_subject(
            EventCategory::Attack,
            tick,
            &attacker.state,
            "attack",
            "total energy drain",
        )
        .details(proposal.details_str())
        .deltas(0, Decimal::ZERO.saturating_sub(drained), Decimal::ZERO)
        .against(&sun.state),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Defend
// ---------------------------------------------------------------------------

fn pointless_defense(
    scope: &mut TickScope<'_>,
    registry: &mut EntityRegistry,
    defender_id: CreatureId,
    proposal: &Interaction,
    other: CreatureId,
) -> Result<(), AgentError> {
    let defender = registry
        .get(defender_id)
        .ok_or(AgentError::CreatureNotFound(defender_id))?;
    let Some(defense) = proposal
        .details
        .as_ref()
        .and_then(|name| defender.state.defenses.get(name))
        .copied()
    else {
        warn_missing_gear(&defender.state, "defense", proposal.details_str());
        return Ok(());
    };

    let cost = defense
        .power
        .saturating_mul(scope.rules.battle_energy_cost_rate);
    let paid = scope.pay_sink(registry, defender_id, cost, TransferReason::Defense)?;

    let tick = scope.tick;
    let (defender, partner) = registry.require_pair_mut(defender_id, other)?;
    scope.record(
        HistoryRecord::for_subject(
            EventCategory::Attack,
            tick,
            &defender.state,
            "defend",
            "pointless defence",
        )
        .details(defense.kind.as_str())
        .deltas(0, Decimal::ZERO.saturating_sub(paid), Decimal::ZERO)
        .against(&partner.state),
    );
    Ok(())
}

fn warn_missing_gear(state: &AgentState, gear: &'static str, name: &str) {
    warn!(
        kind = %state.kind,
        creature_id = %state.id,
        gear,
        name,
        "behavior fault, named gear not carried; no effect"
    );
}
