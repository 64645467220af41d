//! A creature's own action for the tick: still, move, sleep or divide.

use rust_decimal::Decimal;

use creatures_ledger::TransferReason;
use creatures_types::{CreatureId, EventCategory, HistoryRecord, Status, TickAction};

use crate::error::AgentError;
use crate::physics;
use crate::registry::EntityRegistry;
use crate::scope::TickScope;

/// Apply `action` for creature `id`.
pub fn apply_tick_action(
    scope: &mut TickScope<'_>,
    registry: &mut EntityRegistry,
    id: CreatureId,
    action: TickAction,
) -> Result<(), AgentError> {
    registry.require_mut(id)?.state.last_action = Some(action);
    match action {
        TickAction::Still => {
            registry.require_mut(id)?.state.status = Status::Awake;
            Ok(())
        }
        TickAction::Move => move_creature(scope, registry, id),
        TickAction::Sleep => sleep(scope, registry, id),
        TickAction::Divide => divide(scope, registry, id),
    }
}

/// Integrate motion and charge for speed and carried gear. A creature
/// with no alertness left stays put but still pays for its current
/// velocity.
fn move_creature(
    scope: &mut TickScope<'_>,
    registry: &mut EntityRegistry,
    id: CreatureId,
) -> Result<(), AgentError> {
    let state = &mut registry.require_mut(id)?.state;
    if state.alertness > 0 {
        physics::step(&mut state.motion, state.footprint, scope.rules.move_time_step);
    }
    state.status = Status::Awake;

    let speed = Decimal::try_from(state.motion.velocity.magnitude()).unwrap_or(Decimal::ZERO);
    let cost = speed
        .saturating_mul(scope.rules.velocity_energy_multiplier)
        .saturating_add(
            state
                .battle_power()
                .saturating_mul(scope.rules.gear_movement_multiplier),
        );
    let paid = scope.pay_sink(registry, id, cost, TransferReason::Movement)?;

    let state = &registry.require_mut(id)?.state;
    let tick = scope.tick;
    scope.record(
        HistoryRecord::for_subject(EventCategory::Move, tick, state, "move", "moved")
            .deltas(0, Decimal::ZERO.saturating_sub(paid), Decimal::ZERO),
    );
    Ok(())
}

fn sleep(
    scope: &mut TickScope<'_>,
    registry: &mut EntityRegistry,
    id: CreatureId,
) -> Result<(), AgentError> {
    let state = &mut registry.require_mut(id)?.state;
    let before = state.alertness;
    state.alertness = scope
        .rules
        .clamp_alertness(before.saturating_add(scope.rules.sleep_alertness_gain));
    state.status = Status::Asleep;
    let gained = i64::from(state.alertness).saturating_sub(i64::from(before));

    let tick = scope.tick;
    scope.record(
        HistoryRecord::for_subject(EventCategory::Sleep, tick, state, "sleep", "slept")
            .deltas(gained, Decimal::ZERO, Decimal::ZERO),
    );
    Ok(())
}

/// Split off an offspring funded with half the parent's energy. Gated on
/// responsiveness; the division cost is charged even when no offspring
/// comes of it.
fn divide(
    scope: &mut TickScope<'_>,
    registry: &mut EntityRegistry,
    id: CreatureId,
) -> Result<(), AgentError> {
    let responsive = {
        let state = registry.state(id).ok_or(AgentError::CreatureNotFound(id))?;
        scope.is_responsive(state)
    };
    if !responsive {
        return Ok(());
    }

    let size = registry
        .state(id)
        .map(|s| s.size)
        .ok_or(AgentError::CreatureNotFound(id))?;
    let cost = size.saturating_mul(scope.rules.mate_attempt_energy_rate);
    let paid = scope.pay_sink(registry, id, cost, TransferReason::DivideCost)?;

    let mut given = Decimal::ZERO;
    let result = if let Some(mut baby) = scope.conceive(registry, id)? {
        let parent = &mut registry.require_mut(id)?.state;
        given = parent
            .energy
            .checked_div(Decimal::TWO)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO);
        scope.ledger.transfer(
            scope.tick,
            parent,
            &mut baby.state,
            given,
            TransferReason::DivideFunding,
        )?;
        scope.deliver(registry, baby);
        "divided"
    } else {
        "failed"
    };

    let state = &registry.require_mut(id)?.state;
    let tick = scope.tick;
    scope.record(
        HistoryRecord::for_subject(EventCategory::Divide, tick, state, "divide", result)
            .deltas(0, Decimal::ZERO.saturating_sub(paid.saturating_add(given)), Decimal::ZERO),
    );
    Ok(())
}
