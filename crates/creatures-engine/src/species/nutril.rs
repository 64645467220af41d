//! Nutrils: sit still, eat from the sun, and mate with other mature
//! Nutrils.

use creatures_agents::{Behavior, BehaviorError, Blueprint, HookContext, NewCreature, SUN_KIND};
use creatures_types::{AgentState, CreatureSnapshot, Footprint, Interaction, InteractionKind, TickAction};

use super::rest_or;

/// Kind name.
pub const KIND: &str = "Nutril";

/// Nutrils older than this may mate.
pub const MATURITY_AGE: u64 = 20;

/// A fresh nutril.
pub fn nutril() -> NewCreature {
    NewCreature::new(Blueprint::new(KIND, Footprint::new(12, 12)), Nutril)
}

/// Nutril behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nutril;

impl Nutril {
    fn mate_with(me: &AgentState, other: &CreatureSnapshot) -> Option<Interaction> {
        (other.kind == KIND && me.age > MATURITY_AGE)
            .then(|| Interaction::new(InteractionKind::Mate))
    }
}

impl Behavior for Nutril {
    fn decide_tick(
        &mut self,
        _ctx: &mut HookContext<'_>,
        me: &mut AgentState,
    ) -> Result<Option<TickAction>, BehaviorError> {
        Ok(Some(rest_or(me.status, me.alertness, TickAction::Still)))
    }

    fn propose_interaction(
        &mut self,
        _ctx: &mut HookContext<'_>,
        me: &AgentState,
        other: &CreatureSnapshot,
    ) -> Result<Option<Interaction>, BehaviorError> {
        if other.kind == SUN_KIND {
            return Ok(Some(Interaction::new(InteractionKind::Eat)));
        }
        Ok(Self::mate_with(me, other))
    }

    fn respond_to_interaction(
        &mut self,
        _ctx: &mut HookContext<'_>,
        me: &AgentState,
        other: &CreatureSnapshot,
        _proposed: &Interaction,
    ) -> Result<Option<Interaction>, BehaviorError> {
        Ok(Self::mate_with(me, other))
    }

    fn create_offspring(
        &mut self,
        _ctx: &mut HookContext<'_>,
        _me: &AgentState,
    ) -> Result<Option<NewCreature>, BehaviorError> {
        Ok(Some(nutril()))
    }
}
