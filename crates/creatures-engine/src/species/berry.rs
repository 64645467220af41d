//! Berries: sit still, eat from the sun, and divide now and then while
//! there are fewer than [`CROWDED`] of them.

use creatures_agents::{Behavior, BehaviorError, Blueprint, HookContext, NewCreature, SUN_KIND};
use creatures_types::{AgentState, CreatureSnapshot, Footprint, Interaction, InteractionKind, TickAction};

use super::rest_or;

/// Kind name.
pub const KIND: &str = "Berry";

/// Berries stop dividing at this population.
pub const CROWDED: u32 = 150;

/// One-in-this-many chance per tick of dividing.
const DIVIDE_ODDS: i64 = 101;

/// A fresh berry.
pub fn berry() -> NewCreature {
    NewCreature::new(Blueprint::new(KIND, Footprint::new(10, 10)), Berry)
}

/// Berry behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct Berry;

impl Behavior for Berry {
    fn decide_tick(
        &mut self,
        ctx: &mut HookContext<'_>,
        me: &mut AgentState,
    ) -> Result<Option<TickAction>, BehaviorError> {
        let divide = ctx.rng.int_inclusive(0, DIVIDE_ODDS - 1) == 0
            && ctx.population_of(KIND) < CROWDED;
        let awake = if divide {
            TickAction::Divide
        } else {
            TickAction::Still
        };
        Ok(Some(rest_or(me.status, me.alertness, awake)))
    }

    fn propose_interaction(
        &mut self,
        _ctx: &mut HookContext<'_>,
        _me: &AgentState,
        other: &CreatureSnapshot,
    ) -> Result<Option<Interaction>, BehaviorError> {
        Ok((other.kind == SUN_KIND).then(|| Interaction::new(InteractionKind::Eat)))
    }

    fn create_offspring(
        &mut self,
        _ctx: &mut HookContext<'_>,
        _me: &AgentState,
    ) -> Result<Option<NewCreature>, BehaviorError> {
        Ok(Some(berry()))
    }
}
