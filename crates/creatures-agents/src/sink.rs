//! The sun: the arena's energy sink.
//!
//! Every cost in the arena is paid to the sun and every starving grazer
//! eats from it. It drifts around the arena and bounces off the edges at
//! a random angle. The tick engine resets its status and damage at the
//! start of every tick, so it never dies.

use creatures_types::{AgentState, Footprint, TickAction, Vec2};

use crate::behavior::{Behavior, Blueprint, HookContext};
use crate::error::BehaviorError;

/// Kind name of the energy sink.
pub const SUN_KIND: &str = "Sun";

/// Blueprint of the sun.
pub fn sun_blueprint() -> Blueprint {
    Blueprint::new(SUN_KIND, Footprint::new(50, 50))
        .velocity(Vec2::new(10.0, 10.0))
        .max_velocity(5.0)
        .acceleration(1.0)
}

/// Drift and bounce.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunBehavior;

impl Behavior for SunBehavior {
    fn decide_tick(
        &mut self,
        ctx: &mut HookContext<'_>,
        me: &mut AgentState,
    ) -> Result<Option<TickAction>, BehaviorError> {
        let pos = me.motion.position;
        let half_w = f64::from(me.footprint.width) / 2.0;
        let half_h = f64::from(me.footprint.height) / 2.0;

        let bounce = if pos.x <= ctx.arena.left + half_w {
            Some((270, 450))
        } else if pos.x > ctx.arena.right - half_w {
            Some((90, 270))
        } else if pos.y <= ctx.arena.top + half_h {
            Some((180, 359))
        } else if pos.y >= ctx.arena.bottom - half_h {
            Some((0, 180))
        } else {
            None
        };
        if let Some((low, high)) = bounce {
            let angle = ctx.rng.int_inclusive(low, high).rem_euclid(360);
            me.motion.angle = i32::try_from(angle).map_or(0.0, f64::from);
        }
        Ok(Some(TickAction::Move))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal_macros::dec;

    use creatures_types::CreatureId;

    use super::*;
    use crate::config::ArenaBounds;
    use crate::random::ScriptedRandom;

    fn sun_at(x: f64, y: f64) -> AgentState {
        let bp = sun_blueprint();
        let mut state = AgentState::new(CreatureId(0), SUN_KIND, bp.footprint, dec!(0.2), 100);
        state.motion = bp.motion;
        state.motion.position = Vec2::new(x, y);
        state.motion.angle = 45.0;
        state
    }

    fn tick(state: &mut AgentState, draw: i64) -> Option<TickAction> {
        let population = BTreeMap::new();
        let mut rng = ScriptedRandom::new().with_ints([draw]);
        let mut ctx = HookContext {
            tick: 1,
            arena: ArenaBounds::from_size(600.0, 600.0, 10.0),
            population: &population,
            rng: &mut rng,
        };
        SunBehavior.decide_tick(&mut ctx, state).unwrap()
    }

    #[test]
    fn always_moves_and_keeps_heading_inside() {
        let mut sun = sun_at(300.0, 300.0);
        assert_eq!(tick(&mut sun, 0), Some(TickAction::Move));
        assert!((sun.motion.angle - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bounces_off_left_edge() {
        let mut sun = sun_at(20.0, 300.0);
        tick(&mut sun, 400);
        assert!((sun.motion.angle - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bounces_off_bottom_edge() {
        let mut sun = sun_at(300.0, 600.0);
        tick(&mut sun, 120);
        assert!((sun.motion.angle - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn blueprint_shape() {
        let bp = sun_blueprint();
        assert_eq!(bp.footprint, Footprint::new(50, 50));
        assert!((bp.motion.max_velocity - 5.0).abs() < f64::EPSILON);
        assert!(bp.validate().is_ok());
    }
}
