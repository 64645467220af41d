//! The built-in creature kinds.
//!
//! - [`berry`] -- Sleeps, eats the sun, divides while its kind is scarce
//! - [`nutril`] -- Sleeps, eats the sun, mates with mature Nutrils
//! - [`korub`] -- Armed wanderer that eats or attacks whatever it meets
//! - [`fleeb`] -- Straight-line mover that eats anything but Fleebs
//! - [`gnub`] -- Does nothing and dies out
//!
//! The sun is created by the engine itself.

pub mod berry;
pub mod fleeb;
pub mod gnub;
pub mod korub;
pub mod nutril;

use creatures_agents::{ArenaBounds, NewCreature, Population};
use creatures_core::{KindRegistry, SetupError, StartContext};
use creatures_types::{Status, TickAction, Vec2};

/// Alertness at which a sleeping creature wakes up.
const FULLY_ALERT: u32 = 100;

/// Below this alertness a creature goes to sleep.
const TIRED: u32 = 10;

/// Distance from the arena edge at which wanderers turn back.
const EDGE_MARGIN: f64 = 20.0;

/// Register every built-in kind, in a fixed order.
pub fn register_builtin(kinds: &mut KindRegistry) -> Result<(), SetupError> {
    kinds.register_kind(berry::KIND, |ctx: &mut StartContext<'_>| Ok(many(ctx, berry::berry)))?;
    kinds.register_kind(nutril::KIND, |ctx: &mut StartContext<'_>| Ok(many(ctx, nutril::nutril)))?;
    kinds.register_kind(korub::KIND, |ctx: &mut StartContext<'_>| Ok(many(ctx, korub::korub)))?;
    kinds.register_kind(fleeb::KIND, |ctx: &mut StartContext<'_>| Ok(many(ctx, fleeb::fleeb)))?;
    kinds.register_kind(gnub::KIND, |ctx: &mut StartContext<'_>| Ok(many(ctx, gnub::gnub)))?;
    Ok(())
}

fn many(ctx: &StartContext<'_>, make: fn() -> NewCreature) -> Population {
    Population::Many((0..ctx.count).map(|_| make()).collect())
}

/// Keep sleeping until fully alert, and go to sleep when tired.
fn needs_sleep(status: Status, alertness: u32) -> bool {
    (status == Status::Asleep && alertness < FULLY_ALERT) || alertness < TIRED
}

/// `Sleep` when [`needs_sleep`], otherwise `awake`.
fn rest_or(status: Status, alertness: u32, awake: TickAction) -> TickAction {
    if needs_sleep(status, alertness) {
        TickAction::Sleep
    } else {
        awake
    }
}

/// Heading that points back into the arena for a creature near an edge.
fn turn_from_edge(arena: &ArenaBounds, position: Vec2) -> Option<f64> {
    if position.x <= arena.left + EDGE_MARGIN {
        Some(0.0)
    } else if position.x > arena.right - EDGE_MARGIN {
        Some(180.0)
    } else if position.y <= arena.top + EDGE_MARGIN {
        Some(270.0)
    } else if position.y >= arena.bottom - EDGE_MARGIN {
        Some(90.0)
    } else {
        None
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use creatures_agents::ScriptedRandom;

    use super::*;

    #[test]
    fn sleep_rules() {
        assert!(needs_sleep(Status::Awake, 9));
        assert!(!needs_sleep(Status::Awake, 10));
        assert!(needs_sleep(Status::Asleep, 99));
        assert!(!needs_sleep(Status::Asleep, 100));
        assert_eq!(rest_or(Status::Awake, 50, TickAction::Move), TickAction::Move);
    }

    #[test]
    fn edges_turn_inward() {
        let arena = ArenaBounds::from_size(600.0, 600.0, 10.0);
        assert_eq!(turn_from_edge(&arena, Vec2::new(25.0, 300.0)), Some(0.0));
        assert_eq!(turn_from_edge(&arena, Vec2::new(595.0, 300.0)), Some(180.0));
        assert_eq!(turn_from_edge(&arena, Vec2::new(300.0, 20.0)), Some(270.0));
        assert_eq!(turn_from_edge(&arena, Vec2::new(300.0, 600.0)), Some(90.0));
        assert_eq!(turn_from_edge(&arena, Vec2::new(300.0, 300.0)), None);
    }

    #[test]
    fn builtin_kinds_start_with_configured_counts() {
        let mut kinds = KindRegistry::new();
        register_builtin(&mut kinds).unwrap();
        assert_eq!(kinds.names(), vec!["Berry", "Nutril", "Korub", "Fleeb", "Gnub"]);

        let counts = BTreeMap::from([
            ("Berry".to_owned(), 3),
            ("Korub".to_owned(), 2),
        ]);
        let mut rng = ScriptedRandom::new();
        let out = kinds.start_all(&counts, ArenaBounds::default(), &mut rng);
        let sizes: Vec<usize> = out
            .iter()
            .map(|(_, p)| p.as_ref().map(Population::len).unwrap())
            .collect();
        assert_eq!(sizes, vec![3, 0, 2, 0, 0]);
    }
}
