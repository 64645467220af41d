//! Death causes and the health checks that trigger them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use creatures_types::{AgentState, Vec2};

use crate::config::ArenaBounds;

/// Why a creature died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Its center left the arena.
    FellOffEdge,
    /// Damage reached its size.
    TooMuchDamage,
    /// Energy dropped to zero or below.
    OutOfEnergy,
}

impl DeathCause {
    /// Text written to the `Result` column of the death row.
    pub const fn result_text(self) -> &'static str {
        match self {
            Self::FellOffEdge => "Fell off edge",
            Self::TooMuchDamage => "Too much damage",
            Self::OutOfEnergy => "Out of energy",
        }
    }
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.result_text())
    }
}

/// Whether a creature at `position` has left the arena.
pub fn off_edge(arena: &ArenaBounds, position: Vec2) -> Option<DeathCause> {
    (!arena.contains(position)).then_some(DeathCause::FellOffEdge)
}

/// End-of-tick health check. Damage is checked before energy.
pub fn health_death(state: &AgentState) -> Option<DeathCause> {
    if state.damage >= state.size {
        Some(DeathCause::TooMuchDamage)
    } else if state.energy <= Decimal::ZERO {
        Some(DeathCause::OutOfEnergy)
    } else {
        None
    }
}
