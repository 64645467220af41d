//! Creatures, their behaviors, and the rules that resolve what they do.
//!
//! This crate holds everything that operates on creature state without
//! touching I/O or the tick schedule. It sits between `creatures-types`
//! (data), `creatures-ledger` (energy movement) and `creatures-core`
//! (the tick engine).
//!
//! # Modules
//!
//! - [`actions`] -- A creature's own tick action: still, move, sleep, divide
//! - [`battle`] -- Battle arithmetic ([`battle::resolve`])
//! - [`behavior`] -- The [`Behavior`] hooks, creation requests, fault absorption
//! - [`config`] -- Rule constants ([`RulesConfig`]) and [`ArenaBounds`]
//! - [`death`] -- Death causes and health checks ([`DeathCause`])
//! - [`error`] -- [`AgentError`] and [`BehaviorError`]
//! - [`interaction`] -- The propose/respond/resolve encounter protocol
//! - [`physics`] -- Motion integration and collision tests
//! - [`random`] -- Injectable randomness ([`RandomSource`])
//! - [`registry`] -- The [`EntityRegistry`] that owns every creature
//! - [`scope`] -- Per-tick resolution context ([`TickScope`])
//! - [`sink`] -- The sun, the arena's energy sink

pub mod actions;
pub mod battle;
pub mod behavior;
pub mod config;
pub mod death;
pub mod error;
pub mod interaction;
pub mod physics;
pub mod random;
pub mod registry;
pub mod scope;
pub mod sink;

// Re-export primary types at crate root for convenience.
pub use actions::apply_tick_action;
pub use behavior::{
    Behavior, Blueprint, HookContext, Inert, NewCreature, Population, absorb_fault,
};
pub use config::{ArenaBounds, RulesConfig};
pub use death::{DeathCause, health_death, off_edge};
pub use error::{AgentError, BehaviorError};
pub use interaction::{EncounterOutcome, run_encounter};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use registry::{Creature, EntityRegistry};
pub use scope::TickScope;
pub use sink::{SUN_KIND, SunBehavior, sun_blueprint};
