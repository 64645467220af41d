//! Shared type definitions for the Creatures arena simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace: creature state, battle gear, interactions, and history
//! rows. It holds no behavior beyond small derived accessors.
//!
//! # Modules
//!
//! - [`ids`] -- The creation-ordered [`CreatureId`]
//! - [`enums`] -- Status, actions, interaction kinds, gear types
//! - [`structs`] -- Creature state, snapshots, gear, battle results, history rows

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{DefenseKind, EventCategory, InteractionKind, Status, TickAction, WeaponKind};
pub use ids::CreatureId;
pub use structs::{
    AgentState, BattleResult, Counterpart, CreatureSnapshot, Defense, Footprint, HistoryRecord,
    Interaction, KindSummary, Motion, Vec2, Weapon,
};
