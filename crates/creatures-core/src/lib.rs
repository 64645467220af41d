//! Tick engine and run orchestration for the Creatures simulation.
//!
//! This crate turns a registry of creatures into a running arena: it
//! loads configuration, builds the starting population from registered
//! kinds, sandboxes behavior hooks, runs ticks in a fixed phase order and
//! hands history rows to a sink.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration ([`SimulationConfig`])
//! - [`history`] -- The [`HistoryRecorder`] sink and its [`HistoryFilter`]
//! - [`plugin`] -- Kind registration and start-up ([`KindRegistry`])
//! - [`runner`] -- The bounded run loop ([`run_simulation`])
//! - [`sandbox`] -- Snapshot-invoke-restore around behavior hooks
//! - [`tick`] -- The [`TickEngine`] and its per-tick summary

pub mod config;
pub mod history;
pub mod plugin;
pub mod runner;
pub mod sandbox;
pub mod tick;

pub use config::{ArenaConfig, ConfigError, LoggingConfig, SimulationConfig, WorldConfig};
pub use history::{HistoryError, HistoryFilter, HistoryRecorder, MemoryHistory};
pub use plugin::{KindRegistry, PopulationFactory, SetupError, StartContext};
pub use runner::{
    NoOpCallback, RunnerError, SimulationEndReason, SimulationResult, TickCallback,
    log_simulation_end, run_simulation,
};
pub use sandbox::run_sandboxed_hook;
pub use tick::{SetupReport, TickEngine, TickError, TickSummary};
