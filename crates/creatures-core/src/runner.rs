//! Bounded simulation loop.
//!
//! [`run_simulation`] drives [`TickEngine::run_tick`] until the tick
//! limit is reached or only the sun is left, notifying a
//! [`TickCallback`] after every tick and flushing the history sink at
//! the end.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::history::{HistoryError, HistoryRecorder};
use crate::tick::{TickEngine, TickError, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },

    /// The final history flush failed.
    #[error("history error: {source}")]
    History {
        /// The underlying history error.
        #[from]
        source: HistoryError,
    },
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// The configured tick limit was reached.
    MaxTicksReached,
    /// Only the sun is left.
    Extinction,
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// Identifier of this run.
    pub run_id: Uuid,
    /// When the loop started.
    pub started_at: DateTime<Utc>,
    /// When the loop stopped.
    pub ended_at: DateTime<Utc>,
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
pub trait TickCallback {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, engine: &TickEngine);
}

/// A no-op tick callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _engine: &TickEngine) {}
}

/// Run ticks until `max_ticks` have run (`0` means no limit) or until
/// no creature other than the sun is alive.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails unrecoverably or the history
/// sink cannot be flushed.
pub fn run_simulation(
    engine: &mut TickEngine,
    max_ticks: u64,
    history: &mut dyn HistoryRecorder,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let run_id = Uuid::now_v7();
    let started_at = Utc::now();
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        run_id = %run_id,
        max_ticks,
        creatures = engine.alive(),
        "Simulation starting"
    );

    let end_reason = loop {
        if engine.alive() == 0 {
            info!(tick = engine.tick(), "Only the sun is left -- extinction");
            break SimulationEndReason::Extinction;
        }
        if max_ticks > 0 && total_ticks >= max_ticks {
            info!(tick = engine.tick(), max_ticks, "Tick limit reached");
            break SimulationEndReason::MaxTicksReached;
        }

        let summary = engine.run_tick(history)?;
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&summary, engine);
        last_summary = Some(summary);
    };

    history.flush()?;

    Ok(SimulationResult {
        run_id,
        started_at,
        ended_at: Utc::now(),
        end_reason,
        final_summary: last_summary,
        total_ticks,
    })
}

/// Log the end of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    let elapsed_ms = (result.ended_at - result.started_at).num_milliseconds();
    info!(
        run_id = %result.run_id,
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        elapsed_ms,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        final_alive = result.final_summary.as_ref().map(|s| s.alive),
        final_energy = result
            .final_summary
            .as_ref()
            .map(|s| s.total_energy.to_string()),
        "Simulation ended"
    );
}
