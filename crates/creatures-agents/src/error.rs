//! Error types for the creatures-agents crate.
//!
//! [`AgentError`] covers engine-side failures (unknown ids, invalid
//! creation requests, ledger failures). [`BehaviorError`] is what
//! pluggable behaviors return; the engine logs it and substitutes the
//! neutral default instead of propagating it.

use creatures_ledger::LedgerError;
use creatures_types::CreatureId;

/// Errors that can occur while operating on creatures.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// No creature with this id is in the registry.
    #[error("creature not found: {0}")]
    CreatureNotFound(CreatureId),

    /// A creation request failed validation.
    #[error("invalid blueprint for kind {kind:?}: {reason}")]
    InvalidBlueprint {
        /// Kind named by the request.
        kind: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An energy transfer failed.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// A fault raised by a behavior hook.
#[derive(Debug, thiserror::Error)]
pub enum BehaviorError {
    /// The hook failed outright.
    #[error("behavior failed: {0}")]
    Failed(String),

    /// The hook produced a value the engine cannot use.
    #[error("invalid behavior output: {0}")]
    InvalidOutput(String),
}
