//! Error types for the arena binary.
//!
//! [`EngineError`] wraps every failure mode during start-up and the run
//! so `main` can propagate with `?`.

/// Top-level error for the arena binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: creatures_core::ConfigError,
    },

    /// Built-in kind registration failed.
    #[error("setup error: {source}")]
    Setup {
        /// The underlying setup error.
        #[from]
        source: creatures_core::SetupError,
    },

    /// Building the arena failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: creatures_core::TickError,
    },

    /// The simulation run failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: creatures_core::RunnerError,
    },

    /// The history file could not be opened.
    #[error("history error: {source}")]
    History {
        /// The underlying history error.
        #[from]
        source: creatures_core::HistoryError,
    },
}
