//! Arena binary for the Creatures simulation.
//!
//! Wires configuration, the built-in species, the CSV history writer and
//! the bounded run loop together.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `creatures-config.yaml` (or `CREATURES_CONFIG`)
//! 3. Create the arena with its sun, seeded from config
//! 4. Register the built-in kinds and build the starting population
//! 5. Open the CSV history file
//! 6. Run the simulation loop
//! 7. Log the result

mod error;
mod history_csv;
mod species;

use std::path::PathBuf;

use creatures_agents::SeededRandom;
use creatures_core::{KindRegistry, NoOpCallback, SimulationConfig, TickEngine, runner};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::history_csv::CsvHistory;

/// Environment variable that overrides the config path.
const CONFIG_ENV: &str = "CREATURES_CONFIG";

/// Config file used when the variable is unset.
const DEFAULT_CONFIG: &str = "creatures-config.yaml";

/// Application entry point for the arena.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
fn main() -> Result<(), EngineError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("creatures-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        seed = config.world.seed,
        max_ticks = config.world.max_ticks,
        width = config.arena.width,
        height = config.arena.height,
        "Configuration loaded"
    );

    // 3. Create the arena.
    let mut engine = TickEngine::new(&config, Box::new(SeededRandom::new(config.world.seed)))?;

    // 4. Register kinds and spawn the starting population.
    let mut kinds = KindRegistry::new();
    species::register_builtin(&mut kinds)?;
    let report = engine.populate(&mut kinds, &config.population)?;
    for (kind, count) in &report.spawned {
        info!(kind = %kind, count, "Kind started");
    }
    for fault in &report.rejected {
        warn!(error = %fault, "Kind contributes no creatures");
    }

    // 5. Open the history file.
    let history_path = &config.world.history_path;
    let mut history = CsvHistory::create(history_path)?;
    info!(path = %history_path.display(), "History file opened");

    // 6. Run the simulation.
    let result = runner::run_simulation(
        &mut engine,
        config.world.max_ticks,
        &mut history,
        &mut NoOpCallback,
    )?;

    // 7. Log results.
    runner::log_simulation_end(&result);
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        history_rows = history.rows(),
        "creatures-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration.
///
/// Reads the path from `CREATURES_CONFIG`, falling back to
/// `creatures-config.yaml` in the working directory. A missing file
/// yields the defaults.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let config_path = std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    if config_path.exists() {
        let config = SimulationConfig::from_file(&config_path)?;
        Ok(config)
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
