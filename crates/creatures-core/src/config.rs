//! Configuration loading and typed config structures for the Creatures
//! simulation.
//!
//! The canonical configuration lives in `creatures-config.yaml` at the
//! project root. Every field has a default, so an empty file (or no
//! file at all) yields the stock arena: 600 x 600 with 10 units of
//! padding, 5000 starting energy, and the stock species populations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use creatures_agents::{ArenaBounds, RulesConfig};
use creatures_types::EventCategory;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The content parsed but describes an arena that cannot run.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `creatures-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Run-level settings (seed, length, history file).
    #[serde(default)]
    pub world: WorldConfig,

    /// Arena dimensions.
    #[serde(default)]
    pub arena: ArenaConfig,

    /// Rule constants.
    #[serde(default)]
    pub rules: RulesConfig,

    /// History row filtering.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Starting creatures per kind.
    #[serde(default = "default_population")]
    pub population: BTreeMap<String, u32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            arena: ArenaConfig::default(),
            rules: RulesConfig::default(),
            logging: LoggingConfig::default(),
            population: default_population(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if the arena is degenerate.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string. Blank input yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if the arena is degenerate.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.arena;
        let dims = [a.width, a.height, a.padding];
        if dims.iter().any(|v| !v.is_finite()) || a.width <= 0.0 || a.height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "arena must be positive and finite, got {}x{} padding {}",
                a.width, a.height, a.padding
            )));
        }
        if self.rules.mate_success_denominator == 0 {
            return Err(ConfigError::Invalid(
                "rules.mate_success_denominator must be at least 1".to_owned(),
            ));
        }
        if !self.rules.move_time_step.is_finite() || self.rules.move_time_step <= 0.0 {
            return Err(ConfigError::Invalid(
                "rules.move_time_step must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Run-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Stop after this many ticks; `0` runs until extinction.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Where the binary writes the CSV history.
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// Transfer journal rows older than this many ticks are pruned.
    #[serde(default = "default_ledger_retention_ticks")]
    pub ledger_retention_ticks: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_ticks: default_max_ticks(),
            history_path: default_history_path(),
            ledger_retention_ticks: default_ledger_retention_ticks(),
        }
    }
}

/// Arena dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ArenaConfig {
    /// Playable width.
    #[serde(default = "default_arena_side")]
    pub width: f64,

    /// Playable height.
    #[serde(default = "default_arena_side")]
    pub height: f64,

    /// Offset of the playable area from the origin.
    #[serde(default = "default_padding")]
    pub padding: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: default_arena_side(),
            height: default_arena_side(),
            padding: default_padding(),
        }
    }
}

impl ArenaConfig {
    /// The playable rectangle.
    pub fn bounds(&self) -> ArenaBounds {
        ArenaBounds::from_size(self.width, self.height, self.padding)
    }
}

/// Which history rows are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct LoggingConfig {
    /// Keep move rows.
    #[serde(default)]
    pub log_move: bool,

    /// Keep sleep rows.
    #[serde(default)]
    pub log_sleep: bool,

    /// Keep death rows.
    #[serde(default = "default_true")]
    pub log_died: bool,

    /// Keep division rows.
    #[serde(default = "default_true")]
    pub log_divide: bool,

    /// Keep mating rows.
    #[serde(default = "default_true")]
    pub log_mate: bool,

    /// Keep eating rows.
    #[serde(default = "default_true")]
    pub log_eat: bool,

    /// Keep attack and defend rows.
    #[serde(default = "default_true")]
    pub log_attack: bool,

    /// Kinds to keep; `"All"` keeps every kind.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Kinds to drop, applied after `include`.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_move: false,
            log_sleep: false,
            log_died: true,
            log_divide: true,
            log_mate: true,
            log_eat: true,
            log_attack: true,
            include: default_include(),
            exclude: default_exclude(),
        }
    }
}

impl LoggingConfig {
    /// Whether rows of `category` are kept.
    pub const fn category_enabled(&self, category: EventCategory) -> bool {
        match category {
            EventCategory::Move => self.log_move,
            EventCategory::Sleep => self.log_sleep,
            EventCategory::Died => self.log_died,
            EventCategory::Divide => self.log_divide,
            EventCategory::Mate => self.log_mate,
            EventCategory::Eat => self.log_eat,
            EventCategory::Attack => self.log_attack,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_max_ticks() -> u64 {
    5_000
}

fn default_history_path() -> PathBuf {
    PathBuf::from("creatures_history.csv")
}

const fn default_ledger_retention_ticks() -> u64 {
    10
}

const fn default_arena_side() -> f64 {
    600.0
}

const fn default_padding() -> f64 {
    10.0
}

const fn default_true() -> bool {
    true
}

fn default_include() -> Vec<String> {
    vec!["All".to_owned()]
}

fn default_exclude() -> Vec<String> {
    vec!["Sun".to_owned()]
}

fn default_population() -> BTreeMap<String, u32> {
    let mut m = BTreeMap::new();
    m.insert("Berry".to_owned(), 100);
    m.insert("Nutril".to_owned(), 100);
    m.insert("Korub".to_owned(), 5);
    m.insert("Fleeb".to_owned(), 0);
    m.insert("Gnub".to_owned(), 0);
    m
}
