//! Kind registration and the starting population.
//!
//! Each creature kind is registered once with a factory that builds its
//! starting creatures. The loader that discovers kinds is outside this
//! crate; it calls [`KindRegistry::register_kind`] for each one. At start
//! the engine runs every factory in registration order. A factory that
//! fails, or returns anything that is not a valid creature of its own
//! kind, contributes no creatures at all.

use std::collections::BTreeMap;

use tracing::{error, info};

use creatures_agents::{ArenaBounds, BehaviorError, Population, RandomSource};

/// Errors raised while registering kinds or building the starting
/// population.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// A kind with this name is already registered.
    #[error("kind already registered: {0}")]
    DuplicateKind(String),

    /// A kind name is empty.
    #[error("kind name is empty")]
    EmptyKind,

    /// The kind's factory failed.
    #[error("start-up of kind {kind} failed: {source}")]
    Factory {
        /// Kind whose factory failed.
        kind: String,
        /// The underlying behavior fault.
        source: BehaviorError,
    },

    /// The factory returned something other than creatures of its kind.
    #[error("kind {kind} returned a malformed population: {reason}")]
    Malformed {
        /// Kind whose population was rejected.
        kind: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// What a factory may see when building its starting creatures.
#[derive(Debug)]
pub struct StartContext<'a> {
    /// How many creatures the configuration asks for.
    pub count: u32,
    /// Playable rectangle.
    pub arena: ArenaBounds,
    /// Shared random source.
    pub rng: &'a mut dyn RandomSource,
}

/// Builds the starting creatures of one kind.
pub type PopulationFactory =
    Box<dyn FnMut(&mut StartContext<'_>) -> Result<Population, BehaviorError>>;

/// Registered kinds, in registration order.
#[derive(Default)]
pub struct KindRegistry {
    kinds: Vec<(String, PopulationFactory)>,
}

impl core::fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KindRegistry")
            .field("kinds", &self.names())
            .finish()
    }
}

impl KindRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with the factory that builds its starting
    /// creatures.
    pub fn register_kind(
        &mut self,
        name: impl Into<String>,
        factory: impl FnMut(&mut StartContext<'_>) -> Result<Population, BehaviorError> + 'static,
    ) -> Result<(), SetupError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SetupError::EmptyKind);
        }
        if self.kinds.iter().any(|(k, _)| *k == name) {
            return Err(SetupError::DuplicateKind(name));
        }
        info!(kind = %name, "kind registered");
        self.kinds.push((name, Box::new(factory)));
        Ok(())
    }

    /// Registered kind names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.kinds.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no kind is registered.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Run every factory and check its output. Each kind yields either
    /// its creation requests or the fault that rejected it; rejected
    /// kinds are logged at `error!`.
    pub fn start_all(
        &mut self,
        counts: &BTreeMap<String, u32>,
        arena: ArenaBounds,
        rng: &mut dyn RandomSource,
    ) -> Vec<(String, Result<Population, SetupError>)> {
        self.kinds
            .iter_mut()
            .map(|(kind, factory)| {
                let kind = kind.as_str();
                let mut ctx = StartContext {
                    count: counts.get(kind).copied().unwrap_or(0),
                    arena,
                    rng: &mut *rng,
                };
                let outcome = factory(&mut ctx)
                    .map_err(|source| SetupError::Factory {
                        kind: kind.to_owned(),
                        source,
                    })
                    .and_then(|population| check_population(kind, population));
                if let Err(fault) = &outcome {
                    error!(
                        kind,
                        error = %fault,
                        "kind rejected at start-up; it contributes no creatures"
                    );
                }
                (kind.to_owned(), outcome)
            })
            .collect()
    }
}

/// Every request must be a valid creature of `kind`.
fn check_population(kind: &str, population: Population) -> Result<Population, SetupError> {
    let malformed = |reason: String| SetupError::Malformed {
        kind: kind.to_owned(),
        reason,
    };
    let requests = match &population {
        Population::One(one) => core::slice::from_ref(one),
        Population::Many(many) => many.as_slice(),
    };
    for (index, request) in requests.iter().enumerate() {
        if request.blueprint.kind != kind {
            return Err(malformed(format!(
                "entry {index} is a {:?}",
                request.blueprint.kind
            )));
        }
        request
            .blueprint
            .validate()
            .map_err(|e| malformed(format!("entry {index}: {e}")))?;
    }
    Ok(population)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use creatures_agents::{Blueprint, Inert, NewCreature, ScriptedRandom};
    use creatures_types::Footprint;

    use super::*;

    fn gnubs(ctx: &mut StartContext<'_>) -> Result<Population, BehaviorError> {
        Ok(Population::Many(
            (0..ctx.count)
                .map(|_| NewCreature::new(Blueprint::new("Gnub", Footprint::new(15, 15)), Inert))
                .collect(),
        ))
    }

    fn start(kinds: &mut KindRegistry, counts: &[(&str, u32)]) -> Vec<(String, Result<Population, SetupError>)> {
        let counts = counts
            .iter()
            .map(|(k, n)| ((*k).to_owned(), *n))
            .collect();
        let mut rng = ScriptedRandom::new();
        kinds.start_all(&counts, ArenaBounds::default(), &mut rng)
    }

    #[test]
    fn duplicate_and_empty_names_rejected() {
        let mut kinds = KindRegistry::new();
        kinds.register_kind("Gnub", gnubs).unwrap();
        assert!(matches!(
            kinds.register_kind("Gnub", gnubs),
            Err(SetupError::DuplicateKind(_))
        ));
        assert!(matches!(kinds.register_kind(" ", gnubs), Err(SetupError::EmptyKind)));
        assert_eq!(kinds.names(), vec!["Gnub"]);
    }

    #[test]
    fn factory_gets_configured_count() {
        let mut kinds = KindRegistry::new();
        kinds.register_kind("Gnub", gnubs).unwrap();
        let out = start(&mut kinds, &[("Gnub", 4)]);
        let (kind, population) = out.into_iter().next().unwrap();
        assert_eq!(kind, "Gnub");
        assert_eq!(population.unwrap().into_vec().len(), 4);
    }

    #[test]
    fn unconfigured_kind_gets_zero() {
        let mut kinds = KindRegistry::new();
        kinds.register_kind("Gnub", gnubs).unwrap();
        let out = start(&mut kinds, &[]);
        assert!(out[0].1.as_ref().map(Population::is_empty).unwrap());
    }

    #[test]
    fn foreign_entry_rejects_whole_population() {
        let mut kinds = KindRegistry::new();
        kinds
            .register_kind("Korub", |_ctx: &mut StartContext<'_>| {
                let mut many: Vec<NewCreature> = (0..5)
                    .map(|_| NewCreature::new(Blueprint::new("Korub", Footprint::new(30, 30)), Inert))
                    .collect();
                many.push(NewCreature::new(Blueprint::new("Gnub", Footprint::new(15, 15)), Inert));
                Ok(Population::Many(many))
            })
            .unwrap();
        let out = start(&mut kinds, &[("Korub", 5)]);
        assert!(matches!(out[0].1, Err(SetupError::Malformed { .. })));
    }

    #[test]
    fn invalid_blueprint_and_failing_factory_rejected() {
        let mut kinds = KindRegistry::new();
        kinds
            .register_kind("Flat", |_ctx: &mut StartContext<'_>| {
                Ok(Population::One(NewCreature::new(
                    Blueprint::new("Flat", Footprint::new(0, 3)),
                    Inert,
                )))
            })
            .unwrap();
        kinds
            .register_kind("Broken", |_ctx: &mut StartContext<'_>| {
                Err(BehaviorError::Failed("no start".to_owned()))
            })
            .unwrap();
        kinds.register_kind("Gnub", gnubs).unwrap();

        let out = start(&mut kinds, &[("Gnub", 2)]);
        assert!(matches!(out[0].1, Err(SetupError::Malformed { .. })));
        assert!(matches!(out[1].1, Err(SetupError::Factory { .. })));
        assert_eq!(out[2].1.as_ref().map(Population::len).unwrap(), 2);
    }
}
