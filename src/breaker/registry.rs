//! # Caller-owned map of named circuits.
//!
//! One [`BreakerRegistry`] lives inside each [`Executor`](crate::Executor). Unknown
//! command names get a circuit built from the registry defaults on first use.
//! Configuration is synchronous, so the map sits behind a `std::sync::RwLock`.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::circuit::Circuit;
use super::config::BreakerConfig;

/// Registry of circuits keyed by command name.
#[derive(Debug)]
pub struct BreakerRegistry {
    defaults: BreakerConfig,
    circuits: RwLock<HashMap<Arc<str>, Arc<Circuit>>>,
}

impl BreakerRegistry {
    /// Creates an empty registry; `defaults` apply to names never configured.
    pub fn new(defaults: BreakerConfig) -> Self {
        Self {
            defaults,
            circuits: RwLock::new(HashMap::new()),
        }
    }

    /// Installs a fresh circuit for `name`, replacing any previous one.
    ///
    /// In-flight executions keep the circuit they were admitted by.
    pub fn configure(&self, name: &str, cfg: BreakerConfig) -> Arc<Circuit> {
        let name: Arc<str> = Arc::from(name);
        let circuit = Arc::new(Circuit::new(Arc::clone(&name), cfg));
        self.circuits
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, Arc::clone(&circuit));
        circuit
    }

    /// Returns the circuit for `name`, creating it with the defaults if needed.
    pub fn circuit(&self, name: &str) -> Arc<Circuit> {
        if let Some(c) = self.get(name) {
            return c;
        }
        let mut map = self.circuits.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            map.entry(Arc::from(name))
                .or_insert_with(|| Arc::new(Circuit::new(name, self.defaults.clone()))),
        )
    }

    /// Returns the circuit for `name` without creating one.
    pub fn get(&self, name: &str) -> Option<Arc<Circuit>> {
        self.circuits
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Defaults applied to unknown names.
    pub fn defaults(&self) -> &BreakerConfig {
        &self.defaults
    }

    /// Number of known circuits.
    pub fn len(&self) -> usize {
        self.circuits
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if no circuit was created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted names of known circuits.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .circuits
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .map(|k| k.to_string())
            .collect();
        names.sort_unstable();
        names
    }
}
