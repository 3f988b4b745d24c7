//! Named strategy table.
//!
//! The process-wide registry is seeded with the built-in strategies on first
//! access. Registration and removal affect every later run; callers running
//! tables from several threads must serialize mutation themselves.

use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, WhereError};

use super::{AssertStrategy, ExpectStrategy, Strategy};

/// Registry of strategies in registration order.
pub struct StrategyRegistry {
    entries: Vec<(String, Arc<dyn Strategy>)>,
    default_name: String,
}

impl StrategyRegistry {
    /// Creates an empty registry whose default is `default_name`.
    pub fn new(default_name: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            default_name: default_name.into(),
        }
    }

    /// Creates a registry holding `expect` (the default) and `assert`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new(ExpectStrategy::NAME);
        registry.register(ExpectStrategy::NAME, Arc::new(ExpectStrategy));
        registry.register(AssertStrategy::NAME, Arc::new(AssertStrategy));
        registry
    }

    /// Registers a strategy under `name`.
    ///
    /// Re-registering a name replaces the adapter in place.
    pub fn register(&mut self, name: impl Into<String>, strategy: Arc<dyn Strategy>) {
        let name = name.into();
        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(idx) => self.entries[idx].1 = strategy,
            None => self.entries.push((name, strategy)),
        }
    }

    /// Removes a strategy, returning it if it was registered.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn Strategy>> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    /// Gets a strategy by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Strategy>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, strategy)| Arc::clone(strategy))
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Returns the number of registered strategies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no strategies are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Makes a registered strategy the default.
    ///
    /// # Errors
    ///
    /// Returns [`WhereError::UnknownStrategy`] if `name` is not registered.
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if self.get(name).is_none() {
            return Err(WhereError::UnknownStrategy {
                name: name.to_string(),
            });
        }
        self.default_name = name.to_string();
        Ok(())
    }

    /// Resolves an explicit name, or the default when `name` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`WhereError::UnknownStrategy`] when nothing is registered
    /// under the requested (or default) name.
    pub fn resolve(&self, name: Option<&str>) -> Result<Arc<dyn Strategy>> {
        let name = name.unwrap_or(&self.default_name);
        self.get(name).ok_or_else(|| WhereError::UnknownStrategy {
            name: name.to_string(),
        })
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

static REGISTRY: LazyLock<RwLock<StrategyRegistry>> =
    LazyLock::new(|| RwLock::new(StrategyRegistry::with_builtins()));

fn read() -> RwLockReadGuard<'static, StrategyRegistry> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, StrategyRegistry> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

/// Registers a strategy in the process-wide registry (upsert).
pub fn register(name: impl Into<String>, strategy: Arc<dyn Strategy>) {
    let name = name.into();
    tracing::debug!(strategy = %name, "registering strategy");
    write().register(name, strategy);
}

/// Removes a strategy from the process-wide registry; absent names are a no-op.
pub fn unregister(name: &str) -> Option<Arc<dyn Strategy>> {
    let removed = write().unregister(name);
    if removed.is_some() {
        tracing::debug!(strategy = name, "unregistered strategy");
    }
    removed
}

/// Looks up a strategy in the process-wide registry.
pub fn lookup(name: &str) -> Option<Arc<dyn Strategy>> {
    read().get(name)
}

/// Names in the process-wide registry, in registration order.
pub fn list() -> Vec<String> {
    read().names()
}

/// Name used when a run does not ask for a strategy.
pub fn default_name() -> String {
    read().default_name().to_string()
}

/// Changes the process-wide default strategy.
///
/// # Errors
///
/// Returns [`WhereError::UnknownStrategy`] if `name` is not registered.
pub fn set_default(name: &str) -> Result<()> {
    write().set_default(name)
}

pub(crate) fn resolve(name: Option<&str>) -> Result<Arc<dyn Strategy>> {
    read().resolve(name)
}
