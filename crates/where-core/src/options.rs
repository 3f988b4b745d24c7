//! Run configuration.
//!
//! Options are a flat map of named values. Three keys steer the engine; every
//! key (recognized or not) is also visible to the row callback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Truthy: capture row failures instead of aborting the run.
pub const INTERCEPT_KEY: &str = "intercept";
/// Truthy: emit each outcome message through `tracing` as it is produced.
pub const LOG_KEY: &str = "log";
/// Name of a registered strategy to use instead of the default.
pub const STRATEGY_KEY: &str = "strategy";

/// Options for one run.
///
/// Deserializes from a flat object such as
/// `{"intercept": true, "strategy": "assert", "limit": 3}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    entries: BTreeMap<String, Value>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets any key; reserved keys change engine behavior.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_intercept(self, enable: bool) -> Self {
        self.with(INTERCEPT_KEY, enable)
    }

    #[must_use]
    pub fn with_log(self, enable: bool) -> Self {
        self.with(LOG_KEY, enable)
    }

    #[must_use]
    pub fn with_strategy(self, name: &str) -> Self {
        self.with(STRATEGY_KEY, name)
    }

    pub fn intercept(&self) -> bool {
        self.flag(INTERCEPT_KEY)
    }

    pub fn log(&self) -> bool {
        self.flag(LOG_KEY)
    }

    /// Requested strategy, if one was named.
    pub fn strategy(&self) -> Option<&str> {
        self.entries.get(STRATEGY_KEY).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// All entries, reserved keys included.
    pub fn entries(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }

    fn flag(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(Value::is_truthy)
    }
}
