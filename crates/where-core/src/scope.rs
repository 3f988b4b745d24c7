//! Per-row binding environment handed to the callback.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::Failure;
use crate::options::{Options, STRATEGY_KEY};
use crate::strategy::Strategy;
use crate::value::{Value, to_precision};

/// Names visible to one callback invocation.
///
/// Built fresh for every row: option entries first, then the active
/// strategy's name under `strategy` (unless an option already sets it), then
/// the row's labels, which shadow everything else.
pub struct Scope<'a> {
    env: BTreeMap<String, Value>,
    labels: &'a [String],
    row_index: usize,
    strategy: &'a dyn Strategy,
    deferred: RefCell<Vec<Failure>>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        labels: &'a [String],
        row: &[Value],
        row_index: usize,
        options: &Options,
        strategy: &'a dyn Strategy,
    ) -> Self {
        let mut env = options.entries().clone();
        env.entry(STRATEGY_KEY.to_string())
            .or_insert_with(|| Value::from(strategy.name()));
        for (label, value) in labels.iter().zip(row) {
            env.insert(label.clone(), value.clone());
        }
        Self {
            env,
            labels,
            row_index,
            strategy,
            deferred: RefCell::new(Vec::new()),
        }
    }

    /// Looks up a binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.env.get(name)
    }

    /// Looks up a binding, failing the row if it is missing.
    pub fn value(&self, name: &str) -> Result<&Value, Failure> {
        self.get(name).ok_or_else(|| Failure::Unbound {
            name: name.to_string(),
        })
    }

    /// Reads a numeric binding.
    pub fn number(&self, name: &str) -> Result<f64, Failure> {
        let value = self.value(name)?;
        value.as_f64().ok_or_else(|| Failure::NotANumber {
            name: name.to_string(),
            value: value.clone(),
        })
    }

    /// Reads any binding as its printed text.
    pub fn string(&self, name: &str) -> Result<String, Failure> {
        self.value(name).map(ToString::to_string)
    }

    /// Labels of the table, in column order.
    pub fn labels(&self) -> &[String] {
        self.labels
    }

    /// Zero-based index of the row being executed.
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy
    }

    /// Starts an assertion on `actual` through the active strategy.
    pub fn expect(&self, actual: impl Into<Value>) -> Expectation<'_> {
        Expectation {
            strategy: self.strategy,
            actual: actual.into(),
            deferred: None,
        }
    }

    /// Starts an assertion whose failure is recorded instead of returned.
    ///
    /// The row keeps running; every recorded failure is reported for the
    /// row once the callback finishes, followed by any failure it returns.
    pub fn soft(&self, actual: impl Into<Value>) -> Expectation<'_> {
        Expectation {
            strategy: self.strategy,
            actual: actual.into(),
            deferred: Some(&self.deferred),
        }
    }

    /// Drains the failures recorded by [`Scope::soft`].
    pub(crate) fn take_failures(&self) -> Vec<Failure> {
        self.deferred.take()
    }

    /// Asserts equality through the active strategy.
    pub fn assert_eq(
        &self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
    ) -> Result<(), Failure> {
        self.strategy.assert(&actual.into(), &expected.into())
    }
}

/// Pending assertion created by [`Scope::expect`].
#[must_use = "an expectation does nothing until a matcher is called"]
pub struct Expectation<'s> {
    strategy: &'s dyn Strategy,
    actual: Value,
    deferred: Option<&'s RefCell<Vec<Failure>>>,
}

impl Expectation<'_> {
    pub fn to_be(self, expected: impl Into<Value>) -> Result<(), Failure> {
        let result = self.strategy.assert(&self.actual, &expected.into());
        settle(self.deferred, result)
    }

    pub fn not_to_be(self, expected: impl Into<Value>) -> Result<(), Failure> {
        let result = self.strategy.assert_not(&self.actual, &expected.into());
        settle(self.deferred, result)
    }

    /// Rounds a numeric actual to `digits` significant digits before comparing.
    pub fn to_be_close_to(self, expected: impl Into<Value>, digits: usize) -> Result<(), Failure> {
        let actual = match self.actual {
            Value::Number(n) => Value::Number(to_precision(n, digits)),
            other => other,
        };
        let result = self.strategy.assert(&actual, &expected.into());
        settle(self.deferred, result)
    }
}

fn settle(
    deferred: Option<&RefCell<Vec<Failure>>>,
    result: Result<(), Failure>,
) -> Result<(), Failure> {
    match (deferred, result) {
        (Some(failures), Err(failure)) => {
            failures.borrow_mut().push(failure);
            Ok(())
        }
        (_, result) => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::ExpectStrategy;

    fn labels() -> Vec<String> {
        vec!["a".to_string(), "strategy".to_string()]
    }

    #[test]
    fn test_labels_shadow_options() {
        let labels = labels();
        let row = vec![Value::Number(1.0), Value::from("mine")];
        let options = Options::new().with("a", "context").with("extra", true);
        let scope = Scope::new(&labels, &row, 0, &options, &ExpectStrategy);

        assert_eq!(scope.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(scope.get("strategy"), Some(&Value::from("mine")));
        assert_eq!(scope.get("extra"), Some(&Value::Bool(true)));
        assert_eq!(scope.labels().len(), 2);
    }

    #[test]
    fn test_strategy_name_is_bound() {
        let labels = vec!["x".to_string()];
        let row = vec![Value::Null];
        let options = Options::new();
        let scope = Scope::new(&labels, &row, 3, &options, &ExpectStrategy);

        assert_eq!(scope.get("strategy"), Some(&Value::from("expect")));
        assert_eq!(scope.row_index(), 3);
    }

    #[test]
    fn test_typed_reads() {
        let labels = vec!["n".to_string(), "s".to_string()];
        let row = vec![Value::Number(2.5), Value::from("txt")];
        let options = Options::new();
        let scope = Scope::new(&labels, &row, 0, &options, &ExpectStrategy);

        assert_eq!(scope.number("n"), Ok(2.5));
        assert!(matches!(scope.number("s"), Err(Failure::NotANumber { .. })));
        assert!(matches!(scope.value("nope"), Err(Failure::Unbound { .. })));
        assert_eq!(scope.string("n"), Ok("2.5".to_string()));
    }

    #[test]
    fn test_expectations() {
        let labels = vec!["a".to_string()];
        let row = vec![Value::Number(0.1)];
        let options = Options::new();
        let scope = Scope::new(&labels, &row, 0, &options, &ExpectStrategy);

        assert!(scope.expect(1).to_be(1).is_ok());
        assert!(scope.expect(1).not_to_be(2).is_ok());
        assert!(scope.expect(0.1 + 0.2).to_be(0.3).is_err());
        assert!(scope.expect(0.1 + 0.2).to_be_close_to(0.3, 1).is_ok());
        assert_eq!(
            scope.assert_eq(8, 7).unwrap_err().to_string(),
            "Expected 8 to be 7."
        );
    }

    #[test]
    fn test_soft_expectations_record_and_continue() {
        let labels = vec!["a".to_string()];
        let row = vec![Value::Number(2.0)];
        let options = Options::new();
        let scope = Scope::new(&labels, &row, 0, &options, &ExpectStrategy);

        assert!(scope.soft(451).to_be(4451).is_ok());
        assert!(scope.soft(2).to_be(2).is_ok());
        assert!(scope.soft(2).not_to_be(2).is_ok());

        let failures: Vec<String> = scope
            .take_failures()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            failures,
            vec!["Expected 451 to be 4451.", "Expected 2 not to be 2."]
        );
        assert!(scope.take_failures().is_empty());
    }
}
