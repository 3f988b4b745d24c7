//! Running the callback once per row.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::error::{Failure, Result, WhereError};
use crate::options::Options;
use crate::results::{Aggregator, Outcome, Results};
use crate::scope::Scope;
use crate::strategy::{Raised, Strategy};
use crate::table::ParsedTable;

thread_local! {
    static SILENCE_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Keeps the panic hook quiet on this thread while intercepting.
///
/// The wrapping hook is installed once and defers to whatever hook was
/// set before it whenever the flag is off.
struct PanicSilencer {
    previous: bool,
}

impl PanicSilencer {
    fn enter(silence: bool) -> Self {
        QUIET_HOOK.call_once(|| {
            let next = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                if !SILENCE_PANICS.with(Cell::get) {
                    next(info);
                }
            }));
        });
        let previous = SILENCE_PANICS.with(|flag| flag.replace(silence));
        Self { previous }
    }
}

impl Drop for PanicSilencer {
    fn drop(&mut self) {
        SILENCE_PANICS.with(|flag| flag.set(self.previous));
    }
}

/// Whether panics on this thread currently skip the panic hook.
pub(crate) fn panics_silenced() -> bool {
    SILENCE_PANICS.with(Cell::get)
}

/// Executes `body` for every row of `table`, in order.
///
/// A row fails when it records soft failures through [`Scope::soft`] or
/// returns one; every failure of the row ends up in its detail, in order.
/// Without interception the first failing row ends the run with
/// [`WhereError::Assertion`] and a panic unwinds to the caller. With
/// interception both are recorded as failing outcomes and caught panics
/// are not printed by the panic hook.
pub(crate) fn execute<F>(
    table: ParsedTable,
    options: &Options,
    strategy: &dyn Strategy,
    mut body: F,
) -> Result<Results>
where
    F: FnMut(&Scope<'_>) -> std::result::Result<(), Failure>,
{
    let intercept = options.intercept();
    let log = options.log();
    let mut aggregator = Aggregator::new(&table);
    let _silencer = PanicSilencer::enter(intercept);

    tracing::debug!(
        rows = table.len(),
        strategy = strategy.name(),
        intercept,
        "executing table"
    );

    for (index, row) in table.values.iter().enumerate() {
        let scope = Scope::new(&table.labels, row, index, options, strategy);

        let returned = if intercept {
            match panic::catch_unwind(AssertUnwindSafe(|| body(&scope))) {
                Ok(result) => result.map_err(Raised::Failure),
                Err(payload) => Err(Raised::Panic(payload)),
            }
        } else {
            body(&scope).map_err(Raised::Failure)
        };

        let mut raised: Vec<Raised> = scope
            .take_failures()
            .into_iter()
            .map(Raised::Failure)
            .collect();
        if let Err(last) = returned {
            raised.push(last);
        }

        if raised.is_empty() {
            let detail = strategy.pass_detail();
            let message = aggregator.render(&table.labels, row, &detail);
            let outcome = aggregator.pass(Outcome {
                index,
                row: row.clone(),
                message,
                error: None,
            });
            if log {
                tracing::info!(row = index + 1, "{}", outcome.message);
            }
        } else {
            let detail = raised
                .iter()
                .map(|r| strategy.describe(r))
                .collect::<Vec<_>>()
                .join(" ");
            let message = aggregator.render(&table.labels, row, &detail);
            if !intercept {
                if log {
                    tracing::warn!(row = index + 1, "{message}");
                }
                return Err(WhereError::Assertion {
                    row: index + 1,
                    message,
                });
            }
            let outcome = aggregator.fail(Outcome {
                index,
                row: row.clone(),
                message,
                error: Some(detail),
            });
            if log {
                tracing::warn!(row = index + 1, "{}", outcome.message);
            }
        }
    }

    Ok(aggregator.finish(table))
}
