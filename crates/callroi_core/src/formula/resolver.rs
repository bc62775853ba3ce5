//! Multi-pass resolution of interdependent named formulas
//!
//! Every pass evaluates each pending formula against the scope as it stood
//! when the pass began, then merges all successes at once. A formula that
//! depends on another resolves one pass later, so a dependency chain of
//! length n needs exactly n passes and the outcome never depends on the
//! iteration order of the formula map.

use std::collections::BTreeMap;

use crate::error::{FormulaError, ResolveError, UnresolvedFormula};

use super::eval::{EvalLimits, evaluate_expr, parse_formula};
use super::parser::Expr;
use super::value::Value;

/// Resolved variables, sorted by name
pub type Scope = BTreeMap<String, Value>;

struct Pending<'a> {
    formula: &'a str,
    parsed: Result<Expr, FormulaError>,
    last_error: Option<FormulaError>,
}

/// Resolve with the default limits (10 passes).
///
/// Returns the inputs merged with every formula value; a formula shadows an
/// input of the same name.
pub fn resolve<'a, F, I>(formulas: F, inputs: I) -> Result<Scope, ResolveError>
where
    F: IntoIterator<Item = (&'a String, &'a String)>,
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    resolve_with_limits(formulas, inputs, &EvalLimits::default())
}

pub fn resolve_with_limits<'a, F, I>(
    formulas: F,
    inputs: I,
    limits: &EvalLimits,
) -> Result<Scope, ResolveError>
where
    F: IntoIterator<Item = (&'a String, &'a String)>,
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let mut scope: Scope = inputs
        .into_iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let mut pending: BTreeMap<String, Pending<'a>> = formulas
        .into_iter()
        .map(|(name, formula)| {
            let parsed = parse_formula(formula, limits);
            (
                name.clone(),
                Pending {
                    formula,
                    parsed,
                    last_error: None,
                },
            )
        })
        .collect();

    let mut passes = 0;
    while !pending.is_empty() && passes < limits.max_passes {
        passes += 1;

        let mut resolved = Vec::new();
        for (name, entry) in pending.iter_mut() {
            let outcome = match &entry.parsed {
                Ok(expr) => evaluate_expr(expr, &scope, limits)
                    .map_err(|fault| fault.into_error(entry.formula)),
                Err(err) => Err(err.clone()),
            };
            match outcome {
                Ok(value) => resolved.push((name.clone(), value)),
                Err(err) => entry.last_error = Some(err),
            }
        }

        tracing::debug!(
            pass = passes,
            resolved = resolved.len(),
            pending = pending.len() - resolved.len(),
            "formula resolver pass"
        );

        if resolved.is_empty() {
            break;
        }

        for (name, value) in resolved {
            pending.remove(&name);
            scope.insert(name, value);
        }
    }

    if pending.is_empty() {
        return Ok(scope);
    }

    let pending = pending
        .into_iter()
        .map(|(name, entry)| {
            let error = entry.last_error.unwrap_or_else(|| FormulaError::InvalidExpression {
                reason: "not evaluated within the pass limit".to_string(),
                formula: entry.formula.to_string(),
            });
            UnresolvedFormula { name, error }
        })
        .collect();

    Err(ResolveError::Unresolved { passes, pending })
}
