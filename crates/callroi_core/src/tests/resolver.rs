//! Tests for multi-pass formula resolution

use std::collections::{BTreeMap, HashMap};

use crate::error::{FormulaError, ResolveError};
use crate::formula::{EvalLimits, Scope, Value, resolve, resolve_with_limits};

fn formulas(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(name, formula)| (name.to_string(), formula.to_string()))
        .collect()
}

fn inputs(pairs: &[(&str, f64)]) -> Scope {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), Value::Number(*value)))
        .collect()
}

/// `step_01 = x + 1`, `step_02 = step_01 + 1`, ...
fn chain(len: usize) -> BTreeMap<String, String> {
    (1..=len)
        .map(|i| {
            let formula = if i == 1 {
                "x + 1".to_string()
            } else {
                format!("step_{:02} + 1", i - 1)
            };
            (format!("step_{i:02}"), formula)
        })
        .collect()
}

#[test]
fn test_dependent_formulas_resolve() {
    let scope = resolve(
        &formulas(&[("a", "x+1"), ("b", "a*2")]),
        &inputs(&[("x", 3.0)]),
    )
    .unwrap();

    assert_eq!(scope["a"], Value::Number(4.0));
    assert_eq!(scope["b"], Value::Number(8.0));
    assert_eq!(scope["x"], Value::Number(3.0));
}

#[test]
fn test_result_independent_of_declaration_order() {
    let vars = inputs(&[("x", 3.0)]);
    let forward = formulas(&[("a", "x+1"), ("b", "a*2"), ("c", "b - a")]);
    let reverse = formulas(&[("c", "b - a"), ("b", "a*2"), ("a", "x+1")]);
    let sorted: BTreeMap<String, String> = forward.clone().into_iter().collect();

    let expected = resolve(&forward, &vars).unwrap();
    assert_eq!(resolve(&reverse, &vars).unwrap(), expected);
    assert_eq!(resolve(&sorted, &vars).unwrap(), expected);
    assert_eq!(expected["c"], Value::Number(4.0));
}

#[test]
fn test_cycle_names_every_member() {
    let err = resolve(&formulas(&[("a", "b+1"), ("b", "a+1")]), &inputs(&[])).unwrap_err();

    assert_eq!(err.unresolved_names(), vec!["a", "b"]);
    let ResolveError::Unresolved { pending, .. } = err;
    assert!(
        pending
            .iter()
            .all(|p| matches!(p.error, FormulaError::UndefinedVariable { .. }))
    );
}

#[test]
fn test_missing_dependency_is_reported_with_cause() {
    let err = resolve(
        &formulas(&[("ok", "x * 2"), ("stuck", "ok + ghost")]),
        &inputs(&[("x", 1.0)]),
    )
    .unwrap_err();

    let ResolveError::Unresolved { pending, .. } = err;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].name, "stuck");
    assert!(matches!(
        pending[0].error,
        FormulaError::UndefinedVariable { ref name, .. } if name == "ghost"
    ));
}

#[test]
fn test_failing_formula_keeps_its_error() {
    let err = resolve(&formulas(&[("bad", "x / 0")]), &inputs(&[("x", 1.0)])).unwrap_err();

    let ResolveError::Unresolved { pending, .. } = err;
    assert!(matches!(pending[0].error, FormulaError::DivisionByZero { .. }));
}

#[test]
fn test_chain_of_ten_resolves() {
    let scope = resolve(&chain(10), &inputs(&[("x", 0.0)])).unwrap();
    assert_eq!(scope["step_10"], Value::Number(10.0));
}

#[test]
fn test_chain_of_eleven_exceeds_pass_limit() {
    let err = resolve(&chain(11), &inputs(&[("x", 0.0)])).unwrap_err();

    assert_eq!(err.unresolved_names(), vec!["step_11"]);
    let ResolveError::Unresolved { passes, .. } = err;
    assert_eq!(passes, 10);
}

#[test]
fn test_pass_limit_is_configurable() {
    let limits = EvalLimits {
        max_passes: 12,
        ..EvalLimits::default()
    };
    let scope = resolve_with_limits(&chain(11), &inputs(&[("x", 0.0)]), &limits).unwrap();
    assert_eq!(scope["step_11"], Value::Number(11.0));
}

#[test]
fn test_formula_shadows_input() {
    let scope = resolve(&formulas(&[("x", "10")]), &inputs(&[("x", 1.0)])).unwrap();
    assert_eq!(scope["x"], Value::Number(10.0));
}

#[test]
fn test_empty_formula_set_returns_inputs() {
    let vars = inputs(&[("x", 1.0), ("y", 2.0)]);
    let scope = resolve(&formulas(&[]), &vars).unwrap();
    assert_eq!(scope, vars);
}
