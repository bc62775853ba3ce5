//! Tests for the formula evaluator

use std::collections::HashMap;

use rustc_hash::FxHashMap;

use crate::error::FormulaError;
use crate::formula::{EvalLimits, Value, evaluate, evaluate_with_limits, extract_variables};

fn scope(pairs: &[(&str, f64)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), Value::Number(*value)))
        .collect()
}

#[test]
fn test_product_of_two_variables() {
    let vars = scope(&[("annual_calls", 100_000.0), ("cost_per_call", 0.5)]);
    assert_eq!(
        evaluate("annual_calls * cost_per_call", &vars),
        Ok(Value::Number(50_000.0))
    );
}

#[test]
fn test_division_by_zero() {
    let err = evaluate("x/0", &scope(&[("x", 1.0)])).unwrap_err();
    assert_eq!(
        err,
        FormulaError::DivisionByZero {
            formula: "x/0".to_string()
        }
    );
}

#[test]
fn test_undefined_variable() {
    let err = evaluate("undefined_name", &scope(&[])).unwrap_err();
    assert_eq!(
        err,
        FormulaError::UndefinedVariable {
            name: "undefined_name".to_string(),
            formula: "undefined_name".to_string(),
        }
    );
}

#[test]
fn test_works_with_fx_hash_map() {
    let mut vars: FxHashMap<String, Value> = FxHashMap::default();
    vars.insert("flows".to_string(), Value::List(vec![100.0, 200.0, 300.0]));
    vars.insert("n".to_string(), Value::Number(3.0));

    assert_eq!(evaluate("sum(flows) / n", &vars), Ok(Value::Number(200.0)));
    assert_eq!(evaluate("len(flows)", &vars), Ok(Value::Number(3.0)));
}

#[test]
fn test_financial_functions() {
    let vars = scope(&[("rate", 0.1)]);

    let npv = evaluate("npv(rate, [-100, 55, 60.5])", &vars).unwrap();
    assert!((npv.as_number().unwrap() - 0.0).abs() < 1e-9);

    let payment = evaluate("round(pmt(0.05 / 12, 360, 200000), 2)", &vars).unwrap();
    assert_eq!(payment, Value::Number(1073.64));
}

#[test]
fn test_list_results() {
    let vars = scope(&[]);
    assert_eq!(
        evaluate("range(1, 4)", &vars),
        Ok(Value::List(vec![1.0, 2.0, 3.0]))
    );
    assert_eq!(
        evaluate("[1 + 1, max(2, 5)]", &vars),
        Ok(Value::List(vec![2.0, 5.0]))
    );
    assert_eq!(evaluate("avg(range(0))", &vars), Ok(Value::Number(0.0)));
}

#[test]
fn test_disallowed_constructs_are_invalid() {
    let vars = scope(&[("x", 1.0)]);
    for formula in [
        "__import__('os')",
        "x.real",
        "x = 2",
        "open(1)",
        "lambda: 1",
        "[x for x in range(3)]",
        "sqrt(-1)",
        "(-8) ** 0.5",
        "min()",
        "sum(x)",
        "1 +",
    ] {
        let err = evaluate(formula, &vars).unwrap_err();
        assert!(
            matches!(err, FormulaError::InvalidExpression { .. }),
            "{formula} gave {err:?}"
        );
        assert_eq!(err.formula(), formula);
    }
}

#[test]
fn test_range_is_bounded() {
    let vars = scope(&[]);
    assert!(evaluate("len(range(10000))", &vars).is_ok());
    assert!(matches!(
        evaluate("len(range(10001))", &vars),
        Err(FormulaError::InvalidExpression { .. })
    ));

    let tight = EvalLimits {
        max_range_len: 5,
        ..EvalLimits::default()
    };
    assert!(evaluate_with_limits("range(6)", &vars, &tight).is_err());
}

#[test]
fn test_deep_nesting_is_rejected() {
    let vars = scope(&[]);
    let formula = format!("{}1{}", "abs(".repeat(80), ")".repeat(80));
    assert!(matches!(
        evaluate(&formula, &vars),
        Err(FormulaError::InvalidExpression { .. })
    ));

    let negations = format!("{}1", "-".repeat(200));
    assert!(evaluate(&negations, &vars).is_err());
}

#[test]
fn test_long_flat_chain_is_rejected_not_evaluated() {
    let vars = scope(&[]);

    let formula = format!("1{}", "+1".repeat(2047));
    assert!(formula.len() < EvalLimits::default().max_formula_len);
    assert!(matches!(
        evaluate(&formula, &vars),
        Err(FormulaError::InvalidExpression { .. })
    ));

    let product = format!("2{}", "*1".repeat(2047));
    assert!(matches!(
        evaluate(&product, &vars),
        Err(FormulaError::InvalidExpression { .. })
    ));

    let short = format!("1{}", "+1".repeat(40));
    assert_eq!(evaluate(&short, &vars), Ok(Value::Number(41.0)));
}

#[test]
fn test_variables_shadow_nothing_but_themselves() {
    // A variable named like a function still resolves as a variable
    let vars = scope(&[("sum", 4.0)]);
    assert_eq!(evaluate("sum * 2", &vars), Ok(Value::Number(8.0)));
}

#[test]
fn test_extract_variables_sorted_and_deduplicated() {
    let names = extract_variables("b + a * b / max(c, 1)").unwrap();
    assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);

    assert!(extract_variables("a +").is_err());
}
