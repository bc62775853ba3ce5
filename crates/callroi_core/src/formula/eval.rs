//! Tree-walking interpreter for parsed formulas

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::BuildHasher;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::FormulaError;

use super::functions::{self, is_function, power};
use super::lexer::tokenize;
use super::parser::{BinaryOp, CompareOp, Expr, UnaryOp, parse};
use super::value::Value;

/// Admission limits applied to every formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalLimits {
    /// Maximum formula length in bytes
    pub max_formula_len: usize,
    /// Maximum expression depth, counting both nesting and chained operators
    pub max_depth: usize,
    /// Maximum number of elements `range()` may produce
    pub max_range_len: usize,
    /// Maximum number of resolver passes
    pub max_passes: usize,
}

impl Default for EvalLimits {
    fn default() -> Self {
        Self {
            max_formula_len: 4096,
            max_depth: 64,
            max_range_len: 10_000,
            max_passes: 10,
        }
    }
}

/// Read-only variable lookup used during evaluation
pub trait VariableSource {
    fn lookup(&self, name: &str) -> Option<&Value>;
}

impl<S: BuildHasher> VariableSource for HashMap<String, Value, S> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl VariableSource for BTreeMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Evaluation fault before it is tagged with the formula text
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Fault {
    Undefined(String),
    Invalid(String),
    DivisionByZero,
}

impl Fault {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Fault::Invalid(reason.into())
    }

    pub fn into_error(self, formula: &str) -> FormulaError {
        let formula = formula.to_string();
        match self {
            Fault::Undefined(name) => FormulaError::UndefinedVariable { name, formula },
            Fault::Invalid(reason) => FormulaError::InvalidExpression { reason, formula },
            Fault::DivisionByZero => FormulaError::DivisionByZero { formula },
        }
    }
}

/// Evaluate a formula with the default limits.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use callroi_core::formula::{Value, evaluate};
///
/// let vars = HashMap::from([
///     ("annual_calls".to_string(), Value::Number(100_000.0)),
///     ("cost_per_call".to_string(), Value::Number(0.5)),
/// ]);
/// let result = evaluate("annual_calls * cost_per_call", &vars).unwrap();
/// assert_eq!(result, Value::Number(50_000.0));
/// ```
pub fn evaluate<V: VariableSource + ?Sized>(
    formula: &str,
    variables: &V,
) -> Result<Value, FormulaError> {
    evaluate_with_limits(formula, variables, &EvalLimits::default())
}

pub fn evaluate_with_limits<V: VariableSource + ?Sized>(
    formula: &str,
    variables: &V,
    limits: &EvalLimits,
) -> Result<Value, FormulaError> {
    let expr = parse_formula(formula, limits)?;
    evaluate_expr(&expr, variables, limits).map_err(|fault| fault.into_error(formula))
}

/// Parse a formula without evaluating it
pub fn parse_formula(formula: &str, limits: &EvalLimits) -> Result<Expr, FormulaError> {
    let invalid = |reason: String| FormulaError::InvalidExpression {
        reason,
        formula: formula.to_string(),
    };

    if formula.len() > limits.max_formula_len {
        return Err(invalid(format!(
            "formula is {} bytes, exceeding the limit of {}",
            formula.len(),
            limits.max_formula_len
        )));
    }

    let tokens = tokenize(formula).map_err(invalid)?;
    parse(&tokens, limits.max_depth).map_err(invalid)
}

/// Evaluate an already-parsed expression
pub(crate) fn evaluate_expr<V: VariableSource + ?Sized>(
    expr: &Expr,
    variables: &V,
    limits: &EvalLimits,
) -> Result<Value, Fault> {
    Interpreter { variables, limits }.eval(expr)
}

/// Check that a formula evaluates when every expected variable is bound to 1
pub fn validate_formula<S: AsRef<str>>(
    formula: &str,
    expected_variables: &[S],
) -> Result<(), FormulaError> {
    let variables: FxHashMap<String, Value> = expected_variables
        .iter()
        .map(|name| (name.as_ref().to_string(), Value::Number(1.0)))
        .collect();
    evaluate(formula, &variables).map(|_| ())
}

/// Sorted set of names a formula reads, excluding allow-listed functions
pub fn extract_variables(formula: &str) -> Result<BTreeSet<String>, FormulaError> {
    let expr = parse_formula(formula, &EvalLimits::default())?;
    let mut names = BTreeSet::new();
    expr.for_each_variable(&mut |name| {
        if !is_function(name) {
            names.insert(name.to_string());
        }
    });
    Ok(names)
}

struct Interpreter<'a, V: ?Sized> {
    variables: &'a V,
    limits: &'a EvalLimits,
}

impl<V: VariableSource + ?Sized> Interpreter<'_, V> {
    fn eval(&self, expr: &Expr) -> Result<Value, Fault> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),

            Expr::Variable(name) => match self.variables.lookup(name) {
                Some(value) => Ok(value.clone()),
                None if is_function(name) => Err(Fault::invalid(format!(
                    "'{name}' is a function and cannot be used as a value"
                ))),
                None => Err(Fault::Undefined(name.clone())),
            },

            Expr::List(items) => {
                let values = items
                    .iter()
                    .map(|item| match self.eval(item)? {
                        Value::Number(n) => Ok(n),
                        Value::List(_) => Err(Fault::invalid("nested lists are not supported")),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(values))
            }

            Expr::Unary(op, operand) => {
                let n = self.number(operand, "unary operator")?;
                Ok(Value::Number(match op {
                    UnaryOp::Plus => n,
                    UnaryOp::Neg => -n,
                }))
            }

            Expr::Binary(op, left, right) => {
                let l = self.number(left, "arithmetic")?;
                let r = self.number(right, "arithmetic")?;
                binary(*op, l, r).map(Value::Number)
            }

            Expr::Compare(first, rest) => {
                let mut left = self.eval(first)?;
                for (op, right_expr) in rest {
                    let right = self.eval(right_expr)?;
                    if !compare(*op, &left, &right)? {
                        return Ok(Value::Number(0.0));
                    }
                    left = right;
                }
                Ok(Value::Number(1.0))
            }

            Expr::Call(name, args) => {
                let values = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                functions::call(name, values, self.limits)
            }
        }
    }

    fn number(&self, expr: &Expr, context: &str) -> Result<f64, Fault> {
        match self.eval(expr)? {
            Value::Number(n) => Ok(n),
            Value::List(_) => Err(Fault::invalid(format!(
                "{context} expects numbers, got a list"
            ))),
        }
    }
}

fn binary(op: BinaryOp, l: f64, r: f64) -> Result<f64, Fault> {
    match op {
        BinaryOp::Add => Ok(l + r),
        BinaryOp::Sub => Ok(l - r),
        BinaryOp::Mul => Ok(l * r),
        BinaryOp::Div => {
            if r == 0.0 {
                return Err(Fault::DivisionByZero);
            }
            Ok(l / r)
        }
        BinaryOp::FloorDiv => {
            if r == 0.0 {
                return Err(Fault::DivisionByZero);
            }
            Ok((l / r).floor())
        }
        BinaryOp::Mod => {
            if r == 0.0 {
                return Err(Fault::DivisionByZero);
            }
            // Result takes the sign of the divisor
            let rem = l % r;
            if rem != 0.0 && (rem < 0.0) != (r < 0.0) {
                Ok(rem + r)
            } else {
                Ok(rem)
            }
        }
        BinaryOp::Pow => power(l, r),
    }
}

fn compare(op: CompareOp, left: &Value, right: &Value) -> Result<bool, Fault> {
    if let (Value::Number(l), Value::Number(r)) = (left, right) {
        return Ok(match op {
            CompareOp::Eq => l == r,
            CompareOp::NotEq => l != r,
            CompareOp::Lt => l < r,
            CompareOp::Le => l <= r,
            CompareOp::Gt => l > r,
            CompareOp::Ge => l >= r,
        });
    }

    match op {
        CompareOp::Eq => Ok(left == right),
        CompareOp::NotEq => Ok(left != right),
        _ => Err(Fault::invalid(format!(
            "ordering comparison between {} and {} is not supported",
            left.type_name(),
            right.type_name()
        ))),
    }
}
