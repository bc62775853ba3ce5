//! Sandboxed formula evaluation.
//!
//! Formulas are arithmetic expressions over named variables with a fixed set
//! of callable functions. They are tokenized, parsed into an [`Expr`] tree and
//! interpreted; there is no path to arbitrary code.
//!
//! ```ignore
//! use callroi_core::formula::{evaluate, resolve};
//!
//! let value = evaluate("annual_calls * cost_per_call", &vars)?;
//! let scope = resolve(&formulas, &inputs)?;   // inputs + every formula value
//! ```

mod eval;
mod functions;
mod lexer;
mod parser;
mod resolver;
mod value;

pub use eval::{
    EvalLimits, VariableSource, evaluate, evaluate_with_limits, extract_variables, parse_formula,
    validate_formula,
};
pub use functions::{FUNCTIONS, is_function};
pub use parser::{BinaryOp, CompareOp, Expr, UnaryOp};
pub use resolver::{Scope, resolve, resolve_with_limits};
pub use value::Value;
