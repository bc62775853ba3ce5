use std::fmt;

/// Errors raised while validating a deal scenario.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("volume shares must sum to 1.0, got {total}")]
    VolumeShares { total: f64 },

    #[error("expected between {min} and {max} intents, got {count}")]
    IntentCount { count: usize, min: usize, max: usize },

    #[error("{field} must be greater than 0, got {value}")]
    NotPositive { field: String, value: f64 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: String, value: f64 },

    #[error("{field} cannot be empty")]
    Empty { field: String },
}

/// Errors raised while evaluating a single formula.
///
/// Every variant carries the formula text it came from.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormulaError {
    #[error("variable not defined: '{name}' in formula '{formula}'")]
    UndefinedVariable { name: String, formula: String },

    #[error("invalid formula '{formula}': {reason}")]
    InvalidExpression { reason: String, formula: String },

    #[error("division by zero in formula '{formula}'")]
    DivisionByZero { formula: String },
}

impl FormulaError {
    /// The formula text this error was raised for
    pub fn formula(&self) -> &str {
        match self {
            FormulaError::UndefinedVariable { formula, .. }
            | FormulaError::InvalidExpression { formula, .. }
            | FormulaError::DivisionByZero { formula } => formula,
        }
    }
}

/// A formula the resolver could not evaluate, with the last error it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedFormula {
    pub name: String,
    pub error: FormulaError,
}

impl fmt::Display for UnresolvedFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.error)
    }
}

/// Errors raised by the dependency resolver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("could not evaluate formulas after {passes} passes: {}", list_names(.pending))]
    Unresolved {
        passes: usize,
        pending: Vec<UnresolvedFormula>,
    },
}

impl ResolveError {
    /// Names of every formula left unresolved, in sorted order
    pub fn unresolved_names(&self) -> Vec<&str> {
        match self {
            ResolveError::Unresolved { pending, .. } => {
                pending.iter().map(|p| p.name.as_str()).collect()
            }
        }
    }
}

fn list_names(pending: &[UnresolvedFormula]) -> String {
    pending
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised when running a calculator configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculatorError {
    #[error("required input '{id}' was not provided")]
    MissingInput { id: String },

    #[error("input '{id}' must be between {min} and {max}, got {value}")]
    InputOutOfRange {
        id: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("formula '{name}' references unknown names: {}", .unknown.join(", "))]
    UnknownReferences { name: String, unknown: Vec<String> },

    #[error("formula '{name}' is invalid: {source}")]
    InvalidFormula {
        name: String,
        #[source]
        source: FormulaError,
    },

    #[error("calculator template '{0}' not found")]
    TemplateNotFound(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
