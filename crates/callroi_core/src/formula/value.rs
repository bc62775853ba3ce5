use std::fmt;

use serde::{Deserialize, Serialize};

/// A formula value: a number or a flat list of numbers.
///
/// Serializes untagged, so `3.5` and `[1, 2, 3]` are both valid in JSON/YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    List(Vec<f64>),
}

impl Value {
    /// Get the number if this is a scalar
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::List(_) => None,
        }
    }

    /// Get the elements if this is a list
    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            Value::Number(_) => None,
            Value::List(items) => Some(items),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::List(_) => "list",
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Value::List(items)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}
