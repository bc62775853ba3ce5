//! The closed set of functions callable from formulas

use super::eval::{EvalLimits, Fault};
use super::value::Value;

/// Every function name a formula may call
pub const FUNCTIONS: [&str; 14] = [
    "abs", "round", "min", "max", "sum", "len", "pow", "sqrt", "ceil", "floor", "avg", "npv",
    "pmt", "range",
];

pub fn is_function(name: &str) -> bool {
    FUNCTIONS.contains(&name)
}

/// Call an allow-listed function with already-evaluated arguments
pub(crate) fn call(name: &str, args: Vec<Value>, limits: &EvalLimits) -> Result<Value, Fault> {
    match name {
        "abs" => Ok(Value::Number(one_number(name, &args)?.abs())),
        "round" => round(&args),
        "min" => extremum(name, args, f64::min),
        "max" => extremum(name, args, f64::max),
        "sum" => Ok(Value::Number(one_list(name, &args)?.iter().sum())),
        "len" => Ok(Value::Number(one_list(name, &args)?.len() as f64)),
        "avg" => {
            let items = one_list(name, &args)?;
            if items.is_empty() {
                Ok(Value::Number(0.0))
            } else {
                Ok(Value::Number(items.iter().sum::<f64>() / items.len() as f64))
            }
        }
        "pow" => {
            let [base, exponent] = numbers::<2>(name, &args)?;
            power(base, exponent).map(Value::Number)
        }
        "sqrt" => {
            let x = one_number(name, &args)?;
            if x < 0.0 {
                return Err(Fault::invalid("sqrt() of a negative number"));
            }
            Ok(Value::Number(x.sqrt()))
        }
        "ceil" => Ok(Value::Number(one_number(name, &args)?.ceil())),
        "floor" => Ok(Value::Number(one_number(name, &args)?.floor())),
        "npv" => npv(&args),
        "pmt" => {
            let [rate, periods, pv] = numbers::<3>(name, &args)?;
            let growth = power(1.0 + rate, periods)?;
            let denominator = growth - 1.0;
            if denominator == 0.0 {
                return Err(Fault::DivisionByZero);
            }
            Ok(Value::Number(pv * (rate * growth) / denominator))
        }
        "range" => range(&args, limits),
        _ => Err(Fault::invalid(format!("function '{name}' is not allowed"))),
    }
}

/// `base ** exponent` with the fault rules shared by `**` and `pow()`
pub(crate) fn power(base: f64, exponent: f64) -> Result<f64, Fault> {
    if base == 0.0 && exponent < 0.0 {
        return Err(Fault::DivisionByZero);
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(Fault::invalid(
            "fractional power of a negative number is not a real number",
        ));
    }
    let result = base.powf(exponent);
    if result.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(Fault::invalid("numeric overflow in power"));
    }
    Ok(result)
}

fn arity(name: &str, args: &[Value], expected: usize) -> Result<(), Fault> {
    if args.len() != expected {
        return Err(Fault::invalid(format!(
            "{name}() takes {expected} argument(s), got {}",
            args.len()
        )));
    }
    Ok(())
}

fn number(name: &str, value: &Value) -> Result<f64, Fault> {
    value.as_number().ok_or_else(|| {
        Fault::invalid(format!(
            "{name}() expects a number, got a {}",
            value.type_name()
        ))
    })
}

fn one_number(name: &str, args: &[Value]) -> Result<f64, Fault> {
    arity(name, args, 1)?;
    number(name, &args[0])
}

fn numbers<const N: usize>(name: &str, args: &[Value]) -> Result<[f64; N], Fault> {
    arity(name, args, N)?;
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = number(name, arg)?;
    }
    Ok(out)
}

fn one_list<'a>(name: &str, args: &'a [Value]) -> Result<&'a [f64], Fault> {
    arity(name, args, 1)?;
    args[0].as_list().ok_or_else(|| {
        Fault::invalid(format!("{name}() expects a list, got a {}", args[0].type_name()))
    })
}

fn integer(name: &str, value: &Value) -> Result<i64, Fault> {
    let n = number(name, value)?;
    if n.fract() != 0.0 || !n.is_finite() {
        return Err(Fault::invalid(format!(
            "{name}() expects an integer, got {n}"
        )));
    }
    Ok(n as i64)
}

fn round(args: &[Value]) -> Result<Value, Fault> {
    match args {
        [x] => Ok(Value::Number(number("round", x)?.round_ties_even())),
        [x, digits] => {
            let x = number("round", x)?;
            let digits = integer("round", digits)?;
            let digits = i32::try_from(digits).map_err(|_| {
                Fault::invalid(format!("round() digits out of range: {digits}"))
            })?;
            Ok(Value::Number(round_to(x, digits)))
        }
        _ => Err(Fault::invalid(format!(
            "round() takes 1 or 2 arguments, got {}",
            args.len()
        ))),
    }
}

/// Round to `digits` decimal places; beyond f64 precision the value is kept
/// and beyond its range it collapses to a signed zero
fn round_to(x: f64, digits: i32) -> f64 {
    if digits > f64::MAX_10_EXP {
        return x;
    }
    if digits < -f64::MAX_10_EXP {
        return 0.0 * x;
    }
    if digits < 0 {
        let scale = 10f64.powi(-digits);
        return (x / scale).round_ties_even() * scale;
    }
    let scale = 10f64.powi(digits);
    let scaled = x * scale;
    if !scaled.is_finite() {
        return x;
    }
    scaled.round_ties_even() / scale
}

/// `min`/`max` over a single list or two or more numbers
fn extremum(name: &str, args: Vec<Value>, pick: fn(f64, f64) -> f64) -> Result<Value, Fault> {
    let items: Vec<f64> = match args.as_slice() {
        [] => return Err(Fault::invalid(format!("{name}() expects at least 1 argument"))),
        [Value::List(items)] => items.clone(),
        [Value::Number(_)] => {
            return Err(Fault::invalid(format!(
                "{name}() of a single number; pass a list or several numbers"
            )));
        }
        many => many
            .iter()
            .map(|v| number(name, v))
            .collect::<Result<_, _>>()?,
    };

    items
        .into_iter()
        .reduce(pick)
        .map(Value::Number)
        .ok_or_else(|| Fault::invalid(format!("{name}() of an empty list")))
}

/// Cash flows discounted from index 0: `sum(cf_i / (1 + rate)^i)`
fn npv(args: &[Value]) -> Result<Value, Fault> {
    arity("npv", args, 2)?;
    let rate = number("npv", &args[0])?;
    let cashflows = args[1]
        .as_list()
        .ok_or_else(|| Fault::invalid("npv() expects a list of cash flows"))?;

    let mut total = 0.0;
    for (i, cf) in cashflows.iter().enumerate() {
        let factor = power(1.0 + rate, i as f64)?;
        if factor == 0.0 {
            return Err(Fault::DivisionByZero);
        }
        total += cf / factor;
    }
    Ok(Value::Number(total))
}

fn range(args: &[Value], limits: &EvalLimits) -> Result<Value, Fault> {
    let (start, stop, step) = match args {
        [stop] => (0, integer("range", stop)?, 1),
        [start, stop] => (integer("range", start)?, integer("range", stop)?, 1),
        [start, stop, step] => (
            integer("range", start)?,
            integer("range", stop)?,
            integer("range", step)?,
        ),
        _ => {
            return Err(Fault::invalid(format!(
                "range() takes 1 to 3 arguments, got {}",
                args.len()
            )));
        }
    };

    if step == 0 {
        return Err(Fault::invalid("range() step must not be zero"));
    }

    let span = if step > 0 {
        stop.saturating_sub(start)
    } else {
        start.saturating_sub(stop)
    };
    let len = if span <= 0 {
        0
    } else {
        (span.unsigned_abs() - 1) / step.unsigned_abs() + 1
    };
    if len > limits.max_range_len as u64 {
        return Err(Fault::invalid(format!(
            "range() of {len} elements exceeds the limit of {}",
            limits.max_range_len
        )));
    }

    Ok(Value::List(
        (0..len as i64).map(|i| (start + i * step) as f64).collect(),
    ))
}
