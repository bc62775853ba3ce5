//! `name=value` command-line assignments

use callroi_core::formula::Value;

fn split_assignment(arg: &str) -> Result<(String, &str), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{arg}'"));
    }
    Ok((name.to_string(), value.trim()))
}

/// Parse `name=number`, as used by `calc --set`
pub fn parse_number_assignment(arg: &str) -> Result<(String, f64), String> {
    let (name, value) = split_assignment(arg)?;
    let number = value
        .parse::<f64>()
        .map_err(|_| format!("'{value}' is not a number"))?;
    Ok((name, number))
}

/// Parse `name=value` where value is a number or a JSON list of numbers,
/// as used by `eval --var`
pub fn parse_value_assignment(arg: &str) -> Result<(String, Value), String> {
    let (name, value) = split_assignment(arg)?;
    let parsed = serde_json::from_str::<Value>(value)
        .map_err(|_| format!("'{value}' is not a number or a list of numbers"))?;
    Ok((name, parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_assignment() {
        assert_eq!(
            parse_number_assignment("hourly_rate=45.5").unwrap(),
            ("hourly_rate".to_string(), 45.5)
        );
        assert_eq!(
            parse_number_assignment(" calls = 100 ").unwrap(),
            ("calls".to_string(), 100.0)
        );
        assert!(parse_number_assignment("calls").is_err());
        assert!(parse_number_assignment("=5").is_err());
        assert!(parse_number_assignment("calls=many").is_err());
    }

    #[test]
    fn test_value_assignment() {
        assert_eq!(
            parse_value_assignment("rate=0.08").unwrap(),
            ("rate".to_string(), Value::Number(0.08))
        );
        assert_eq!(
            parse_value_assignment("flows=[-100, 60, 60]").unwrap(),
            ("flows".to_string(), Value::List(vec![-100.0, 60.0, 60.0]))
        );
        assert!(parse_value_assignment("flows=[\"a\"]").is_err());
    }
}
