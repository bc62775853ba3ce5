/// Insert thousands separators into a non-negative whole number
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

fn sign(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "" }
}

/// Format a currency value with cents
pub fn format_currency(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as u64;
    let dollars = cents_total / 100;
    let cents = cents_total % 100;
    format!("{}${}.{:02}", sign(value), group_thousands(dollars), cents)
}

/// Format a currency value without cents (shorter format for tight columns)
pub fn format_currency_short(value: f64) -> String {
    let dollars = value.abs().round() as u64;
    format!("{}${}", sign(value), group_thousands(dollars))
}

/// Format a value already expressed in percent, with one decimal
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a whole quantity such as minutes with thousands separators
pub fn format_quantity(value: f64) -> String {
    format!("{}{}", sign(value), group_thousands(value.abs().round() as u64))
}

/// Format a plain number, dropping the fraction for whole values
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Format a payback month count
pub fn format_payback(months: Option<u32>) -> String {
    match months {
        Some(1) => "1 month".to_string(),
        Some(m) => format!("{m} months"),
        None => "not within 36 months".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(-1_234_567.891), "-$1,234,567.89");
        assert_eq!(format_currency(999.999), "$1,000.00");
    }

    #[test]
    fn test_format_currency_short() {
        assert_eq!(format_currency_short(146_200.4), "$146,200");
        assert_eq!(format_currency_short(-12.6), "-$13");
        assert_eq!(format_currency_short(100.0), "$100");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(43.0), "43.0%");
        assert_eq!(format_percent(12.345), "12.3%");
    }

    #[test]
    fn test_format_quantity_and_number() {
        assert_eq!(format_quantity(400_000.0), "400,000");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(2.117_647), "2.12");
    }

    #[test]
    fn test_format_payback() {
        assert_eq!(format_payback(Some(1)), "1 month");
        assert_eq!(format_payback(Some(7)), "7 months");
        assert_eq!(format_payback(None), "not within 36 months");
    }
}
