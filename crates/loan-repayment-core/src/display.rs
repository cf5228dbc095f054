//! Presentation formatting for repayment figures.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Whole Australian dollars, rounded up, comma-grouped: `850.5 -> "$851"`.
///
/// Values outside the `Decimal` range (including NaN and infinities) are
/// rendered as plain `f64` text.
pub fn format_currency(value: f64) -> String {
    match Decimal::from_f64(value) {
        Some(amount) => format_currency_decimal(amount),
        None => value.to_string(),
    }
}

/// [`format_currency`] for an exact amount.
pub fn format_currency_decimal(amount: Decimal) -> String {
    let whole = amount.ceil();
    let digits = whole.abs().normalize().to_string();
    let grouped = group_with(&digits, ',');
    if whole.is_sign_negative() && !whole.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Space-grouped digits for an amount input field: `"1000000" -> "1 000 000"`.
pub fn group_digits(digits: &str) -> String {
    group_with(digits, ' ')
}

/// A percentage figure with its sign: `5.5 -> "5.5%"`.
pub fn format_percentage(percent: f64) -> String {
    format!("{percent}%")
}

fn group_with(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(42.0), "$42");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(18_000.0), "$18,000");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000");
    }

    #[test]
    fn test_currency_rounds_up() {
        assert_eq!(format_currency(850.5), "$851");
        assert_eq!(format_currency(10_206.0), "$10,206");
        assert_eq!(format_currency(1234.01), "$1,235");
        assert_eq!(format_currency(537.8048780487803), "$538");
    }

    #[test]
    fn test_currency_zero_and_negative() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-0.4), "$0");
        assert_eq!(format_currency(-1500.5), "-$1,500");
    }

    #[test]
    fn test_currency_non_finite_passthrough() {
        assert_eq!(format_currency(f64::NAN), "NaN");
        assert_eq!(format_currency(f64::INFINITY), "inf");
    }

    #[test]
    fn test_currency_decimal() {
        assert_eq!(format_currency_decimal(dec!(20_000_000)), "$20,000,000");
        assert_eq!(format_currency_decimal(dec!(999.01)), "$1,000");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("123"), "123");
        assert_eq!(group_digits("1000"), "1 000");
        assert_eq!(group_digits("1000000"), "1 000 000");
        assert_eq!(group_digits(""), "");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(10.0), "10%");
        assert_eq!(format_percentage(0.0), "0%");
    }
}
