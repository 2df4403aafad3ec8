//! Rupiah display formatting.
//!
//! Salaries are stored as display strings such as `Rp8.000.000,00`. Once a
//! value has been formatted it is opaque text for every other component.

/// Sentinel shown for a missing salary.
pub const NOT_AVAILABLE: &str = "Tidak tersedia";

/// Currency prefix. A string starting with it is considered already formatted.
pub const PREFIX: &str = "Rp";

/// A raw amount as it arrives from a spreadsheet cell or a form field.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Missing,
    Int(i128),
    Float(f64),
    Text(String),
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Int(value.into())
    }
}

/// Format an amount as Rupiah.
///
/// Missing, empty and NaN amounts give [`NOT_AVAILABLE`]; strings that already
/// carry the `Rp` prefix pass through unchanged. Anything else is truncated to
/// an integer and grouped with `.` followed by a literal `,00`. A value that
/// cannot be coerced is returned as its own text.
///
/// # Examples
/// ```
/// use alumni::currency::{format_currency, Amount};
///
/// assert_eq!(format_currency(&Amount::Int(8000000)), "Rp8.000.000,00");
/// assert_eq!(format_currency(&Amount::from("Rp1,00")), "Rp1,00");
/// assert_eq!(format_currency(&Amount::Missing), "Tidak tersedia");
/// ```
pub fn format_currency(amount: &Amount) -> String {
    match amount {
        Amount::Missing => NOT_AVAILABLE.to_string(),
        Amount::Int(n) => render(*n),
        Amount::Float(f) if f.is_nan() => NOT_AVAILABLE.to_string(),
        Amount::Float(f) => match truncate(*f) {
            Some(n) => render(n),
            None => f.to_string(),
        },
        Amount::Text(s) if s.is_empty() => NOT_AVAILABLE.to_string(),
        Amount::Text(s) if s.starts_with(PREFIX) => s.clone(),
        Amount::Text(s) => match parse_whole(s.trim()) {
            Some(n) => render(n),
            None => s.clone(),
        },
    }
}

/// Group the digits of `n` in threes with `.` (`-1234567` -> `-1.234.567`).
pub fn group_thousands(n: i128) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if n < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    grouped
}

fn render(n: i128) -> String {
    format!("{}{},00", PREFIX, group_thousands(n))
}

fn truncate(f: f64) -> Option<i128> {
    if !f.is_finite() {
        return None;
    }
    let t = f.trunc();
    if t < i128::MIN as f64 || t > i128::MAX as f64 {
        return None;
    }
    Some(t as i128)
}

/// Parse text as a whole number, exactly when it is an integer literal and
/// truncated when it is a decimal one.
pub fn parse_whole(text: &str) -> Option<i128> {
    text.parse::<i128>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().and_then(truncate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(15000000), "15.000.000");
        assert_eq!(group_thousands(-1234567), "-1.234.567");
        assert_eq!(
            group_thousands(99_999_999_999_999_999_999),
            "99.999.999.999.999.999.999"
        );
    }

    #[test]
    fn large_amounts_keep_every_digit() {
        assert_eq!(
            format_currency(&Amount::from("99999999999999999999")),
            "Rp99.999.999.999.999.999.999,00"
        );
        assert_eq!(parse_whole("12.9"), Some(12));
        assert_eq!(parse_whole("juta"), None);
    }

    #[test]
    fn formats_numbers() {
        assert_eq!(format_currency(&Amount::Int(8000000)), "Rp8.000.000,00");
        assert_eq!(format_currency(&Amount::Float(12000000.9)), "Rp12.000.000,00");
        assert_eq!(format_currency(&Amount::Int(0)), "Rp0,00");
        assert_eq!(format_currency(&Amount::from("5000000")), "Rp5.000.000,00");
        assert_eq!(format_currency(&Amount::from(" 1500.75 ")), "Rp1.500,00");
    }

    #[test]
    fn missing_values_become_sentinel() {
        assert_eq!(format_currency(&Amount::Missing), NOT_AVAILABLE);
        assert_eq!(format_currency(&Amount::from("")), NOT_AVAILABLE);
        assert_eq!(format_currency(&Amount::Float(f64::NAN)), NOT_AVAILABLE);
    }

    #[test]
    fn prefixed_strings_are_idempotent() {
        let once = format_currency(&Amount::Int(8000000));
        let twice = format_currency(&Amount::Text(once.clone()));
        assert_eq!(once, twice);
        assert_eq!(format_currency(&Amount::from("Rp abc")), "Rp abc");
    }

    #[test]
    fn unparseable_text_passes_through() {
        assert_eq!(format_currency(&Amount::from("negotiable")), "negotiable");
        assert_eq!(format_currency(&Amount::from(" ")), " ");
        assert_eq!(format_currency(&Amount::Float(f64::INFINITY)), "inf");
    }
}
