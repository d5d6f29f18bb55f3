use contracts::shared::indicators::ValueFormat;

/// Shown for values that cannot be computed (e.g. average margin of no rows).
pub const NOT_AVAILABLE: &str = "N/A";

/// Groups the digits of `n` in threes with dots.
///
/// # Examples
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    group_digits(&n.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Brazilian decimal notation: dot thousands separator, comma decimals.
pub fn format_decimal_br(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    // Rounding may turn a tiny negative into zero; don't print "-0,00".
    let negative = value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.');
    let sign = if negative { "-" } else { "" };

    match fraction {
        Some(f) => format!("{}{},{}", sign, group_digits(integer), f),
        None => format!("{}{}", sign, group_digits(integer)),
    }
}

/// Render an indicator value according to its catalogue format.
///
/// Money follows Brazilian notation (`R$ 1.234,56`); numbers and percents
/// keep `.` as the decimal separator.
pub fn format_value(value: Option<f64>, format: &ValueFormat) -> String {
    let Some(v) = value else {
        return NOT_AVAILABLE.to_string();
    };

    match format {
        ValueFormat::Money { currency } => format!("{} {}", currency, format_decimal_br(v, 2)),
        ValueFormat::Number { decimals } => format!("{:.*}", *decimals as usize, v),
        ValueFormat::Percent { decimals } => format!("{:.*}%", *decimals as usize, v),
        ValueFormat::Integer => {
            let n = v.round();
            if n < 0.0 {
                format!("-{}", format_number(n.abs() as usize))
            } else {
                format_number(n as usize)
            }
        }
    }
}
