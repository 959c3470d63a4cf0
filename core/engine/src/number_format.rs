//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Indian-locale number formatting for displaying budget amounts.
//! CONTEXT: Amounts are shown as whole rupees ("12,34,567") or in lakhs with
//! two decimals ("12.35"). Digits are grouped the Indian way: the last three
//! digits, then groups of two.

/// One lakh = 1,00,000 rupees.
pub const LAKH: f64 = 100_000.0;

/// Format an amount as whole rupees with Indian digit grouping.
/// Halves round away from zero.
pub fn format_inr(value: f64) -> String {
    let rounded = normalize_zero(value.round());
    add_indian_separators(&format!("{:.0}", rounded))
}

/// Format an amount in lakhs with exactly two decimal places.
pub fn format_lakhs(value: f64) -> String {
    let lakhs = normalize_zero((value / LAKH * 100.0).round() / 100.0);
    add_indian_separators(&format!("{:.2}", lakhs))
}

/// Format an amount with a rupee sign, e.g. "₹1,23,456".
pub fn format_rupees(value: f64) -> String {
    format!("\u{20B9}{}", format_inr(value))
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Add Indian digit-group separators to a plain numeric string.
fn add_indian_separators(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((integer, decimal)) => (integer, Some(decimal)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        let remaining = len - i;
        if i > 0 && (remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0)) {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}
