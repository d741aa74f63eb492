//! Numeric token handling for receipt lines.

/// Parse a whitespace-delimited token as a number.
///
/// Everything except ASCII digits, `,`, `.` and `-` is dropped, then the
/// first comma becomes a decimal point. Only the first comma is touched,
/// so thousands-separated values like `1,500.50` do not parse.
pub fn parse_number(token: &str) -> Option<f64> {
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = cleaned.replacen(',', ".", 1);
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Remove and return the rightmost numeric token.
pub fn take_last_number(tokens: &mut Vec<&str>) -> Option<f64> {
    let (index, value) = tokens
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, t)| parse_number(t).map(|n| (i, n)))?;

    tokens.remove(index);
    Some(value)
}

/// Round to the nearest integer, ties toward positive infinity.
pub fn round_half_up(x: f64) -> f64 {
    let r = x.round();
    // f64::round breaks ties away from zero; pull negative ties back up.
    if x - r == 0.5 { r + 1.0 } else { r }
}

/// Line total: `round(qty * price)` when both are known, else the price.
pub fn derive_total(qty: Option<f64>, price: Option<f64>) -> Option<f64> {
    match (qty, price) {
        (Some(q), Some(p)) => Some(round_half_up(q * p)),
        (_, price) => price,
    }
}
