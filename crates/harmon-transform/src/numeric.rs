//! Currency amount parsing.
//!
//! Blank and absent values are `None`, never zero: an unreported obligation
//! is not a zero-dollar obligation, and collapsing the two would corrupt
//! every downstream financial rollup.

/// Parse a currency-denominated amount.
///
/// Accepts plain decimals, `$` prefixes, thousands separators, and the
/// accounting convention of parenthesized negatives. Returns `None` for
/// blank input and for strings that are not an amount at all.
pub fn parse_amount(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (body, negated) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
        (&trimmed[1..trimmed.len() - 1], true)
    } else {
        (trimmed, false)
    };
    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let parsed = cleaned.parse::<f64>().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    Some(if negated { -parsed } else { parsed })
}
