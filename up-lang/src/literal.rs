//! Numeric literals: ASCII digits with at most one inner decimal point.

const POINT: char = '.';

pub fn is_numeric_literal(token: &str) -> bool {
    if token.is_empty() || token.starts_with(POINT) || token.ends_with(POINT) {
        return false;
    }
    let all_valid = token.chars().all(|ch| ch.is_ascii_digit() || ch == POINT);
    all_valid && token.matches(POINT).count() <= 1
}

/// Positional decimal value of a literal accepted by [`is_numeric_literal`].
/// Characters other than digits and the first point are ignored.
pub fn parse_numeric_literal(token: &str) -> f64 {
    let mut seen_point = false;
    let cleaned: String = token
        .chars()
        .filter(|&ch| {
            if ch == POINT && !seen_point {
                seen_point = true;
                return true;
            }
            ch.is_ascii_digit()
        })
        .collect();

    cleaned.parse().unwrap_or(0.0)
}

pub fn numeric_literal(token: &str) -> Option<f64> {
    is_numeric_literal(token).then(|| parse_numeric_literal(token))
}
