//! Coercion of raw form input.

/// Parse a non-negative amount; anything else becomes 0.
pub fn coerce_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Normalize a field name: lowercase with `-`, `_` and spaces removed.
pub(crate) fn field_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount("12.5"), 12.5);
        assert_eq!(coerce_amount(" 3 "), 3.0);
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount("-4"), 0.0);
        assert_eq!(coerce_amount("NaN"), 0.0);
        assert_eq!(coerce_amount("inf"), 0.0);
    }

    #[test]
    fn test_field_key() {
        assert_eq!(field_key("priceKg"), "pricekg");
        assert_eq!(field_key("price-kg"), "pricekg");
        assert_eq!(field_key("Print_Time"), "printtime");
    }
}
