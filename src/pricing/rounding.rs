//! Rounding primitives used by every price and length.
//!
//! Both functions are ceilings: the result is never below the input. The
//! step count is estimated in floating point and then corrected against the
//! input itself, so scaling noise such as `1.1 * 10 == 11.000000000000002`
//! does not bump a value to the next step, and a value just above a step
//! is never pulled down onto it.

/// Smallest `value(k)` over integers `k` that is not below `x`.
///
/// `estimate` approximates the exact step count of `x`.
#[inline]
fn least_step_at_or_above(x: f64, estimate: f64, value: impl Fn(f64) -> f64) -> f64 {
    let mut k = estimate.ceil();
    if value(k - 1.0) >= x {
        k -= 1.0;
    } else if value(k) < x {
        k += 1.0;
    }
    value(k)
}

/// Ceiling of `x` at `digits` decimal digits.
#[inline]
pub fn round_up(x: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    least_step_at_or_above(x, x * factor, |k| k / factor)
}

/// Smallest multiple of `multiple` that is not below `x`.
#[inline]
pub fn ceiling_to_multiple(x: f64, multiple: f64) -> f64 {
    least_step_at_or_above(x, x / multiple, |k| k * multiple)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_up_basic() {
        assert_eq!(round_up(1.01, 1), 1.1);
        assert_eq!(round_up(1.0, 1), 1.0);
        assert_eq!(round_up(2.982, 2), 2.99);
        assert_eq!(round_up(0.0, 1), 0.0);
    }

    #[test]
    fn test_round_up_ignores_binary_noise() {
        // 1.1 * 10.0 is 11.000000000000002
        assert_eq!(round_up(1.0 + 0.1, 1), 1.1);
        assert_eq!(round_up(0.7 + 0.1, 1), 0.8);
        assert_eq!(round_up(2.99, 2), 2.99);
    }

    #[test]
    fn test_round_up_never_pulls_down() {
        // 0.1 * 3.0 is 0.30000000000000004, just above 0.3
        assert_eq!(round_up(0.1 * 3.0, 1), 0.4);
        assert_eq!(round_up(1.10000000001, 1), 1.2);
        assert_eq!(round_up(1_000_000_000.04, 1), 1_000_000_000.1);
        assert_eq!(ceiling_to_multiple(5_000_000_001.0, 5.0), 5_000_000_005.0);
    }

    #[test]
    fn test_round_up_negative_uses_ceiling() {
        assert_eq!(round_up(-1.05, 1), -1.0);
        assert_eq!(round_up(-0.04, 1), 0.0);
    }

    #[test]
    fn test_round_up_bounds() {
        let small = (0..5000).map(|i| i as f64 * 0.0137);
        let large = (0..2000).map(|i| 1e9 + i as f64 * 0.0371);
        let huge = (0..200).map(|i| 3.7e12 * (i + 1) as f64 + 0.05);
        for x in small.chain(large).chain(huge) {
            let r = round_up(x, 1);
            assert!(r >= x, "round_up({}) = {} is below input", x, r);
            assert!(r - x <= 0.1 + 1e-9 + x * 1e-15, "round_up({}) = {} overshoots", x, r);
        }
    }

    #[test]
    fn test_ceiling_to_multiple() {
        assert_eq!(ceiling_to_multiple(0.66, 5.0), 5.0);
        assert_eq!(ceiling_to_multiple(5.0, 5.0), 5.0);
        assert_eq!(ceiling_to_multiple(5.01, 5.0), 10.0);
        assert_eq!(ceiling_to_multiple(0.0, 5.0), 0.0);
        assert_eq!(ceiling_to_multiple(-3.0, 5.0), 0.0);
    }

    #[test]
    fn test_ceiling_to_multiple_bounds() {
        let small = (0..2000).map(|i| i as f64 * 0.173);
        let large = (0..2000).map(|i| 5e9 + i as f64 * 0.61);
        for x in small.chain(large) {
            let r = ceiling_to_multiple(x, 5.0);
            assert!(r >= 0.0);
            assert!(r >= x, "ceiling_to_multiple({}) = {} is below input", x, r);
            assert!(r - x <= 5.0 + 1e-9 + x * 1e-15, "ceiling_to_multiple({}) = {} overshoots", x, r);
            assert_eq!(r % 5.0, 0.0, "{} is not a multiple of 5", r);
        }
    }
}
