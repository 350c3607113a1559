//! Null-safe numeric coercion for metric values.
//!
//! The Data API sends every metric as a string and may leave values out
//! for dimension combinations without data. Anything that does not parse
//! becomes zero.

use std::num::IntErrorKind;

/// Parse an integer metric value, returning 0 when absent, empty or malformed.
///
/// Well-formed integers outside the `i64` range clamp to the nearest bound.
pub fn safe_int(value: Option<&str>) -> i64 {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => match v.parse::<i64>() {
            Ok(n) => n,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => 0,
            },
        },
        _ => 0,
    }
}

/// Parse a float metric value, returning 0.0 when absent, empty, malformed
/// or not finite (`NaN`, `inf`, overflowing exponents).
pub fn safe_float(value: Option<&str>) -> f64 {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_int() {
        assert_eq!(safe_int(Some("42")), 42);
        assert_eq!(safe_int(Some(" 7 ")), 7);
        assert_eq!(safe_int(Some("")), 0);
        assert_eq!(safe_int(None), 0);
        assert_eq!(safe_int(Some("abc")), 0);
        // Integer fields do not accept decimals
        assert_eq!(safe_int(Some("3.5")), 0);
    }

    #[test]
    fn test_safe_int_out_of_range_clamps() {
        assert_eq!(safe_int(Some("9223372036854775807")), i64::MAX);
        assert_eq!(safe_int(Some("9223372036854775808")), i64::MAX);
        assert_eq!(safe_int(Some("123456789012345678901234567890")), i64::MAX);
        assert_eq!(safe_int(Some("-9223372036854775809")), i64::MIN);
        // Still junk, not overflow
        assert_eq!(safe_int(Some("99999999999999999999x")), 0);
    }

    #[test]
    fn test_safe_float() {
        assert_eq!(safe_float(Some("35.5")), 35.5);
        assert_eq!(safe_float(Some("120")), 120.0);
        assert_eq!(safe_float(Some("")), 0.0);
        assert_eq!(safe_float(None), 0.0);
        assert_eq!(safe_float(Some("abc")), 0.0);
        assert_eq!(safe_float(Some("  ")), 0.0);
    }

    #[test]
    fn test_safe_float_non_finite() {
        for raw in ["NaN", "nan", "inf", "-inf", "infinity", "-infinity", "1e400", "-1e400"] {
            assert_eq!(safe_float(Some(raw)), 0.0, "{}", raw);
        }
        assert_eq!(safe_float(Some("1e300")), 1e300);
    }

    #[test]
    fn test_valid_strings_round_exactly() {
        for n in [0i64, 1, 99, 12_345, 9_007_199_254] {
            assert_eq!(safe_int(Some(n.to_string().as_str())), n);
        }
        for x in [0.0f64, 0.25, 22.1, 48.3, 300.2, 1e6] {
            assert_eq!(safe_float(Some(x.to_string().as_str())), x);
        }
    }
}
