//! Rounding and averaging helpers shared by the scorers.

/// Round `value` to `digits` significant digits.
///
/// Zero, non-finite values and `digits == 0` are returned unchanged.
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let shift = digits as i32 - 1 - magnitude;
    if shift >= 0 {
        let factor = 10f64.powi(shift);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-shift);
        (value / factor).round() * factor
    }
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_significant() {
        assert_eq!(round_significant(0.123456, 3), 0.123);
        assert_eq!(round_significant(12.3456, 3), 12.3);
        assert_eq!(round_significant(0.0012345, 2), 0.0012);
        assert_eq!(round_significant(2.0 / 3.0, 3), 0.667);
        assert_eq!(round_significant(12345.0, 3), 12300.0);
        assert_eq!(round_significant(-1.0, 3), -1.0);
        assert_eq!(round_significant(0.0, 3), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[0.5, 0.7]), Some(0.6));
    }
}
