//! Rounding and ratio helpers shared by every report.
//!
//! Monetary amounts, percentages and ratios are reported at two decimals.
//! Summary averages of counts use one decimal.

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    ratio(numerator, denominator).unwrap_or(0.0)
}

/// `numerator / denominator`, or `None` when the denominator is not positive.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator > 0.0).then(|| numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round2(3333.333_333), 3333.33);
        assert_eq!(round2(2.675_01), 2.68);
        assert_eq!(round_to(4.25, 1), 4.3);
    }

    #[test]
    fn test_ratios() {
        assert_eq!(ratio(10.0, 4.0), Some(2.5));
        assert_eq!(ratio(10.0, 0.0), None);
        assert_eq!(ratio_or_zero(10.0, 0.0), 0.0);
    }
}
