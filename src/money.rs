//! Monetary rounding and the advance-installment split

use serde::{Deserialize, Serialize};

/// Share of the advance due with the mid-year balance
pub const FIRST_INSTALLMENT_SHARE: f64 = 0.40;

/// Share of the advance due in late November
pub const SECOND_INSTALLMENT_SHARE: f64 = 0.60;

/// Round to 2 decimals, half-up.
///
/// `f64` cannot represent most cent values exactly (1.005 is stored as
/// 1.00499999...), so a few ulps of slack are added before flooring.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = value * 100.0;
    let slack = f64::EPSILON * scaled.abs().max(1.0) * 4.0;
    let rounded = (scaled + 0.5 + slack).floor() / 100.0;
    // Avoid emitting -0.0 for tiny negative inputs
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Split `total` into four quarterly amounts in whole cents.
///
/// Q1-Q3 take a quarter of the cents rounded down and Q4 takes the
/// remainder, so the quarters always add back to the rounded total and
/// none of them is negative.
pub fn split_quarters(total: f64) -> [f64; 4] {
    let cents = (round2(total.max(0.0)) * 100.0).round() as i64;
    let quarter = cents / 4;
    let last = cents - 3 * quarter;
    [quarter, quarter, quarter, last].map(|c| c as f64 / 100.0)
}

/// Advance installments toward the following year's liability
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Installments {
    pub first: f64,
    pub second: f64,
}

impl Installments {
    /// Split a liability 40% / 60%. Negative bases produce no advance.
    pub fn split(base: f64) -> Self {
        let base = base.max(0.0);
        Self {
            first: base * FIRST_INSTALLMENT_SHARE,
            second: base * SECOND_INSTALLMENT_SHARE,
        }
    }

    pub fn total(&self) -> f64 {
        self.first + self.second
    }

    pub fn rounded(&self) -> Self {
        Self {
            first: round2(self.first),
            second: round2(self.second),
        }
    }
}

impl std::ops::Add for Installments {
    type Output = Installments;

    fn add(self, other: Installments) -> Installments {
        Installments {
            first: self.first + other.first,
            second: self.second + other.second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(1.004), 1.0);
        assert_eq!(round2(5265.0), 5265.0);
        assert_eq!(round2(13035.0), 13035.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_round_negative_half_goes_up() {
        // Half-up rounds toward +inf, so -1.005 becomes -1.00
        assert_eq!(round2(-1.005), -1.0);
        assert_eq!(round2(-1.006), -1.01);
        assert!(round2(-0.001).is_sign_positive());
    }

    #[test]
    fn test_round_large_amounts() {
        assert_eq!(round2(1_234_567.125), 1_234_567.13);
        assert_eq!(round2(987_654.321), 987_654.32);
    }

    #[test]
    fn test_quarters_add_back_to_total() {
        assert_eq!(split_quarters(13_200.0), [3_300.0; 4]);
        assert_eq!(split_quarters(0.1), [0.02, 0.02, 0.02, 0.04]);
        assert_eq!(split_quarters(0.02), [0.0, 0.0, 0.0, 0.02]);
        assert_eq!(split_quarters(-10.0), [0.0; 4]);

        // 915057 cents: 228764 * 3 + 228765
        let quarters = split_quarters(9_150.57);
        assert_eq!(quarters[0], 2_287.64);
        assert_eq!(quarters[3], 2_287.65);
        assert_eq!(round2(quarters.iter().sum()), 9_150.57);
    }

    #[test]
    fn test_installment_split() {
        let inst = Installments::split(1000.0);
        assert!((inst.first - 400.0).abs() < 1e-9);
        assert!((inst.second - 600.0).abs() < 1e-9);
        assert!((inst.total() - 1000.0).abs() < 1e-9);

        assert_eq!(Installments::split(-50.0), Installments::default());
    }
}
