//! IVS craftsmen/traders: fixed contribution on the minimum income plus a
//! two-tier percentage on the excess

use super::{ContributionBreakdown, ContributionFlags, ContributionRegime, ContributionRule};
use crate::rates::IvsConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IvsFund {
    Artigiani,
    Commercianti,
}

pub struct IvsRule<'a> {
    fund: IvsFund,
    config: &'a IvsConfig,
}

/// Unreduced components of an IVS amount
#[derive(Debug, Clone, Copy, PartialEq)]
struct IvsComponents {
    fixed: f64,
    excess: f64,
    surcharge: f64,
}

impl IvsComponents {
    fn total(&self) -> f64 {
        self.fixed + self.excess + self.surcharge
    }
}

impl<'a> IvsRule<'a> {
    pub fn new(fund: IvsFund, config: &'a IvsConfig) -> Self {
        Self { fund, config }
    }

    fn components(&self, income: f64) -> IvsComponents {
        let c = self.config;
        let capped = income.max(0.0).min(c.max_income);

        let excess = if capped <= c.minimum_income {
            0.0
        } else {
            let lower_tier = (capped.min(c.income_threshold) - c.minimum_income).max(0.0);
            let upper_tier = (capped - c.income_threshold).max(0.0);
            lower_tier * c.base_rate + upper_tier * c.upper_rate
        };

        // Traders' surcharge is levied on the same base, never below the minimum income
        let surcharge = c.surcharge_rate * capped.max(c.minimum_income);

        IvsComponents {
            fixed: c.fixed_contribution,
            excess,
            surcharge,
        }
    }
}

impl ContributionRule for IvsRule<'_> {
    fn regime(&self) -> ContributionRegime {
        match self.fund {
            IvsFund::Artigiani => ContributionRegime::IvsArtigiani,
            IvsFund::Commercianti => ContributionRegime::IvsCommercianti,
        }
    }

    fn compute(&self, base_income: f64, flags: &ContributionFlags) -> ContributionBreakdown {
        let factor = flags.reduction.multiplier();
        let parts = self.components(base_income);
        let amount = parts.total() * factor;

        ContributionBreakdown {
            calculated_amount: amount,
            rate: self.config.base_rate + self.config.surcharge_rate,
            minimum: Some(self.components(0.0).total() * factor),
            maximum: Some(self.components(self.config.max_income).total() * factor),
            subjective: amount,
            integrative: 0.0,
            maternity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contribution::ReductionFactor;
    use crate::rates::ContributionTables;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn artigiani() -> IvsConfig {
        ContributionTables::default_2025().artigiani
    }

    fn commercianti() -> IvsConfig {
        ContributionTables::default_2025().commercianti
    }

    #[test]
    fn test_below_minimum_income_pays_fixed_only() {
        let config = artigiani();
        let rule = IvsRule::new(IvsFund::Artigiani, &config);
        let result = rule.compute(18_000.0, &ContributionFlags::default());
        assert_eq!(result.calculated_amount, 4_460.64);
    }

    #[test]
    fn test_at_minimum_income_pays_fixed_only() {
        let config = artigiani();
        let rule = IvsRule::new(IvsFund::Artigiani, &config);
        let result = rule.compute(18_555.0, &ContributionFlags::default());
        assert_eq!(result.calculated_amount, 4_460.64);
    }

    #[test]
    fn test_between_floor_and_threshold() {
        let config = artigiani();
        let rule = IvsRule::new(IvsFund::Artigiani, &config);
        let result = rule.compute(30_000.0, &ContributionFlags::default());
        let expected = 4_460.64 + (30_000.0 - 18_555.0) * 0.24;
        assert_abs_diff_eq!(result.calculated_amount, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_above_threshold_uses_upper_rate() {
        let config = artigiani();
        let rule = IvsRule::new(IvsFund::Artigiani, &config);
        let result = rule.compute(70_000.0, &ContributionFlags::default());

        // 4460.64 + 36893 * 0.24 + 14552 * 0.25 = 4460.64 + 8854.32 + 3638
        let expected = 4_460.64 + (55_448.0 - 18_555.0) * 0.24 + (70_000.0 - 55_448.0) * 0.25;
        assert_abs_diff_eq!(result.calculated_amount, expected, epsilon = 1e-6);
        assert_abs_diff_eq!(result.calculated_amount, 16_952.96, epsilon = 1e-6);
    }

    #[test]
    fn test_income_capped_at_maximum() {
        let config = artigiani();
        let rule = IvsRule::new(IvsFund::Artigiani, &config);
        let at_cap = rule.compute(92_413.0, &ContributionFlags::default());
        let beyond = rule.compute(250_000.0, &ContributionFlags::default());
        assert_eq!(at_cap.calculated_amount, beyond.calculated_amount);
        assert_eq!(beyond.maximum, Some(beyond.calculated_amount));
    }

    #[test]
    fn test_commercianti_surcharge() {
        let art_config = artigiani();
        let com_config = commercianti();
        let art = IvsRule::new(IvsFund::Artigiani, &art_config);
        let com = IvsRule::new(IvsFund::Commercianti, &com_config);
        let flags = ContributionFlags::default();

        let a = art.compute(40_000.0, &flags).calculated_amount;
        let c = com.compute(40_000.0, &flags).calculated_amount;
        assert_abs_diff_eq!(c - a, 40_000.0 * 0.0048, epsilon = 1e-6);

        // Below the floor the surcharge still applies to the minimum income
        let a_low = art.compute(10_000.0, &flags).calculated_amount;
        let c_low = com.compute(10_000.0, &flags).calculated_amount;
        assert_abs_diff_eq!(c_low - a_low, 18_555.0 * 0.0048, epsilon = 1e-6);
    }

    #[test]
    fn test_reduction_scales_fixed_and_excess() {
        let config = artigiani();
        let rule = IvsRule::new(IvsFund::Artigiani, &config);
        let full = rule.compute(70_000.0, &ContributionFlags::default());

        let reduced_35 = rule.compute(
            70_000.0,
            &ContributionFlags {
                reduction: ReductionFactor::Reduction35,
                ..Default::default()
            },
        );
        assert_relative_eq!(
            reduced_35.calculated_amount,
            full.calculated_amount * 0.65,
            max_relative = 1e-12
        );

        // Fixed portion alone is reduced too
        let fixed_only = rule.compute(
            10_000.0,
            &ContributionFlags {
                reduction: ReductionFactor::Reduction50,
                ..Default::default()
            },
        );
        assert_abs_diff_eq!(fixed_only.calculated_amount, 2_230.32, epsilon = 1e-9);
        assert_eq!(fixed_only.minimum, Some(fixed_only.calculated_amount));
    }
}
