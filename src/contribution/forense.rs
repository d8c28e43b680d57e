//! Cassa Forense: two-tier subjective rate plus integrative contribution

use super::{ContributionBreakdown, ContributionFlags, ContributionRegime, ContributionRule};
use crate::rates::CassaForenseConfig;

pub struct CassaForenseRule<'a> {
    config: &'a CassaForenseConfig,
}

impl<'a> CassaForenseRule<'a> {
    pub fn new(config: &'a CassaForenseConfig) -> Self {
        Self { config }
    }

    fn subjective(&self, income: f64) -> f64 {
        let c = self.config;
        let lower = income.min(c.income_threshold) * c.subjective_rate;
        let upper = (income - c.income_threshold).max(0.0) * c.above_threshold_rate;
        (lower + upper).max(c.minimum_subjective)
    }

    fn integrative(&self, income: f64) -> f64 {
        (income * self.config.integrative_rate).max(self.config.minimum_integrative)
    }
}

impl ContributionRule for CassaForenseRule<'_> {
    fn regime(&self) -> ContributionRegime {
        ContributionRegime::CassaForense
    }

    fn compute(&self, base_income: f64, _flags: &ContributionFlags) -> ContributionBreakdown {
        let income = base_income.max(0.0);
        let subjective = self.subjective(income);
        let integrative = self.integrative(income);

        ContributionBreakdown {
            calculated_amount: subjective + integrative,
            rate: self.config.subjective_rate,
            minimum: Some(self.config.minimum_subjective + self.config.minimum_integrative),
            maximum: None,
            subjective,
            integrative,
            maternity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::ContributionTables;
    use approx::assert_abs_diff_eq;

    fn config() -> CassaForenseConfig {
        ContributionTables::default_2025().cassa_forense
    }

    #[test]
    fn test_minimums_apply_at_low_income() {
        let config = config();
        let rule = CassaForenseRule::new(&config);
        let result = rule.compute(5_000.0, &ContributionFlags::default());

        // 5000 * 17% = 850 < 3120, 5000 * 4% = 200 < 350
        assert_eq!(result.subjective, 3_120.0);
        assert_eq!(result.integrative, 350.0);
        assert_eq!(result.calculated_amount, 3_470.0);
        assert_eq!(result.minimum, Some(3_470.0));
    }

    #[test]
    fn test_below_threshold() {
        let config = config();
        let rule = CassaForenseRule::new(&config);
        let result = rule.compute(60_000.0, &ContributionFlags::default());

        assert_abs_diff_eq!(result.subjective, 10_200.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.integrative, 2_400.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.calculated_amount, 12_600.0, epsilon = 1e-6);
    }

    #[test]
    fn test_marginal_rate_above_threshold() {
        let config = config();
        let rule = CassaForenseRule::new(&config);
        let result = rule.compute(200_000.0, &ContributionFlags::default());

        // 130000 * 17% + 70000 * 3% = 22100 + 2100
        assert_abs_diff_eq!(result.subjective, 24_200.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.integrative, 8_000.0, epsilon = 1e-6);
    }
}
