//! Inarcassa: capped subjective rate, uncapped integrative, fixed maternity

use super::{ContributionBreakdown, ContributionFlags, ContributionRegime, ContributionRule};
use crate::rates::InarcassaConfig;

pub struct InarcassaRule<'a> {
    config: &'a InarcassaConfig,
}

impl<'a> InarcassaRule<'a> {
    pub fn new(config: &'a InarcassaConfig) -> Self {
        Self { config }
    }
}

impl ContributionRule for InarcassaRule<'_> {
    fn regime(&self) -> ContributionRegime {
        ContributionRegime::Inarcassa
    }

    fn compute(&self, base_income: f64, _flags: &ContributionFlags) -> ContributionBreakdown {
        let c = self.config;
        let income = base_income.max(0.0);

        let subjective = (income.min(c.max_income) * c.subjective_rate).max(c.minimum_subjective);
        // Integrative is charged on the full income, not the capped one
        let integrative = (income * c.integrative_rate).max(c.minimum_integrative);

        ContributionBreakdown {
            calculated_amount: subjective + integrative + c.maternity,
            rate: c.subjective_rate,
            minimum: Some(c.minimum_subjective + c.minimum_integrative + c.maternity),
            maximum: None,
            subjective,
            integrative,
            maternity: c.maternity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::ContributionTables;
    use approx::assert_abs_diff_eq;

    fn config() -> InarcassaConfig {
        ContributionTables::default_2025().inarcassa
    }

    #[test]
    fn test_mid_income() {
        let config = config();
        let rule = InarcassaRule::new(&config);
        let result = rule.compute(50_000.0, &ContributionFlags::default());

        // 50000 * 14.5% = 7250, 50000 * 4% = 2000, + 86 maternity
        assert_abs_diff_eq!(result.subjective, 7_250.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.integrative, 2_000.0, epsilon = 1e-6);
        assert_eq!(result.maternity, 86.0);
        assert_abs_diff_eq!(result.calculated_amount, 9_336.0, epsilon = 1e-6);
    }

    #[test]
    fn test_subjective_capped_integrative_not() {
        let config = config();
        let rule = InarcassaRule::new(&config);
        let result = rule.compute(200_000.0, &ContributionFlags::default());

        assert_abs_diff_eq!(result.subjective, 140_350.0 * 0.145, epsilon = 1e-6);
        assert_abs_diff_eq!(result.integrative, 8_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_income_pays_minimums() {
        let config = config();
        let rule = InarcassaRule::new(&config);
        let result = rule.compute(0.0, &ContributionFlags::default());

        assert_eq!(result.subjective, 2_475.0);
        assert_eq!(result.integrative, 815.0);
        assert_eq!(result.calculated_amount, 2_475.0 + 815.0 + 86.0);
        assert_eq!(result.minimum, Some(result.calculated_amount));
    }
}
