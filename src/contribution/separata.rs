//! Gestione Separata: single rate on capped income

use super::{ContributionBreakdown, ContributionFlags, ContributionRegime, ContributionRule};
use crate::rates::GestioneSeparataConfig;

pub struct GestioneSeparataRule<'a> {
    config: &'a GestioneSeparataConfig,
}

impl<'a> GestioneSeparataRule<'a> {
    pub fn new(config: &'a GestioneSeparataConfig) -> Self {
        Self { config }
    }

    /// Reduced rate for pensioners and contributors covered by another fund
    pub fn rate(&self, flags: &ContributionFlags) -> f64 {
        if flags.other_pension_coverage || flags.pensioner {
            self.config.reduced_rate
        } else {
            self.config.full_rate
        }
    }

    /// Income after the optional recharge uplift, before the cap
    pub fn contribution_base(&self, base_income: f64, flags: &ContributionFlags) -> f64 {
        let income = base_income.max(0.0);
        if flags.reverse_charge_uplift {
            income * (1.0 + self.config.reverse_charge_uplift)
        } else {
            income
        }
    }
}

impl ContributionRule for GestioneSeparataRule<'_> {
    fn regime(&self) -> ContributionRegime {
        ContributionRegime::GestioneSeparata
    }

    fn compute(&self, base_income: f64, flags: &ContributionFlags) -> ContributionBreakdown {
        let rate = self.rate(flags);
        let capped = self
            .contribution_base(base_income, flags)
            .min(self.config.max_income);
        let amount = capped * rate;

        ContributionBreakdown {
            calculated_amount: amount,
            rate,
            minimum: None,
            maximum: Some(self.config.max_income * rate),
            subjective: amount,
            integrative: 0.0,
            maternity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::ContributionTables;
    use approx::assert_abs_diff_eq;

    fn config() -> GestioneSeparataConfig {
        ContributionTables::default_2025().gestione_separata
    }

    #[test]
    fn test_full_rate_below_cap() {
        // min(50000, 120607) * 26.07% = 13035
        let config = config();
        let rule = GestioneSeparataRule::new(&config);
        let result = rule.compute(50_000.0, &ContributionFlags::default());
        assert_abs_diff_eq!(result.calculated_amount, 13_035.0, epsilon = 1e-6);
        assert_eq!(result.rate, 0.2607);
        assert_eq!(result.minimum, None);
    }

    #[test]
    fn test_reduced_rate_with_other_coverage() {
        let config = config();
        let rule = GestioneSeparataRule::new(&config);
        let flags = ContributionFlags {
            other_pension_coverage: true,
            ..Default::default()
        };
        let result = rule.compute(50_000.0, &flags);
        assert_abs_diff_eq!(result.calculated_amount, 12_000.0, epsilon = 1e-6);

        let pensioner = ContributionFlags {
            pensioner: true,
            ..Default::default()
        };
        assert_eq!(rule.rate(&pensioner), 0.24);
    }

    #[test]
    fn test_income_capped() {
        let config = config();
        let rule = GestioneSeparataRule::new(&config);
        let result = rule.compute(500_000.0, &ContributionFlags::default());
        assert_abs_diff_eq!(result.calculated_amount, 120_607.0 * 0.2607, epsilon = 1e-6);
        assert_eq!(Some(result.calculated_amount), result.maximum);
    }

    #[test]
    fn test_uplift_applied_before_cap() {
        let config = config();
        let rule = GestioneSeparataRule::new(&config);
        let flags = ContributionFlags {
            reverse_charge_uplift: true,
            ..Default::default()
        };

        // 50000 * 1.04 = 52000 -> 52000 * 26.07%
        let result = rule.compute(50_000.0, &flags);
        assert_abs_diff_eq!(result.calculated_amount, 52_000.0 * 0.2607, epsilon = 1e-6);

        // 118000 * 1.04 = 122720 is above the cap
        let capped = rule.compute(118_000.0, &flags);
        assert_abs_diff_eq!(capped.calculated_amount, 120_607.0 * 0.2607, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_income() {
        let config = config();
        let rule = GestioneSeparataRule::new(&config);
        assert_eq!(rule.compute(0.0, &ContributionFlags::default()).calculated_amount, 0.0);
    }
}
