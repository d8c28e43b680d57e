//! Company-side contributions: administrator compensation and payroll

use crate::rates::AdministratorConfig;

/// Contribution on administrator compensation, with the base clamped
/// between the minimum and maximum contribution base.
///
/// No compensation means no administrator on the payroll, so nothing is
/// due; the minimum base only applies once something is paid.
pub fn administrator_contribution(compensation: f64, config: &AdministratorConfig) -> f64 {
    if compensation <= 0.0 {
        return 0.0;
    }
    // max/min rather than clamp: inverted bounds resolve to the maximum
    compensation.max(config.minimum_base).min(config.maximum_base) * config.rate
}

/// Employer social charges on staff costs
pub fn employer_contribution(employee_costs: f64, employee_count: u32, rate: f64) -> f64 {
    if employee_count == 0 {
        return 0.0;
    }
    employee_costs.max(0.0) * rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::ContributionTables;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_administrator_base_clamped() {
        let config = ContributionTables::default_2025().administrator;

        let low = administrator_contribution(5_000.0, &config);
        assert_abs_diff_eq!(low, 18_555.0 * 0.3503, epsilon = 1e-6);

        let mid = administrator_contribution(40_000.0, &config);
        assert_abs_diff_eq!(mid, 40_000.0 * 0.3503, epsilon = 1e-6);

        let high = administrator_contribution(300_000.0, &config);
        assert_abs_diff_eq!(high, 120_607.0 * 0.3503, epsilon = 1e-6);

        assert_eq!(administrator_contribution(0.0, &config), 0.0);
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let mut config = ContributionTables::default_2025().administrator;
        config.minimum_base = 200_000.0;

        let amount = administrator_contribution(40_000.0, &config);
        assert_abs_diff_eq!(amount, 120_607.0 * 0.3503, epsilon = 1e-6);
    }

    #[test]
    fn test_employer_contribution_needs_employees() {
        assert_abs_diff_eq!(employer_contribution(100_000.0, 3, 0.30), 30_000.0, epsilon = 1e-9);
        assert_eq!(employer_contribution(100_000.0, 0, 0.30), 0.0);
    }
}
