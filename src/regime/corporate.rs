//! Corporate regime: flat corporate tax, regional turnover tax, payroll contributions

use super::{CalculationResult, LiabilityKind, LiabilityLine, RegimeKind};
use crate::contribution::{administrator_contribution, employer_contribution, ContributionBreakdown};
use crate::money::Installments;
use crate::rates::RateTables;
use crate::tax::VatSettlement;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorporateInput {
    pub fiscal_year: i32,
    pub revenue: f64,
    pub operating_costs: f64,
    pub employee_costs: f64,
    pub employee_count: u32,
    pub administrator_compensation: f64,
    /// Region key into the regional turnover-tax table
    pub region: Option<String>,
    pub sales_vat: Option<f64>,
    pub purchases_vat: Option<f64>,
    pub has_vat_debt: bool,
    pub prior_year_corporate_tax: Option<f64>,
    pub prior_year_regional_tax: Option<f64>,
    pub current_balance: Option<f64>,
}

impl Default for CorporateInput {
    fn default() -> Self {
        Self {
            fiscal_year: 0,
            revenue: 0.0,
            operating_costs: 0.0,
            employee_costs: 0.0,
            employee_count: 0,
            administrator_compensation: 0.0,
            region: None,
            sales_vat: None,
            purchases_vat: None,
            has_vat_debt: true,
            prior_year_corporate_tax: None,
            prior_year_regional_tax: None,
            current_balance: None,
        }
    }
}

impl CorporateInput {
    pub fn gross_profit(&self) -> f64 {
        self.revenue - self.operating_costs - self.employee_costs
    }

    /// Profit after administrator compensation, floored at zero
    pub fn taxable_income(&self) -> f64 {
        (self.gross_profit() - self.administrator_compensation).max(0.0)
    }

    /// `max(0, revenue - (operating costs - employee costs))`.
    ///
    /// Employee costs are subtracted from operating costs before the
    /// difference is taken off revenue.
    pub fn regional_tax_base(&self) -> f64 {
        (self.revenue - (self.operating_costs - self.employee_costs)).max(0.0)
    }
}

pub fn calculate_corporate(input: &CorporateInput, tables: &RateTables) -> CalculationResult {
    let constants = &tables.constants;
    let contributions = &tables.contributions;

    let taxable_income = input.taxable_income();
    let corporate_tax = taxable_income * constants.corporate_tax_rate;

    let regional_rate = match input.region.as_deref() {
        Some(region) => tables.regional.rate(region),
        None => {
            log::warn!("no region supplied, using default regional rate");
            tables.regional.default_rate()
        }
    };
    let regional_tax = input.regional_tax_base() * regional_rate;

    let admin =
        administrator_contribution(input.administrator_compensation, &contributions.administrator);
    let employer = employer_contribution(
        input.employee_costs,
        input.employee_count,
        contributions.employer_rate,
    );
    let total_contributions = admin + employer;

    let vat = if input.has_vat_debt {
        VatSettlement::compute(
            input.revenue,
            input.operating_costs,
            input.sales_vat,
            input.purchases_vat,
            constants.standard_vat_rate,
        )
        .rounded()
    } else {
        VatSettlement::default()
    };

    // Each tax carries its own advance
    let installments = Installments::split(input.prior_year_corporate_tax.unwrap_or(corporate_tax))
        + Installments::split(input.prior_year_regional_tax.unwrap_or(regional_tax));

    let total_taxes = corporate_tax + regional_tax;
    let total_due = total_taxes + total_contributions + vat.amount_due;

    log::debug!(
        "corporate {}: taxable {:.2}, corporate tax {:.2}, regional tax {:.2} at {}",
        input.fiscal_year,
        taxable_income,
        corporate_tax,
        regional_tax,
        regional_rate
    );

    let contribution = ContributionBreakdown {
        calculated_amount: total_contributions,
        rate: contributions.administrator.rate,
        minimum: None,
        maximum: None,
        subjective: admin,
        integrative: 0.0,
        maternity: 0.0,
    };

    CalculationResult {
        regime: RegimeKind::Corporate,
        fiscal_year: input.fiscal_year,
        taxable_income,
        gross_tax: corporate_tax,
        net_tax: corporate_tax,
        effective_rate: if taxable_income > 0.0 { corporate_tax / taxable_income } else { 0.0 },
        lines: vec![
            LiabilityLine::new(LiabilityKind::CorporateTax, corporate_tax),
            LiabilityLine::new(LiabilityKind::RegionalTurnoverTax, regional_tax),
            LiabilityLine::new(LiabilityKind::AdministratorContribution, admin),
            LiabilityLine::new(LiabilityKind::EmployerContribution, employer),
        ],
        contribution,
        vat_amount: vat.amount_due,
        vat_quarterly: vat.quarterly,
        installments,
        total_taxes,
        total_contributions,
        total_due,
    }
    .rounded()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CorporateInput {
        CorporateInput {
            fiscal_year: 2025,
            revenue: 500_000.0,
            operating_costs: 200_000.0,
            employee_costs: 100_000.0,
            employee_count: 3,
            administrator_compensation: 50_000.0,
            region: Some("lombardia".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_corporate_tax() {
        let tables = RateTables::default_2025();
        let result = calculate_corporate(&input(), &tables);

        // 500000 - 200000 - 100000 - 50000 = 150000, * 24%
        assert_eq!(result.taxable_income, 150_000.0);
        assert_eq!(result.gross_tax, 36_000.0);
        assert_eq!(result.line(LiabilityKind::CorporateTax), Some(36_000.0));
        assert!((result.effective_rate - 0.24).abs() < 1e-12);
    }

    #[test]
    fn test_regional_tax_base() {
        let tables = RateTables::default_2025();
        let result = calculate_corporate(&input(), &tables);

        // 500000 - (200000 - 100000) = 400000, * 3.9%
        assert_eq!(input().regional_tax_base(), 400_000.0);
        assert_eq!(result.line(LiabilityKind::RegionalTurnoverTax), Some(15_600.0));
        assert_eq!(result.total_taxes, 51_600.0);
    }

    #[test]
    fn test_region_rate_lookup_and_default() {
        let tables = RateTables::default_2025();

        let mut req = input();
        req.region = Some("Lazio".into());
        let lazio = calculate_corporate(&req, &tables);
        assert_eq!(lazio.line(LiabilityKind::RegionalTurnoverTax), Some(19_280.0));

        req.region = Some("Nowhere".into());
        let fallback = calculate_corporate(&req, &tables);
        assert_eq!(fallback.line(LiabilityKind::RegionalTurnoverTax), Some(15_600.0));
    }

    #[test]
    fn test_contributions() {
        let tables = RateTables::default_2025();
        let result = calculate_corporate(&input(), &tables);

        // 50000 * 35.03% = 17515, 100000 * 30% = 30000
        assert_eq!(result.line(LiabilityKind::AdministratorContribution), Some(17_515.0));
        assert_eq!(result.line(LiabilityKind::EmployerContribution), Some(30_000.0));
        assert_eq!(result.total_contributions, 47_515.0);

        let mut req = input();
        req.employee_count = 0;
        let no_staff = calculate_corporate(&req, &tables);
        assert_eq!(no_staff.line(LiabilityKind::EmployerContribution), Some(0.0));
    }

    #[test]
    fn test_installments_per_tax() {
        let tables = RateTables::default_2025();
        let mut req = input();
        req.prior_year_corporate_tax = Some(10_000.0);
        let result = calculate_corporate(&req, &tables);

        // 40% of 10000 prior corporate tax + 40% of 15600 estimated regional tax
        assert_eq!(result.installments.first, 4_000.0 + 6_240.0);
        assert_eq!(result.installments.second, 6_000.0 + 9_360.0);
    }

    #[test]
    fn test_loss_floors_taxable_income() {
        let tables = RateTables::default_2025();
        let mut req = input();
        req.operating_costs = 600_000.0;
        let result = calculate_corporate(&req, &tables);
        assert_eq!(result.taxable_income, 0.0);
        assert_eq!(result.gross_tax, 0.0);
        assert_eq!(result.effective_rate, 0.0);
    }

    #[test]
    fn test_totals() {
        let tables = RateTables::default_2025();
        let result = calculate_corporate(&input(), &tables);

        // VAT: (500000 - 200000) * 22% = 66000
        assert_eq!(result.vat_amount, 66_000.0);
        assert_eq!(result.total_due, 51_600.0 + 47_515.0 + 66_000.0);
    }
}
