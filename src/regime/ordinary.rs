//! Ordinary individual regime: progressive brackets, surcharges, VAT

use super::{CalculationResult, ContributionProfile, LiabilityKind, LiabilityLine, RegimeKind};
use crate::contribution::compute_contribution;
use crate::money::Installments;
use crate::rates::RateTables;
use crate::tax::{compute_progressive_tax, VatSettlement};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdinaryInput {
    pub fiscal_year: i32,
    pub revenue: f64,
    pub documented_expenses: f64,
    pub other_income: f64,
    pub employment_income: f64,
    /// Tax already withheld at source
    pub withholdings: f64,
    pub sales_vat: Option<f64>,
    pub purchases_vat: Option<f64>,
    /// When false the taxpayer has no VAT to settle
    pub has_vat_debt: bool,
    /// Prior-year total tax, base for the advance installments
    pub prior_year_tax: Option<f64>,
    pub contribution: ContributionProfile,
    pub current_balance: Option<f64>,
}

impl Default for OrdinaryInput {
    fn default() -> Self {
        Self {
            fiscal_year: 0,
            revenue: 0.0,
            documented_expenses: 0.0,
            other_income: 0.0,
            employment_income: 0.0,
            withholdings: 0.0,
            sales_vat: None,
            purchases_vat: None,
            has_vat_debt: true,
            prior_year_tax: None,
            contribution: ContributionProfile::default(),
            current_balance: None,
        }
    }
}

impl OrdinaryInput {
    /// `max(0, revenue - documented expenses)`
    pub fn business_income(&self) -> f64 {
        (self.revenue - self.documented_expenses).max(0.0)
    }

    pub fn total_taxable_income(&self) -> f64 {
        self.business_income() + self.other_income.max(0.0) + self.employment_income.max(0.0)
    }
}

pub fn calculate_ordinary(input: &OrdinaryInput, tables: &RateTables) -> CalculationResult {
    let constants = &tables.constants;

    let business_income = input.business_income();
    let taxable_income = input.total_taxable_income();
    let progressive =
        compute_progressive_tax(taxable_income, tables.individual_brackets.brackets());
    let net_tax = (progressive.gross_tax - input.withholdings.max(0.0)).max(0.0);

    // National averages; the per-municipality tables are not modelled
    let regional_surcharge = taxable_income * constants.regional_surcharge_rate;
    let municipal_surcharge = taxable_income * constants.municipal_surcharge_rate;

    // Contributions are due on business income only
    let contribution = compute_contribution(
        business_income,
        input.contribution.regime_or_unrecognized(),
        &input.contribution.flags,
        &tables.contributions,
    );

    let vat = if input.has_vat_debt {
        VatSettlement::compute(
            input.revenue,
            input.documented_expenses,
            input.sales_vat,
            input.purchases_vat,
            constants.standard_vat_rate,
        )
        .rounded()
    } else {
        VatSettlement::default()
    };

    let total_taxes = net_tax + regional_surcharge + municipal_surcharge;
    let installments = Installments::split(input.prior_year_tax.unwrap_or(total_taxes));
    let total_due = total_taxes + contribution.calculated_amount + vat.amount_due;

    log::debug!(
        "ordinary {}: taxable {:.2}, gross {:.2}, net {:.2}, vat {:.2}",
        input.fiscal_year,
        taxable_income,
        progressive.gross_tax,
        net_tax,
        vat.amount_due
    );

    CalculationResult {
        regime: RegimeKind::OrdinaryIndividual,
        fiscal_year: input.fiscal_year,
        taxable_income,
        gross_tax: progressive.gross_tax,
        net_tax,
        effective_rate: progressive.effective_rate,
        lines: vec![
            LiabilityLine::new(LiabilityKind::IncomeTax, net_tax),
            LiabilityLine::new(LiabilityKind::RegionalSurcharge, regional_surcharge),
            LiabilityLine::new(LiabilityKind::MunicipalSurcharge, municipal_surcharge),
        ],
        contribution,
        vat_amount: vat.amount_due,
        vat_quarterly: vat.quarterly,
        installments,
        total_taxes,
        total_contributions: contribution.calculated_amount,
        total_due,
    }
    .rounded()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contribution::ContributionRegime;

    fn input() -> OrdinaryInput {
        OrdinaryInput {
            fiscal_year: 2025,
            revenue: 80_000.0,
            documented_expenses: 20_000.0,
            contribution: ContributionProfile::new(ContributionRegime::GestioneSeparata),
            ..Default::default()
        }
    }

    #[test]
    fn test_brackets_and_surcharges() {
        let tables = RateTables::default_2025();
        let result = calculate_ordinary(&input(), &tables);

        // 60000 taxable: 6440 + 7700 + 2150 + 5000 * 0.43 = 18440
        assert_eq!(result.taxable_income, 60_000.0);
        assert_eq!(result.gross_tax, 18_440.0);
        assert_eq!(result.net_tax, 18_440.0);
        assert_eq!(result.line(LiabilityKind::RegionalSurcharge), Some(1_038.0));
        assert_eq!(result.line(LiabilityKind::MunicipalSurcharge), Some(480.0));
        assert_eq!(result.total_taxes, 19_958.0);
    }

    #[test]
    fn test_contribution_on_business_income_only() {
        let tables = RateTables::default_2025();
        let mut req = input();
        req.employment_income = 30_000.0;
        let result = calculate_ordinary(&req, &tables);

        assert_eq!(result.taxable_income, 90_000.0);
        // 60000 * 26.07%
        assert_eq!(result.total_contributions, 15_642.0);
    }

    #[test]
    fn test_withholdings_floor_net_tax_at_zero() {
        let tables = RateTables::default_2025();
        let mut req = input();
        req.withholdings = 100_000.0;
        let result = calculate_ordinary(&req, &tables);
        assert_eq!(result.net_tax, 0.0);
        assert!(result.gross_tax > 0.0);
    }

    #[test]
    fn test_expenses_above_revenue() {
        let tables = RateTables::default_2025();
        let mut req = input();
        req.documented_expenses = 120_000.0;
        let result = calculate_ordinary(&req, &tables);
        assert_eq!(result.taxable_income, 0.0);
        assert_eq!(result.gross_tax, 0.0);
        assert_eq!(result.effective_rate, 0.0);
        // VAT credit position: nothing due
        assert_eq!(result.vat_amount, 0.0);
    }

    #[test]
    fn test_vat_quarters() {
        let tables = RateTables::default_2025();
        let result = calculate_ordinary(&input(), &tables);

        // (80000 - 20000) * 22% = 13200
        assert_eq!(result.vat_amount, 13_200.0);
        assert_eq!(result.vat_quarterly, [3_300.0; 4]);

        let mut req = input();
        req.has_vat_debt = false;
        let no_vat = calculate_ordinary(&req, &tables);
        assert_eq!(no_vat.vat_amount, 0.0);
        assert_eq!(no_vat.total_due, result.total_due - 13_200.0);
    }

    #[test]
    fn test_vat_quarters_add_up_to_vat_amount() {
        let tables = RateTables::default_2025();
        let mut req = input();
        req.sales_vat = Some(0.10);
        req.purchases_vat = Some(0.0);
        let result = calculate_ordinary(&req, &tables);

        assert_eq!(result.vat_amount, 0.1);
        assert_eq!(crate::money::round2(result.vat_quarterly.iter().sum()), 0.1);

        req.sales_vat = None;
        req.revenue = 80_001.23;
        let odd = calculate_ordinary(&req, &tables);
        assert_eq!(crate::money::round2(odd.vat_quarterly.iter().sum()), odd.vat_amount);
    }

    #[test]
    fn test_installments_from_prior_year() {
        let tables = RateTables::default_2025();
        let mut req = input();
        req.prior_year_tax = Some(10_000.0);
        let result = calculate_ordinary(&req, &tables);
        assert_eq!(result.installments.first, 4_000.0);
        assert_eq!(result.installments.second, 6_000.0);

        let estimated = calculate_ordinary(&input(), &tables);
        assert_eq!(estimated.installments.first, crate::money::round2(19_958.0 * 0.4));
    }
}
