//! Flat-rate small-business regime

use super::{CalculationResult, ContributionProfile, LiabilityKind, LiabilityLine, RegimeKind};
use crate::contribution::compute_contribution;
use crate::money::Installments;
use crate::rates::RateTables;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatRateInput {
    pub fiscal_year: i32,
    pub revenue: f64,
    /// Activity category key into the coefficient table
    pub category: Option<String>,
    /// Explicit coefficient, takes precedence over `category`
    pub coefficient: Option<f64>,
    pub is_startup: bool,
    /// First year of activity; defaults to the fiscal year
    pub start_year: Option<i32>,
    pub contribution: ContributionProfile,
    /// Prior-year substitute tax, base for the advance installments
    pub prior_year_tax: Option<f64>,
    pub current_balance: Option<f64>,
}

impl FlatRateInput {
    pub fn years_active(&self) -> i32 {
        self.fiscal_year.saturating_sub(self.start_year.unwrap_or(self.fiscal_year))
    }
}

/// Coefficient for the request: explicit value, else category lookup,
/// else the table's baseline
pub fn resolve_coefficient(input: &FlatRateInput, tables: &RateTables) -> f64 {
    if let Some(coefficient) = input.coefficient {
        return coefficient;
    }
    match input.category.as_deref() {
        Some(category) if !category.trim().is_empty() => tables.coefficients.coefficient(category),
        _ => {
            log::warn!(
                "no activity category supplied, using baseline coefficient {}",
                tables.coefficients.baseline()
            );
            tables.coefficients.baseline()
        }
    }
}

/// Substitute-tax rate: reduced while a start-up is within its first
/// `startup_max_years` years (inclusive), standard otherwise
pub fn substitute_tax_rate(input: &FlatRateInput, tables: &RateTables) -> f64 {
    let constants = &tables.constants;
    if input.is_startup && input.years_active() <= constants.startup_max_years {
        constants.flat_rate_startup
    } else {
        constants.flat_rate_standard
    }
}

pub fn calculate_flat_rate(input: &FlatRateInput, tables: &RateTables) -> CalculationResult {
    let coefficient = resolve_coefficient(input, tables);
    let taxable_income = (input.revenue * coefficient).max(0.0);
    let rate = substitute_tax_rate(input, tables);
    let tax = taxable_income * rate;

    let contribution = compute_contribution(
        taxable_income,
        input.contribution.regime_or_unrecognized(),
        &input.contribution.flags,
        &tables.contributions,
    );
    let installments = Installments::split(input.prior_year_tax.unwrap_or(tax));

    log::debug!(
        "flat-rate {}: taxable {:.2} (coefficient {}), tax {:.2} at {}",
        input.fiscal_year,
        taxable_income,
        coefficient,
        tax,
        rate
    );

    CalculationResult {
        regime: RegimeKind::FlatRate,
        fiscal_year: input.fiscal_year,
        taxable_income,
        gross_tax: tax,
        net_tax: tax,
        effective_rate: if taxable_income > 0.0 { rate } else { 0.0 },
        lines: vec![LiabilityLine::new(LiabilityKind::SubstituteTax, tax)],
        contribution,
        vat_amount: 0.0,
        vat_quarterly: [0.0; 4],
        installments,
        total_taxes: tax,
        total_contributions: contribution.calculated_amount,
        total_due: tax + contribution.calculated_amount,
    }
    .rounded()
}
