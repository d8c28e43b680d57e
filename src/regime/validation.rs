//! Request validation
//!
//! Problems are collected, never raised: the caller gets every issue at
//! once and decides what to show.

use super::{CalculationInput, CorporateInput, FlatRateInput, OrdinaryInput};
use crate::error::{ValidationIssue, ValidationReport};
use crate::rates::RateTables;

/// Earliest fiscal or start year accepted
pub const MIN_YEAR: i32 = 1900;
/// Latest fiscal or start year accepted
pub const MAX_YEAR: i32 = 2100;

pub fn validate(input: &CalculationInput, tables: &RateTables) -> ValidationReport {
    let mut report = ValidationReport::default();

    // A missing fiscal_year deserializes as 0
    check_year(&mut report, "fiscal_year", input.fiscal_year());

    if input.revenue() <= 0.0 {
        report.push(ValidationIssue::NonPositiveRevenue);
    }

    match input {
        CalculationInput::FlatRate(i) => validate_flat_rate(i, tables, &mut report),
        CalculationInput::OrdinaryIndividual(i) => validate_ordinary(i, &mut report),
        CalculationInput::Corporate(i) => validate_corporate(i, &mut report),
    }

    report
}

fn check_year(report: &mut ValidationReport, field: &'static str, year: i32) -> bool {
    let in_range = (MIN_YEAR..=MAX_YEAR).contains(&year);
    if !in_range {
        report.push(ValidationIssue::YearOutOfRange {
            field,
            year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        });
    }
    in_range
}

fn check_non_negative(report: &mut ValidationReport, field: &'static str, value: f64) {
    if value < 0.0 {
        report.push(ValidationIssue::NegativeAmount { field });
    }
}

fn check_optional(report: &mut ValidationReport, field: &'static str, value: Option<f64>) {
    if let Some(v) = value {
        check_non_negative(report, field, v);
    }
}

fn validate_flat_rate(input: &FlatRateInput, tables: &RateTables, report: &mut ValidationReport) {
    let has_category = input
        .category
        .as_deref()
        .map(|c| !c.trim().is_empty())
        .unwrap_or(false);

    match input.coefficient {
        Some(value) if !(0.0..=1.0).contains(&value) => {
            report.push(ValidationIssue::CoefficientOutOfRange { value });
        }
        Some(_) => {}
        None if !has_category => report.push(ValidationIssue::MissingCategory),
        None => {}
    }

    if input.contribution.regime.is_none() {
        report.push(ValidationIssue::MissingContributionRegime);
    }

    let ceiling = tables.constants.flat_rate_revenue_ceiling;
    if input.revenue > ceiling {
        report.push(ValidationIssue::RevenueAboveCeiling {
            revenue: input.revenue,
            ceiling,
        });
    }

    if let Some(start_year) = input.start_year {
        if check_year(report, "start_year", start_year) && start_year > input.fiscal_year {
            report.push(ValidationIssue::StartYearAfterFiscalYear {
                start_year,
                fiscal_year: input.fiscal_year,
            });
        }
    }

    check_optional(report, "prior_year_tax", input.prior_year_tax);
}

fn validate_ordinary(input: &OrdinaryInput, report: &mut ValidationReport) {
    if input.contribution.regime.is_none() {
        report.push(ValidationIssue::MissingContributionRegime);
    }

    check_non_negative(report, "documented_expenses", input.documented_expenses);
    check_non_negative(report, "other_income", input.other_income);
    check_non_negative(report, "employment_income", input.employment_income);
    check_non_negative(report, "withholdings", input.withholdings);
    check_optional(report, "sales_vat", input.sales_vat);
    check_optional(report, "purchases_vat", input.purchases_vat);
    check_optional(report, "prior_year_tax", input.prior_year_tax);
}

fn validate_corporate(input: &CorporateInput, report: &mut ValidationReport) {
    let has_region = input
        .region
        .as_deref()
        .map(|r| !r.trim().is_empty())
        .unwrap_or(false);
    if !has_region {
        report.push(ValidationIssue::MissingRegion);
    }

    check_non_negative(report, "operating_costs", input.operating_costs);
    check_non_negative(report, "employee_costs", input.employee_costs);
    check_non_negative(report, "administrator_compensation", input.administrator_compensation);
    check_optional(report, "sales_vat", input.sales_vat);
    check_optional(report, "purchases_vat", input.purchases_vat);
    check_optional(report, "prior_year_corporate_tax", input.prior_year_corporate_tax);
    check_optional(report, "prior_year_regional_tax", input.prior_year_regional_tax);

    if input.employee_costs > 0.0 && input.employee_count == 0 {
        report.push(ValidationIssue::EmployeeCostsWithoutEmployees);
    }
}
