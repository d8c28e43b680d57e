//! Regime calculators: flat-rate, ordinary individual and corporate
//!
//! A request arrives as one of three `CalculationInput` payloads. The
//! matching orchestrator derives taxable income, delegates to the bracket
//! and contribution calculators, adds VAT and advance installments and
//! returns a rounded `CalculationResult`.

mod flat_rate;
mod ordinary;
mod corporate;
mod validation;

pub use flat_rate::{calculate_flat_rate, FlatRateInput};
pub use ordinary::{calculate_ordinary, OrdinaryInput};
pub use corporate::{calculate_corporate, CorporateInput};
pub use validation::validate;

use crate::contribution::{ContributionBreakdown, ContributionFlags, ContributionRegime};
use crate::error::ValidationReport;
use crate::money::{round2, split_quarters, Installments};
use crate::rates::RateTables;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Fiscal regime of a calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimeKind {
    FlatRate,
    OrdinaryIndividual,
    Corporate,
}

/// Contribution scheme selector plus the flags its formula reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionProfile {
    pub regime: Option<ContributionRegime>,
    #[serde(flatten)]
    pub flags: ContributionFlags,
}

impl ContributionProfile {
    pub fn new(regime: ContributionRegime) -> Self {
        Self {
            regime: Some(regime),
            flags: ContributionFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: ContributionFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Selected regime; a missing selector computes like an unknown one
    pub fn regime_or_unrecognized(&self) -> ContributionRegime {
        self.regime.unwrap_or(ContributionRegime::Unrecognized)
    }
}

/// One calculation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "regime", rename_all = "snake_case")]
pub enum CalculationInput {
    FlatRate(FlatRateInput),
    OrdinaryIndividual(OrdinaryInput),
    Corporate(CorporateInput),
}

impl CalculationInput {
    pub fn kind(&self) -> RegimeKind {
        match self {
            CalculationInput::FlatRate(_) => RegimeKind::FlatRate,
            CalculationInput::OrdinaryIndividual(_) => RegimeKind::OrdinaryIndividual,
            CalculationInput::Corporate(_) => RegimeKind::Corporate,
        }
    }

    pub fn fiscal_year(&self) -> i32 {
        match self {
            CalculationInput::FlatRate(i) => i.fiscal_year,
            CalculationInput::OrdinaryIndividual(i) => i.fiscal_year,
            CalculationInput::Corporate(i) => i.fiscal_year,
        }
    }

    pub fn revenue(&self) -> f64 {
        match self {
            CalculationInput::FlatRate(i) => i.revenue,
            CalculationInput::OrdinaryIndividual(i) => i.revenue,
            CalculationInput::Corporate(i) => i.revenue,
        }
    }

    /// Liquid balance declared by the caller, if any
    pub fn current_balance(&self) -> Option<f64> {
        match self {
            CalculationInput::FlatRate(i) => i.current_balance,
            CalculationInput::OrdinaryIndividual(i) => i.current_balance,
            CalculationInput::Corporate(i) => i.current_balance,
        }
    }
}

/// What a result line refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiabilityKind {
    SubstituteTax,
    IncomeTax,
    RegionalSurcharge,
    MunicipalSurcharge,
    CorporateTax,
    RegionalTurnoverTax,
    AdministratorContribution,
    EmployerContribution,
}

/// Itemised liability for rendering and export
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiabilityLine {
    pub kind: LiabilityKind,
    pub amount: f64,
}

impl LiabilityLine {
    pub fn new(kind: LiabilityKind, amount: f64) -> Self {
        Self { kind, amount }
    }
}

/// Output of one calculation. Monetary fields are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub regime: RegimeKind,
    pub fiscal_year: i32,
    pub taxable_income: f64,
    pub gross_tax: f64,
    pub net_tax: f64,
    pub effective_rate: f64,
    pub lines: Vec<LiabilityLine>,
    pub contribution: ContributionBreakdown,
    pub vat_amount: f64,
    pub vat_quarterly: [f64; 4],
    pub installments: Installments,
    pub total_taxes: f64,
    pub total_contributions: f64,
    pub total_due: f64,
}

impl CalculationResult {
    /// Round every monetary field half-up to 2 decimals
    pub fn rounded(self) -> Self {
        Self {
            regime: self.regime,
            fiscal_year: self.fiscal_year,
            taxable_income: round2(self.taxable_income),
            gross_tax: round2(self.gross_tax),
            net_tax: round2(self.net_tax),
            effective_rate: self.effective_rate,
            lines: self
                .lines
                .into_iter()
                .map(|line| LiabilityLine::new(line.kind, round2(line.amount)))
                .collect(),
            contribution: self.contribution.rounded(),
            vat_amount: round2(self.vat_amount),
            vat_quarterly: split_quarters(self.vat_amount),
            installments: self.installments.rounded(),
            total_taxes: round2(self.total_taxes),
            total_contributions: round2(self.total_contributions),
            total_due: round2(self.total_due),
        }
    }

    pub fn line(&self, kind: LiabilityKind) -> Option<f64> {
        self.lines.iter().find(|l| l.kind == kind).map(|l| l.amount)
    }

    /// Everything the schedule will have to pay: liabilities plus advances
    pub fn total_scheduled(&self) -> f64 {
        self.total_due + self.installments.total()
    }
}

/// Calculation engine bound to a set of rate tables
#[derive(Debug, Clone)]
pub struct Engine {
    tables: RateTables,
}

impl Engine {
    pub fn new(tables: RateTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    /// Compute liabilities. Total over structurally valid input: unknown
    /// categories, regions and contribution regimes fall back to defaults.
    pub fn calculate(&self, input: &CalculationInput) -> CalculationResult {
        match input {
            CalculationInput::FlatRate(i) => calculate_flat_rate(i, &self.tables),
            CalculationInput::OrdinaryIndividual(i) => calculate_ordinary(i, &self.tables),
            CalculationInput::Corporate(i) => calculate_corporate(i, &self.tables),
        }
    }

    pub fn validate(&self, input: &CalculationInput) -> ValidationReport {
        validate(input, &self.tables)
    }

    /// Validate first, calculate only when the request is clean
    pub fn try_calculate(
        &self,
        input: &CalculationInput,
    ) -> Result<CalculationResult, ValidationReport> {
        let report = self.validate(input);
        if !report.is_valid() {
            log::debug!("rejected {:?} request: {}", input.kind(), report);
            return Err(report);
        }
        Ok(self.calculate(input))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(RateTables::default_2025())
    }
}

/// Engine over the built-in 2025 tables, built on first use
pub fn default_engine() -> &'static Engine {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    ENGINE.get_or_init(Engine::default)
}

/// Compute liabilities with the built-in 2025 tables
pub fn calculate(input: &CalculationInput) -> CalculationResult {
    default_engine().calculate(input)
}
