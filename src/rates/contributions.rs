//! Social contribution regime constants

use super::loader::REGIMES_FILE;
use crate::error::RatesError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Separate pension fund for freelancers without a professional fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestioneSeparataConfig {
    /// Rate for contributors with no other compulsory coverage
    pub full_rate: f64,
    /// Rate for pensioners and contributors covered elsewhere
    pub reduced_rate: f64,
    /// Income cap (massimale)
    pub max_income: f64,
    /// Uplift applied to income when the 4% recharge is billed to clients
    pub reverse_charge_uplift: f64,
}

/// Lawyers' fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CassaForenseConfig {
    pub subjective_rate: f64,
    /// Income up to which the full subjective rate applies
    pub income_threshold: f64,
    /// Marginal rate on income above the threshold
    pub above_threshold_rate: f64,
    pub integrative_rate: f64,
    pub minimum_subjective: f64,
    pub minimum_integrative: f64,
}

/// Engineers' and architects' fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InarcassaConfig {
    pub subjective_rate: f64,
    pub max_income: f64,
    pub minimum_subjective: f64,
    /// Applied to the full, uncapped income
    pub integrative_rate: f64,
    pub minimum_integrative: f64,
    /// Fixed maternity/paternity contribution
    pub maternity: f64,
}

/// Craftsmen and traders (IVS) funds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvsConfig {
    /// Due on the minimum income regardless of actual income
    pub fixed_contribution: f64,
    /// Minimum income floor (minimale)
    pub minimum_income: f64,
    /// Income above which the upper rate applies
    pub income_threshold: f64,
    pub base_rate: f64,
    pub upper_rate: f64,
    /// Income cap (massimale)
    pub max_income: f64,
    /// Extra percentage levied on the contribution base (traders only)
    #[serde(default)]
    pub surcharge_rate: f64,
}

/// Company administrator contribution (separate fund, employer share)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdministratorConfig {
    pub rate: f64,
    pub minimum_base: f64,
    pub maximum_base: f64,
}

/// Every contribution regime's constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionTables {
    pub gestione_separata: GestioneSeparataConfig,
    pub cassa_forense: CassaForenseConfig,
    pub inarcassa: InarcassaConfig,
    pub artigiani: IvsConfig,
    pub commercianti: IvsConfig,
    pub administrator: AdministratorConfig,
    /// Employer social charges as a share of employee costs
    pub employer_rate: f64,
}

impl ContributionTables {
    pub fn default_2025() -> Self {
        Self {
            gestione_separata: GestioneSeparataConfig {
                full_rate: 0.2607,
                reduced_rate: 0.24,
                max_income: 120_607.0,
                reverse_charge_uplift: 0.04,
            },
            cassa_forense: CassaForenseConfig {
                subjective_rate: 0.17,
                income_threshold: 130_000.0,
                above_threshold_rate: 0.03,
                integrative_rate: 0.04,
                minimum_subjective: 3_120.0,
                minimum_integrative: 350.0,
            },
            inarcassa: InarcassaConfig {
                subjective_rate: 0.145,
                max_income: 140_350.0,
                minimum_subjective: 2_475.0,
                integrative_rate: 0.04,
                minimum_integrative: 815.0,
                maternity: 86.0,
            },
            artigiani: IvsConfig {
                fixed_contribution: 4_460.64,
                minimum_income: 18_555.0,
                income_threshold: 55_448.0,
                base_rate: 0.24,
                upper_rate: 0.25,
                max_income: 92_413.0,
                surcharge_rate: 0.0,
            },
            commercianti: IvsConfig {
                fixed_contribution: 4_460.64,
                minimum_income: 18_555.0,
                income_threshold: 55_448.0,
                base_rate: 0.24,
                upper_rate: 0.25,
                max_income: 92_413.0,
                surcharge_rate: 0.0048,
            },
            administrator: AdministratorConfig {
                rate: 0.3503,
                minimum_base: 18_555.0,
                maximum_base: 120_607.0,
            },
            employer_rate: 0.30,
        }
    }
}

fn invalid(reason: String) -> RatesError {
    RatesError::InvalidTable {
        table: REGIMES_FILE,
        reason,
    }
}

fn check_rate(name: &str, rate: f64) -> Result<(), RatesError> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(invalid(format!("{} {} outside [0, 1]", name, rate)));
    }
    Ok(())
}

fn check_amount(name: &str, amount: f64) -> Result<(), RatesError> {
    if !(0.0..).contains(&amount) {
        return Err(invalid(format!("{} must not be negative, got {}", name, amount)));
    }
    Ok(())
}

fn check_order(lower: (&str, f64), upper: (&str, f64)) -> Result<(), RatesError> {
    // NaN compares as None and is rejected too
    if !matches!(lower.1.partial_cmp(&upper.1), Some(Ordering::Less | Ordering::Equal)) {
        return Err(invalid(format!("{} {} exceeds {} {}", lower.0, lower.1, upper.0, upper.1)));
    }
    Ok(())
}

impl IvsConfig {
    fn validate(&self, fund: &str) -> Result<(), RatesError> {
        check_rate(&format!("{}.base_rate", fund), self.base_rate)?;
        check_rate(&format!("{}.upper_rate", fund), self.upper_rate)?;
        check_rate(&format!("{}.surcharge_rate", fund), self.surcharge_rate)?;
        check_amount(&format!("{}.fixed_contribution", fund), self.fixed_contribution)?;
        check_amount(&format!("{}.minimum_income", fund), self.minimum_income)?;
        check_order(
            (&format!("{}.minimum_income", fund), self.minimum_income),
            (&format!("{}.income_threshold", fund), self.income_threshold),
        )?;
        check_order(
            (&format!("{}.income_threshold", fund), self.income_threshold),
            (&format!("{}.max_income", fund), self.max_income),
        )
    }
}

impl ContributionTables {
    /// Reject tables the formulas cannot use: rates outside [0, 1],
    /// negative amounts, or lower bounds above upper bounds
    pub fn validate(&self) -> Result<(), RatesError> {
        let gs = &self.gestione_separata;
        check_rate("gestione_separata.full_rate", gs.full_rate)?;
        check_rate("gestione_separata.reduced_rate", gs.reduced_rate)?;
        check_rate("gestione_separata.reverse_charge_uplift", gs.reverse_charge_uplift)?;
        check_amount("gestione_separata.max_income", gs.max_income)?;

        let forense = &self.cassa_forense;
        check_rate("cassa_forense.subjective_rate", forense.subjective_rate)?;
        check_rate("cassa_forense.above_threshold_rate", forense.above_threshold_rate)?;
        check_rate("cassa_forense.integrative_rate", forense.integrative_rate)?;
        check_amount("cassa_forense.income_threshold", forense.income_threshold)?;
        check_amount("cassa_forense.minimum_subjective", forense.minimum_subjective)?;
        check_amount("cassa_forense.minimum_integrative", forense.minimum_integrative)?;

        let inarcassa = &self.inarcassa;
        check_rate("inarcassa.subjective_rate", inarcassa.subjective_rate)?;
        check_rate("inarcassa.integrative_rate", inarcassa.integrative_rate)?;
        check_amount("inarcassa.max_income", inarcassa.max_income)?;
        check_amount("inarcassa.minimum_subjective", inarcassa.minimum_subjective)?;
        check_amount("inarcassa.minimum_integrative", inarcassa.minimum_integrative)?;
        check_amount("inarcassa.maternity", inarcassa.maternity)?;

        self.artigiani.validate("artigiani")?;
        self.commercianti.validate("commercianti")?;

        let admin = &self.administrator;
        check_rate("administrator.rate", admin.rate)?;
        check_amount("administrator.minimum_base", admin.minimum_base)?;
        check_order(
            ("administrator.minimum_base", admin.minimum_base),
            ("administrator.maximum_base", admin.maximum_base),
        )?;

        check_rate("employer_rate", self.employer_rate)
    }
}

impl Default for ContributionTables {
    fn default() -> Self {
        Self::default_2025()
    }
}
