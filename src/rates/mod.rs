//! Rate tables: tax brackets, coefficients, regional rates and contribution constants
//!
//! All tables are plain values. They are built once (from the in-memory
//! 2025 defaults or from `data/rates/`) and then only ever read.

mod brackets;
mod coefficients;
mod regional;
mod contributions;
pub mod loader;

pub use brackets::{TaxBracket, BracketTable};
pub use coefficients::{ActivityCoefficients, BASELINE_COEFFICIENT};
pub use regional::{RegionalRates, DEFAULT_REGIONAL_RATE};
pub use contributions::{
    ContributionTables, GestioneSeparataConfig, CassaForenseConfig, InarcassaConfig,
    IvsConfig, AdministratorConfig,
};

use crate::error::RatesError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scalar tax constants that are not table-shaped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConstants {
    /// Flat-rate substitute tax
    pub flat_rate_standard: f64,
    /// Reduced substitute tax for start-ups
    pub flat_rate_startup: f64,
    /// Start-ups keep the reduced rate while years active <= this
    pub startup_max_years: i32,
    /// Revenue above which the flat-rate regime is not available
    pub flat_rate_revenue_ceiling: f64,
    /// National-average regional surcharge on individual income
    pub regional_surcharge_rate: f64,
    /// National-average municipal surcharge on individual income
    pub municipal_surcharge_rate: f64,
    /// Standard VAT rate used when VAT figures are not supplied
    pub standard_vat_rate: f64,
    pub corporate_tax_rate: f64,
}

impl TaxConstants {
    pub fn default_2025() -> Self {
        Self {
            flat_rate_standard: 0.15,
            flat_rate_startup: 0.05,
            startup_max_years: 5,
            flat_rate_revenue_ceiling: 85_000.0,
            regional_surcharge_rate: 0.0173,
            municipal_surcharge_rate: 0.008,
            standard_vat_rate: 0.22,
            corporate_tax_rate: 0.24,
        }
    }
}

/// Container for every table the engine reads
#[derive(Debug, Clone)]
pub struct RateTables {
    pub individual_brackets: BracketTable,
    pub coefficients: ActivityCoefficients,
    pub regional: RegionalRates,
    pub contributions: ContributionTables,
    pub constants: TaxConstants,
}

impl RateTables {
    /// Built-in 2025 tables
    pub fn default_2025() -> Self {
        Self {
            individual_brackets: BracketTable::individual_2025(),
            coefficients: ActivityCoefficients::default_2025(),
            regional: RegionalRates::default_2025(),
            contributions: ContributionTables::default_2025(),
            constants: TaxConstants::default_2025(),
        }
    }

    /// Load tables from the default location (data/rates/)
    pub fn from_csv() -> Result<Self, RatesError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RATES_PATH))
    }

    /// Load tables from a specific directory. Contribution constants are
    /// checked before use.
    pub fn from_csv_path(path: &Path) -> Result<Self, RatesError> {
        let loaded = loader::LoadedRates::load_from(path)?;
        loaded.regimes.contributions.validate()?;

        Ok(Self {
            individual_brackets: BracketTable::new(loaded.individual_brackets)?,
            coefficients: ActivityCoefficients::from_entries(
                loaded.coefficients,
                BASELINE_COEFFICIENT,
            ),
            regional: RegionalRates::from_entries(loaded.regional_rates, DEFAULT_REGIONAL_RATE),
            contributions: loaded.regimes.contributions,
            constants: loaded.regimes.constants,
        })
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::default_2025()
    }
}
