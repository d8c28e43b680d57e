//! File-based rate table loader
//!
//! Loads rate tables from CSV/JSON files in data/rates/

use super::{ContributionTables, TaxBracket, TaxConstants};
use crate::error::RatesError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Default path to the rates directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

pub const BRACKETS_FILE: &str = "individual_brackets.csv";
pub const COEFFICIENTS_FILE: &str = "activity_coefficients.csv";
pub const REGIONAL_FILE: &str = "regional_rates.csv";
pub const REGIMES_FILE: &str = "contribution_regimes.json";

#[derive(Debug, Deserialize)]
struct BracketRow {
    lower_bound: f64,
    upper_bound: Option<f64>,
    rate: f64,
}

#[derive(Debug, Deserialize)]
struct KeyedRateRow {
    #[serde(alias = "category", alias = "region")]
    key: String,
    #[serde(alias = "coefficient", alias = "rate")]
    value: f64,
}

/// Contents of contribution_regimes.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeFile {
    pub constants: TaxConstants,
    pub contributions: ContributionTables,
}

fn open(path: &Path) -> Result<File, RatesError> {
    File::open(path).map_err(|source| RatesError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn read_csv<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, RatesError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| RatesError::Csv {
            path: path.display().to_string(),
            source,
        })
}

/// Load the individual income tax brackets
pub fn load_brackets(dir: &Path) -> Result<Vec<TaxBracket>, RatesError> {
    let rows: Vec<BracketRow> = read_csv(&dir.join(BRACKETS_FILE))?;
    Ok(rows
        .into_iter()
        .map(|row| TaxBracket::new(row.lower_bound, row.upper_bound, row.rate))
        .collect())
}

/// Load activity category coefficients
/// Returns Vec<(category, coefficient)>
pub fn load_coefficients(dir: &Path) -> Result<Vec<(String, f64)>, RatesError> {
    let rows: Vec<KeyedRateRow> = read_csv(&dir.join(COEFFICIENTS_FILE))?;
    for row in &rows {
        if !(0.0..=1.0).contains(&row.value) {
            return Err(RatesError::InvalidTable {
                table: COEFFICIENTS_FILE,
                reason: format!("coefficient {} for '{}' outside [0, 1]", row.value, row.key),
            });
        }
    }
    Ok(rows.into_iter().map(|row| (row.key, row.value)).collect())
}

/// Load regional turnover-tax rates
/// Returns Vec<(region, rate)>
pub fn load_regional_rates(dir: &Path) -> Result<Vec<(String, f64)>, RatesError> {
    let rows: Vec<KeyedRateRow> = read_csv(&dir.join(REGIONAL_FILE))?;
    Ok(rows.into_iter().map(|row| (row.key, row.value)).collect())
}

/// Load scalar constants and contribution regime parameters
pub fn load_regimes(dir: &Path) -> Result<RegimeFile, RatesError> {
    let path = dir.join(REGIMES_FILE);
    let file = open(&path)?;
    serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| RatesError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Everything read from a rates directory, before validation
pub struct LoadedRates {
    pub individual_brackets: Vec<TaxBracket>,
    pub coefficients: Vec<(String, f64)>,
    pub regional_rates: Vec<(String, f64)>,
    pub regimes: RegimeFile,
}

impl LoadedRates {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, RatesError> {
        Self::load_from(Path::new(DEFAULT_RATES_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, RatesError> {
        let loaded = Self {
            individual_brackets: load_brackets(path)?,
            coefficients: load_coefficients(path)?,
            regional_rates: load_regional_rates(path)?,
            regimes: load_regimes(path)?,
        };
        log::debug!(
            "loaded {} brackets, {} coefficients, {} regions from {}",
            loaded.individual_brackets.len(),
            loaded.coefficients.len(),
            loaded.regional_rates.len(),
            path.display()
        );
        Ok(loaded)
    }
}
