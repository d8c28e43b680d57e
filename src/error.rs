//! Error types
//!
//! Loading rate tables can fail (missing files, malformed rows); those
//! failures are `RatesError`. Calculations never fail: bad caller input is
//! reported as a list of `ValidationIssue`s collected in a
//! `ValidationReport`, each of which renders as a human-readable message.

use serde::Serialize;
use thiserror::Error;

/// Failure while loading rate tables from disk
#[derive(Error, Debug)]
pub enum RatesError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Bracket table empty, unordered, gapped or overlapping
    #[error("invalid bracket table: {0}")]
    InvalidBrackets(String),

    #[error("invalid rate table {table}: {reason}")]
    InvalidTable { table: &'static str, reason: String },
}

/// One field-level problem with a calculation request
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("revenue must be greater than zero")]
    NonPositiveRevenue,

    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },

    #[error("an activity category or an explicit coefficient is required")]
    MissingCategory,

    #[error("coefficient must be between 0 and 1, got {value}")]
    CoefficientOutOfRange { value: f64 },

    #[error("a contribution regime must be selected")]
    MissingContributionRegime,

    #[error("revenue {revenue:.2} exceeds the flat-rate eligibility ceiling of {ceiling:.2}")]
    RevenueAboveCeiling { revenue: f64, ceiling: f64 },

    #[error("{field} {year} is outside the supported range {min}-{max}")]
    YearOutOfRange {
        field: &'static str,
        year: i32,
        min: i32,
        max: i32,
    },

    #[error("start year {start_year} is after fiscal year {fiscal_year}")]
    StartYearAfterFiscalYear { start_year: i32, fiscal_year: i32 },

    #[error("a region is required for the regional turnover tax")]
    MissingRegion,

    #[error("employee costs are declared but employee count is zero")]
    EmployeeCostsWithoutEmployees,
}

impl ValidationIssue {
    /// Input field the issue refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationIssue::NonPositiveRevenue => "revenue",
            ValidationIssue::NegativeAmount { field } => *field,
            ValidationIssue::MissingCategory => "category",
            ValidationIssue::CoefficientOutOfRange { .. } => "coefficient",
            ValidationIssue::MissingContributionRegime => "contribution.regime",
            ValidationIssue::RevenueAboveCeiling { .. } => "revenue",
            ValidationIssue::YearOutOfRange { field, .. } => *field,
            ValidationIssue::StartYearAfterFiscalYear { .. } => "start_year",
            ValidationIssue::MissingRegion => "region",
            ValidationIssue::EmployeeCostsWithoutEmployees => "employee_count",
        }
    }
}

/// Field-level message as handed back to a form layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMessage {
    pub field: &'static str,
    pub message: String,
}

/// All problems found in one request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn messages(&self) -> Vec<FieldMessage> {
        self.issues
            .iter()
            .map(|issue| FieldMessage {
                field: issue.field(),
                message: issue.to_string(),
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|issue| format!("{}: {}", issue.field(), issue))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationReport {}
