//! Fiscal Engine - tax and social-contribution liabilities with payment scheduling
//!
//! This library provides:
//! - Flat-rate, ordinary individual and corporate regime calculations
//! - Progressive bracket tax and VAT settlement
//! - Social-security contributions for each pension scheme
//! - Statutory payment calendar and cash-flow simulation of a set-aside balance
//! - Rate tables with built-in 2025 defaults or CSV/JSON overrides

pub mod money;
pub mod error;
pub mod rates;
pub mod tax;
pub mod contribution;
pub mod regime;
pub mod schedule;
pub mod scenario;

// Re-export commonly used types
pub use error::{RatesError, ValidationIssue, ValidationReport};
pub use rates::RateTables;
pub use contribution::{ContributionRegime, ContributionRule, ReductionFactor};
pub use regime::{
    calculate, validate, CalculationInput, CalculationResult, ContributionProfile, CorporateInput,
    Engine, FlatRateInput, OrdinaryInput, RegimeKind,
};
pub use schedule::{
    build_schedule, generate_deadlines, simulate, ScheduleEvent, ScheduleOptions, ScheduleRow,
    ScheduleSummary,
};
pub use scenario::ScenarioRunner;
