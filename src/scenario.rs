//! Scenario runner for batch calculations
//!
//! Loads rate tables once, then runs many requests and their payment
//! schedules without re-reading the CSV files.

use crate::error::{RatesError, ValidationReport};
use crate::rates::RateTables;
use crate::regime::{CalculationInput, CalculationResult, Engine};
use crate::schedule::{
    build_schedule, ScheduleOptions, ScheduleRow, ScheduleSummary, CONSERVATIVE_ACCRUAL_MULTIPLIER,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

/// A calculation together with its base and conservative schedules
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub result: CalculationResult,
    pub base_schedule: Vec<ScheduleRow>,
    pub conservative_schedule: Vec<ScheduleRow>,
}

impl ScenarioOutcome {
    pub fn base_summary(&self) -> ScheduleSummary {
        ScheduleSummary::from_rows(&self.base_schedule)
    }

    pub fn conservative_summary(&self) -> ScheduleSummary {
        ScheduleSummary::from_rows(&self.conservative_schedule)
    }
}

/// Pre-loaded runner for batch calculations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
/// let options = ScheduleOptions::new(today);
///
/// for input in &requests {
///     let outcome = runner.try_run_with_schedules(input, &options)?;
///     println!("{:?}", outcome.base_summary());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: Engine,
}

impl ScenarioRunner {
    /// Runner over the built-in 2025 tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tables from the default `data/rates` directory
    pub fn from_csv() -> Result<Self, RatesError> {
        Ok(Self::with_tables(RateTables::from_csv()?))
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, RatesError> {
        Ok(Self::with_tables(RateTables::from_csv_path(path)?))
    }

    pub fn with_tables(tables: RateTables) -> Self {
        Self {
            engine: Engine::new(tables),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn tables(&self) -> &RateTables {
        self.engine.tables()
    }

    /// Validate and calculate one request
    pub fn run(&self, input: &CalculationInput) -> Result<CalculationResult, ValidationReport> {
        self.engine.try_calculate(input)
    }

    /// Validate and calculate many requests in parallel. Output order
    /// matches input order.
    pub fn run_batch(
        &self,
        inputs: &[CalculationInput],
    ) -> Vec<Result<CalculationResult, ValidationReport>> {
        inputs.par_iter().map(|input| self.run(input)).collect()
    }

    /// Calculate without validation, then build the base and conservative
    /// schedules from the request's declared balance (zero when absent)
    pub fn run_with_schedules(
        &self,
        input: &CalculationInput,
        options: &ScheduleOptions,
    ) -> ScenarioOutcome {
        self.outcome(input, self.engine.calculate(input), options)
    }

    /// Validate and calculate once, then build both schedules from that
    /// result
    pub fn try_run_with_schedules(
        &self,
        input: &CalculationInput,
        options: &ScheduleOptions,
    ) -> Result<ScenarioOutcome, ValidationReport> {
        let result = self.run(input)?;
        Ok(self.outcome(input, result, options))
    }

    fn outcome(
        &self,
        input: &CalculationInput,
        result: CalculationResult,
        options: &ScheduleOptions,
    ) -> ScenarioOutcome {
        let initial_balance = input.current_balance().unwrap_or(0.0);

        let base_schedule = build_schedule(&result, initial_balance, 1.0, options);
        let conservative_schedule =
            build_schedule(&result, initial_balance, CONSERVATIVE_ACCRUAL_MULTIPLIER, options);

        ScenarioOutcome {
            result,
            base_schedule,
            conservative_schedule,
        }
    }
}
