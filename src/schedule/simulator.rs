//! Payment schedule simulation

use super::deadlines::generate_deadlines;
use super::events::{ScheduleEvent, ScheduleRow};
use super::state::BalanceState;
use crate::regime::CalculationResult;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Accrual multiplier for the conservative alternative schedule
pub const CONSERVATIVE_ACCRUAL_MULTIPLIER: f64 = 1.10;

/// Configuration for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    /// Events dated before this day are dropped; accruals start at the
    /// first month beginning on or after it
    pub today: NaiveDate,

    /// Year whose months receive accruals. Defaults to the year of `today`
    /// in `simulate` and to the result's fiscal year in `build_schedule`.
    pub fiscal_year: Option<i32>,
}

impl ScheduleOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self { today, fiscal_year: None }
    }

    pub fn for_year(mut self, fiscal_year: i32) -> Self {
        self.fiscal_year = Some(fiscal_year);
        self
    }

    fn accrual_year(&self) -> i32 {
        self.fiscal_year.unwrap_or_else(|| self.today.year())
    }
}

/// One accrual on the first of every month of the fiscal year not
/// already behind `today`
pub fn accrual_events(monthly_accrual: f64, options: &ScheduleOptions) -> Vec<ScheduleEvent> {
    let year = options.accrual_year();
    (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .filter(|date| *date >= options.today)
        .map(|date| ScheduleEvent::accrual(date, monthly_accrual))
        .collect()
}

/// Walk accruals and due-date events in date order, tracking the balance.
///
/// Events before `options.today` are discarded. On a shared date accruals
/// come first, so a month's set-aside is available to payments due that day.
pub fn simulate(
    events: &[ScheduleEvent],
    initial_balance: f64,
    monthly_accrual: f64,
    options: &ScheduleOptions,
) -> Vec<ScheduleRow> {
    let mut timeline = accrual_events(monthly_accrual, options);
    let accruals = timeline.len();
    timeline.extend(events.iter().filter(|e| e.date >= options.today).cloned());
    let dropped = events.len() + accruals - timeline.len();
    if dropped > 0 {
        log::debug!("dropped {} events dated before {}", dropped, options.today);
    }

    // Stable: keeps accruals ahead of same-day payments
    timeline.sort_by_key(|e| e.date);

    let mut state = BalanceState::new(initial_balance);
    let rows: Vec<ScheduleRow> = timeline.iter().map(|event| state.apply(event)).collect();

    log::debug!(
        "simulated {} rows ({} accruals of {:.2}), closing balance {:.2}",
        rows.len(),
        accruals,
        monthly_accrual,
        state.balance
    );
    rows
}

/// Monthly set-aside that spreads the year's liabilities and advances
/// over twelve months, scaled by `accrual_multiplier`
pub fn monthly_accrual(result: &CalculationResult, accrual_multiplier: f64) -> f64 {
    result.total_scheduled() / 12.0 * accrual_multiplier
}

/// Deadlines for `result` simulated against its own monthly accrual.
///
/// Each call recomputes from scratch; a conservative schedule is simply a
/// second call with a larger multiplier.
pub fn build_schedule(
    result: &CalculationResult,
    initial_balance: f64,
    accrual_multiplier: f64,
    options: &ScheduleOptions,
) -> Vec<ScheduleRow> {
    let options = ScheduleOptions {
        fiscal_year: Some(options.fiscal_year.unwrap_or(result.fiscal_year)),
        ..*options
    };
    let events = generate_deadlines(result, result.regime, result.fiscal_year);
    simulate(&events, initial_balance, monthly_accrual(result, accrual_multiplier), &options)
}
