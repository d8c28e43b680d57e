//! Schedule events, simulated rows and summary statistics

use crate::money::round2;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Tax,
    Contribution,
    Vat,
    /// Synthetic monthly set-aside
    Accrual,
}

/// A dated cash movement: a statutory payment or a monthly accrual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: EventCategory,
    pub description: String,
    pub is_income: bool,
}

impl ScheduleEvent {
    pub fn payment(
        date: NaiveDate,
        amount: f64,
        category: EventCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category,
            description: description.into(),
            is_income: false,
        }
    }

    pub fn accrual(date: NaiveDate, amount: f64) -> Self {
        Self {
            date,
            amount,
            category: EventCategory::Accrual,
            description: format!("Monthly set-aside {}", date.format("%Y-%m")),
            is_income: true,
        }
    }
}

/// One simulated step of the running balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub date: NaiveDate,
    pub category: EventCategory,
    pub description: String,
    pub amount: f64,
    pub previous_balance: f64,
    pub new_balance: f64,
    /// Amount by which a payment exceeded the available balance
    pub deficit: f64,
    /// Top-up needed to make the payment; the amount itself for income rows
    pub required_payment: f64,
    pub is_income: bool,
}

/// Summary statistics for a simulated schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub rows: usize,
    pub total_accrued: f64,
    pub total_paid: f64,
    /// Sum of all payment top-ups
    pub total_shortfall: f64,
    pub final_balance: f64,
    pub lowest_balance: f64,
    pub first_shortfall: Option<NaiveDate>,
}

impl ScheduleSummary {
    pub fn from_rows(rows: &[ScheduleRow]) -> Self {
        let total_accrued: f64 = rows.iter().filter(|r| r.is_income).map(|r| r.amount).sum();
        let total_paid: f64 = rows.iter().filter(|r| !r.is_income).map(|r| r.amount).sum();
        let total_shortfall: f64 = rows
            .iter()
            .filter(|r| !r.is_income)
            .map(|r| r.required_payment)
            .sum();

        let final_balance = rows.last().map(|r| r.new_balance).unwrap_or(0.0);
        let lowest_balance = rows
            .iter()
            .map(|r| r.new_balance)
            .fold(None, |low: Option<f64>, b| Some(low.map_or(b, |l| l.min(b))))
            .unwrap_or(0.0);
        let first_shortfall = rows
            .iter()
            .find(|r| !r.is_income && r.required_payment > 0.0)
            .map(|r| r.date);

        Self {
            rows: rows.len(),
            total_accrued: round2(total_accrued),
            total_paid: round2(total_paid),
            total_shortfall: round2(total_shortfall),
            final_balance,
            lowest_balance,
            first_shortfall,
        }
    }

    pub fn is_fully_funded(&self) -> bool {
        self.first_shortfall.is_none()
    }
}
