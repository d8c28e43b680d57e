//! Running balance tracked through a schedule simulation

use super::events::{ScheduleEvent, ScheduleRow};
use crate::money::round2;

/// Set-aside balance at a point in the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceState {
    /// Funds available after the last applied event; never negative
    pub balance: f64,

    /// Number of events applied so far
    pub step: usize,
}

impl BalanceState {
    /// Start from the caller's liquid balance. A negative opening balance
    /// is treated as zero.
    pub fn new(initial_balance: f64) -> Self {
        let balance = if initial_balance < 0.0 {
            log::warn!("negative opening balance {:.2} treated as zero", initial_balance);
            0.0
        } else {
            initial_balance
        };
        Self { balance, step: 0 }
    }

    /// Apply one event and emit its row.
    ///
    /// Income adds to the balance. A payment draws it down; any part the
    /// balance cannot cover is reported as `deficit`/`required_payment`
    /// and the balance stops at zero.
    pub fn apply(&mut self, event: &ScheduleEvent) -> ScheduleRow {
        let previous_balance = self.balance;

        let (required_payment, deficit) = if event.is_income {
            self.balance += event.amount;
            (event.amount, 0.0)
        } else {
            let tentative = self.balance - event.amount;
            if tentative < 0.0 {
                self.balance = 0.0;
                (-tentative, -tentative)
            } else {
                self.balance = tentative;
                (0.0, 0.0)
            }
        };
        self.step += 1;

        ScheduleRow {
            date: event.date,
            category: event.category,
            description: event.description.clone(),
            amount: round2(event.amount),
            previous_balance: round2(previous_balance),
            new_balance: round2(self.balance),
            deficit: round2(deficit),
            required_payment: round2(required_payment),
            is_income: event.is_income,
        }
    }
}
