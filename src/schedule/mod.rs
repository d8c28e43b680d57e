//! Payment calendar and cash-flow simulation for a calculated liability

mod events;
mod deadlines;
mod state;
mod simulator;

pub use events::{EventCategory, ScheduleEvent, ScheduleRow, ScheduleSummary};
pub use deadlines::{generate_deadlines, CONTRIBUTION_DATES, VAT_DATES};
pub use state::BalanceState;
pub use simulator::{
    accrual_events, build_schedule, monthly_accrual, simulate, ScheduleOptions,
    CONSERVATIVE_ACCRUAL_MULTIPLIER,
};
