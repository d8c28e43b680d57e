//! Statutory payment calendar

use super::events::{EventCategory, ScheduleEvent};
use crate::money::split_quarters;
use crate::regime::{CalculationResult, RegimeKind};
use chrono::NaiveDate;

/// Balance and first advance
pub const BALANCE_DUE: (u32, u32) = (6, 30);
/// Second advance
pub const SECOND_ADVANCE_DUE: (u32, u32) = (11, 30);

/// Quarterly contribution dates as (year offset, month, day)
pub const CONTRIBUTION_DATES: [(i32, u32, u32); 4] =
    [(0, 5, 16), (0, 8, 20), (0, 11, 16), (1, 2, 16)];

/// Quarterly VAT dates as (year offset, month, day); Q4 settles in March
pub const VAT_DATES: [(i32, u32, u32); 4] =
    [(0, 5, 16), (0, 8, 20), (0, 11, 16), (1, 3, 16)];

fn tax_label(regime: RegimeKind) -> &'static str {
    match regime {
        RegimeKind::FlatRate => "substitute tax",
        RegimeKind::OrdinaryIndividual => "income tax",
        RegimeKind::Corporate => "corporate and regional tax",
    }
}

/// Calendar date `offset` years after `fiscal_year`; `None` when the year
/// is out of range
fn due_date(fiscal_year: i32, offset: i32, month: u32, day: u32) -> Option<NaiveDate> {
    fiscal_year
        .checked_add(offset)
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
}

/// Build the dated liabilities for `fiscal_year`, sorted by date.
///
/// Dates are fixed calendar entries; amounts come straight from `result`.
/// Quarterly contributions are split in whole cents with the remainder on
/// the last quarter. Zero-amount liabilities are left out.
pub fn generate_deadlines(
    result: &CalculationResult,
    regime: RegimeKind,
    fiscal_year: i32,
) -> Vec<ScheduleEvent> {
    let mut events = Vec::new();
    let label = tax_label(regime);

    let mut push =
        |date: Option<NaiveDate>, amount: f64, category: EventCategory, description: String| {
            match date {
                Some(date) if amount > 0.0 => {
                    events.push(ScheduleEvent::payment(date, amount, category, description));
                }
                Some(_) => {}
                None => log::warn!("no calendar date for '{}' in {}", description, fiscal_year),
            }
        };

    let (m, d) = BALANCE_DUE;
    push(
        due_date(fiscal_year, 0, m, d),
        result.total_taxes,
        EventCategory::Tax,
        format!("{} {} balance", fiscal_year, label),
    );
    push(
        due_date(fiscal_year, 0, m, d),
        result.installments.first,
        EventCategory::Tax,
        format!("{} {} first advance", fiscal_year, label),
    );
    let (m, d) = SECOND_ADVANCE_DUE;
    push(
        due_date(fiscal_year, 0, m, d),
        result.installments.second,
        EventCategory::Tax,
        format!("{} {} second advance", fiscal_year, label),
    );

    let contribution_quarters = split_quarters(result.total_contributions);
    for (i, (offset, m, d)) in CONTRIBUTION_DATES.iter().enumerate() {
        push(
            due_date(fiscal_year, *offset, *m, *d),
            contribution_quarters[i],
            EventCategory::Contribution,
            format!("{} contributions Q{}", fiscal_year, i + 1),
        );
    }

    for (i, (offset, m, d)) in VAT_DATES.iter().enumerate() {
        push(
            due_date(fiscal_year, *offset, *m, *d),
            result.vat_quarterly[i],
            EventCategory::Vat,
            format!("{} VAT Q{}", fiscal_year, i + 1),
        );
    }

    events.sort_by_key(|e| e.date);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contribution::{ContributionBreakdown, ContributionRegime};
    use crate::money::{round2, Installments};
    use crate::regime::{calculate, CalculationInput, ContributionProfile, FlatRateInput};

    fn result(regime: RegimeKind) -> CalculationResult {
        CalculationResult {
            regime,
            fiscal_year: 2025,
            taxable_income: 60_000.0,
            gross_tax: 18_440.0,
            net_tax: 18_440.0,
            effective_rate: 0.3073,
            lines: Vec::new(),
            contribution: ContributionBreakdown::default(),
            vat_amount: 13_200.0,
            vat_quarterly: [3_300.0; 4],
            installments: Installments { first: 8_000.0, second: 12_000.0 },
            total_taxes: 20_000.0,
            total_contributions: 15_642.0,
            total_due: 48_842.0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_is_sorted_and_complete() {
        let events = generate_deadlines(
            &result(RegimeKind::OrdinaryIndividual),
            RegimeKind::OrdinaryIndividual,
            2025,
        );

        // 3 tax + 4 contribution + 4 VAT
        assert_eq!(events.len(), 11);
        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(events.iter().all(|e| !e.is_income));
        assert_eq!(events.first().unwrap().date, date(2025, 5, 16));
        assert_eq!(events.last().unwrap().date, date(2026, 3, 16));
    }

    #[test]
    fn test_amounts_come_from_result() {
        let events = generate_deadlines(
            &result(RegimeKind::OrdinaryIndividual),
            RegimeKind::OrdinaryIndividual,
            2025,
        );

        let june: Vec<_> = events.iter().filter(|e| e.date == date(2025, 6, 30)).collect();
        assert_eq!(june.len(), 2);
        assert_eq!(june[0].amount, 20_000.0);
        assert_eq!(june[1].amount, 8_000.0);

        let november_tax: Vec<_> = events
            .iter()
            .filter(|e| e.date == date(2025, 11, 30))
            .collect();
        assert_eq!(november_tax[0].amount, 12_000.0);

        let contributions: f64 = events
            .iter()
            .filter(|e| e.category == EventCategory::Contribution)
            .map(|e| e.amount)
            .sum();
        assert_eq!(round2(contributions), 15_642.0);

        let feb = events.iter().find(|e| e.date == date(2026, 2, 16)).unwrap();
        assert_eq!(feb.category, EventCategory::Contribution);
    }

    #[test]
    fn test_zero_vat_emits_no_vat_events() {
        let mut flat = result(RegimeKind::FlatRate);
        flat.vat_amount = 0.0;
        flat.vat_quarterly = [0.0; 4];

        let events = generate_deadlines(&flat, RegimeKind::FlatRate, 2025);
        assert!(events.iter().all(|e| e.category != EventCategory::Vat));
        assert!(events[0].description.contains("contributions"));
        assert!(events
            .iter()
            .any(|e| e.description == "2025 substitute tax balance"));
    }

    #[test]
    fn test_dates_follow_fiscal_year() {
        let corporate = result(RegimeKind::Corporate);
        let events = generate_deadlines(&corporate, RegimeKind::Corporate, 2030);
        assert!(events.iter().any(|e| e.date == date(2030, 6, 30)));
        assert!(events.iter().any(|e| e.date == date(2031, 2, 16)));
    }

    #[test]
    fn test_scheduled_contributions_match_result() {
        let result = calculate(&CalculationInput::FlatRate(FlatRateInput {
            fiscal_year: 2025,
            revenue: 45_000.0,
            category: Some("professional".into()),
            contribution: ContributionProfile::new(ContributionRegime::GestioneSeparata),
            ..Default::default()
        }));
        assert_eq!(result.total_contributions, 9_150.57);

        let events = generate_deadlines(&result, RegimeKind::FlatRate, 2025);
        let quarters: Vec<f64> = events
            .iter()
            .filter(|e| e.category == EventCategory::Contribution)
            .map(|e| e.amount)
            .collect();
        assert_eq!(quarters, vec![2_287.64, 2_287.64, 2_287.64, 2_287.65]);
        assert_eq!(round2(quarters.iter().sum()), result.total_contributions);
    }

    #[test]
    fn test_extreme_fiscal_year_does_not_overflow() {
        // Next-year quarters have no representable date and are dropped
        let corporate = result(RegimeKind::Corporate);
        let events = generate_deadlines(&corporate, RegimeKind::Corporate, i32::MAX);
        assert!(events.is_empty());

        let events = generate_deadlines(&corporate, RegimeKind::Corporate, 0);
        assert_eq!(events.len(), 11);
    }
}
