//! Progressive bracket tax

use crate::rates::TaxBracket;
use serde::{Deserialize, Serialize};

/// Result of a bracket walk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressiveTax {
    pub gross_tax: f64,
    /// `gross_tax / taxable_income`, 0 when income is 0
    pub effective_rate: f64,
}

/// Tax `taxable_income` slice by slice against ascending brackets.
///
/// Each bracket taxes the portion of income inside `[lower, upper)` at its
/// own rate; the walk stops once no income remains. Negative input is a
/// caller validation problem and is treated as zero here.
pub fn compute_progressive_tax(taxable_income: f64, brackets: &[TaxBracket]) -> ProgressiveTax {
    let income = taxable_income.max(0.0);
    let mut remaining = income;
    let mut gross_tax = 0.0;

    for bracket in brackets {
        if remaining <= 0.0 {
            break;
        }
        let slice = remaining.min(bracket.width());
        gross_tax += slice * bracket.rate;
        remaining -= slice;
    }

    let effective_rate = if income > 0.0 { gross_tax / income } else { 0.0 };

    ProgressiveTax {
        gross_tax,
        effective_rate,
    }
}
