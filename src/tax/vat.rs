//! VAT settlement

use crate::money::{round2, split_quarters};
use serde::{Deserialize, Serialize};

/// Annual VAT position and its four quarterly liabilities
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VatSettlement {
    pub sales_vat: f64,
    pub purchases_vat: f64,
    /// `max(0, sales - purchases)`
    pub amount_due: f64,
    pub quarterly: [f64; 4],
}

impl VatSettlement {
    /// Settle VAT, estimating missing sides at `standard_rate` of revenue
    /// and of expenses respectively.
    pub fn compute(
        revenue: f64,
        expenses: f64,
        sales_vat: Option<f64>,
        purchases_vat: Option<f64>,
        standard_rate: f64,
    ) -> Self {
        let sales_vat = sales_vat.unwrap_or(revenue.max(0.0) * standard_rate);
        let purchases_vat = purchases_vat.unwrap_or(expenses.max(0.0) * standard_rate);
        let amount_due = (sales_vat - purchases_vat).max(0.0);
        let quarter = amount_due / 4.0;

        Self {
            sales_vat,
            purchases_vat,
            amount_due,
            quarterly: [quarter; 4],
        }
    }

    /// Round to cents. Quarters are re-split from the rounded amount so
    /// they still add up to it.
    pub fn rounded(&self) -> Self {
        let amount_due = round2(self.amount_due);
        Self {
            sales_vat: round2(self.sales_vat),
            purchases_vat: round2(self.purchases_vat),
            amount_due,
            quarterly: split_quarters(amount_due),
        }
    }
}
