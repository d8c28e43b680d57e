//! Flat-rate profitability coefficients by activity category

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coefficient used when the category is unknown or not supplied
pub const BASELINE_COEFFICIENT: f64 = 0.78;

/// Activity category -> share of revenue treated as taxable income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCoefficients {
    coefficients: BTreeMap<String, f64>,
    baseline: f64,
}

impl ActivityCoefficients {
    pub fn from_entries<I>(entries: I, baseline: f64) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            coefficients: entries
                .into_iter()
                .map(|(category, coefficient)| (normalize(&category), coefficient))
                .collect(),
            baseline,
        }
    }

    /// 2025 coefficient table
    pub fn default_2025() -> Self {
        let entries = [
            ("food_retail", 0.40),
            ("street_vendor_food", 0.40),
            ("street_vendor_other", 0.54),
            ("construction", 0.86),
            ("real_estate", 0.86),
            ("commercial_agents", 0.62),
            ("professional", 0.78),
            ("hospitality", 0.40),
            ("other_activities", 0.67),
        ];
        Self::from_entries(
            entries.iter().map(|(k, v)| (k.to_string(), *v)),
            BASELINE_COEFFICIENT,
        )
    }

    /// Look up a category, falling back to the baseline coefficient
    pub fn coefficient(&self, category: &str) -> f64 {
        match self.coefficients.get(&normalize(category)) {
            Some(coefficient) => *coefficient,
            None => {
                log::warn!(
                    "unknown activity category '{}', using baseline coefficient {}",
                    category,
                    self.baseline
                );
                self.baseline
            }
        }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.coefficients.contains_key(&normalize(category))
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase().replace([' ', '-'], "_")
}
