//! Regional turnover-tax rates

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rate used when the region does not match any table entry
pub const DEFAULT_REGIONAL_RATE: f64 = 0.039;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalRates {
    rates: BTreeMap<String, f64>,
    default_rate: f64,
}

impl RegionalRates {
    pub fn from_entries<I>(entries: I, default_rate: f64) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            rates: entries
                .into_iter()
                .map(|(region, rate)| (normalize(&region), rate))
                .collect(),
            default_rate,
        }
    }

    /// 2025 ordinary rates for the 20 regions
    pub fn default_2025() -> Self {
        let entries = [
            ("abruzzo", 0.0390),
            ("basilicata", 0.0390),
            ("calabria", 0.0497),
            ("campania", 0.0497),
            ("emilia_romagna", 0.0390),
            ("friuli_venezia_giulia", 0.0390),
            ("lazio", 0.0482),
            ("liguria", 0.0390),
            ("lombardia", 0.0390),
            ("marche", 0.0473),
            ("molise", 0.0497),
            ("piemonte", 0.0390),
            ("puglia", 0.0482),
            ("sardegna", 0.0293),
            ("sicilia", 0.0390),
            ("toscana", 0.0390),
            ("trentino_alto_adige", 0.0268),
            ("umbria", 0.0390),
            ("valle_d_aosta", 0.0390),
            ("veneto", 0.0390),
        ];
        Self::from_entries(
            entries.iter().map(|(k, v)| (k.to_string(), *v)),
            DEFAULT_REGIONAL_RATE,
        )
    }

    pub fn rate(&self, region: &str) -> f64 {
        match self.rates.get(&normalize(region)) {
            Some(rate) => *rate,
            None => {
                log::warn!(
                    "region '{}' not in regional rate table, using default {}",
                    region,
                    self.default_rate
                );
                self.default_rate
            }
        }
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

fn normalize(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .replace([' ', '-', '\''], "_")
}
