//! Progressive income tax bracket tables

use crate::error::RatesError;
use serde::{Deserialize, Serialize};

/// One marginal-rate slice `[lower_bound, upper_bound)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: f64,
    /// `None` for the open-ended top bracket
    pub upper_bound: Option<f64>,
    pub rate: f64,
}

impl TaxBracket {
    pub fn new(lower_bound: f64, upper_bound: Option<f64>, rate: f64) -> Self {
        Self { lower_bound, upper_bound, rate }
    }

    /// Width of the bracket, infinite for the top bracket
    pub fn width(&self) -> f64 {
        match self.upper_bound {
            Some(upper) => upper - self.lower_bound,
            None => f64::INFINITY,
        }
    }
}

/// Ordered, contiguous bracket sequence
///
/// Construction checks the table shape once so the calculator can walk it
/// without re-validating: ascending lower bounds starting at 0, each upper
/// bound equal to the next lower bound, and only the last bracket open-ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    pub fn new(mut brackets: Vec<TaxBracket>) -> Result<Self, RatesError> {
        if brackets.is_empty() {
            return Err(RatesError::InvalidBrackets("table is empty".into()));
        }
        brackets.sort_by(|a, b| a.lower_bound.total_cmp(&b.lower_bound));

        if brackets[0].lower_bound != 0.0 {
            return Err(RatesError::InvalidBrackets(format!(
                "first bracket starts at {} instead of 0",
                brackets[0].lower_bound
            )));
        }

        let last = brackets.len() - 1;
        for (i, bracket) in brackets.iter().enumerate() {
            if !(0.0..=1.0).contains(&bracket.rate) {
                return Err(RatesError::InvalidBrackets(format!(
                    "rate {} outside [0, 1]",
                    bracket.rate
                )));
            }
            match (bracket.upper_bound, i == last) {
                (None, true) => {}
                (None, false) => {
                    return Err(RatesError::InvalidBrackets(format!(
                        "bracket starting at {} is open-ended but not last",
                        bracket.lower_bound
                    )));
                }
                (Some(upper), true) => {
                    return Err(RatesError::InvalidBrackets(format!(
                        "last bracket must be open-ended, found upper bound {}",
                        upper
                    )));
                }
                (Some(upper), false) => {
                    let next = brackets[i + 1].lower_bound;
                    if upper <= bracket.lower_bound {
                        return Err(RatesError::InvalidBrackets(format!(
                            "empty bracket [{}, {})",
                            bracket.lower_bound, upper
                        )));
                    }
                    if upper != next {
                        return Err(RatesError::InvalidBrackets(format!(
                            "gap or overlap between {} and {}",
                            upper, next
                        )));
                    }
                }
            }
        }

        Ok(Self { brackets })
    }

    /// 2025 individual income tax table.
    ///
    /// The last two brackets share the 43% rate and are kept separate.
    pub fn individual_2025() -> Self {
        Self {
            brackets: vec![
                TaxBracket::new(0.0, Some(28_000.0), 0.23),
                TaxBracket::new(28_000.0, Some(50_000.0), 0.35),
                TaxBracket::new(50_000.0, Some(55_000.0), 0.43),
                TaxBracket::new(55_000.0, None, 0.43),
            ],
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_2025_is_valid() {
        let table = BracketTable::individual_2025();
        let rebuilt = BracketTable::new(table.brackets().to_vec());
        assert!(rebuilt.is_ok());

        let brackets = table.brackets();
        assert_eq!(brackets.len(), 4);
        assert_eq!(brackets[2].rate, brackets[3].rate);
        assert_eq!(brackets[3].upper_bound, None);
    }

    #[test]
    fn test_rejects_gap() {
        let result = BracketTable::new(vec![
            TaxBracket::new(0.0, Some(10_000.0), 0.1),
            TaxBracket::new(12_000.0, None, 0.2),
        ]);
        assert!(matches!(result, Err(RatesError::InvalidBrackets(_))));
    }

    #[test]
    fn test_rejects_closed_top_bracket() {
        let result = BracketTable::new(vec![
            TaxBracket::new(0.0, Some(10_000.0), 0.1),
            TaxBracket::new(10_000.0, Some(20_000.0), 0.2),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_sorts_unordered_input() {
        let table = BracketTable::new(vec![
            TaxBracket::new(10_000.0, None, 0.2),
            TaxBracket::new(0.0, Some(10_000.0), 0.1),
        ])
        .unwrap();
        assert_eq!(table.brackets()[0].lower_bound, 0.0);
    }
}
