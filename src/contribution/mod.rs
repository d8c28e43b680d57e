//! Social contribution calculators
//!
//! Each contribution regime is one `ContributionRule` implementation. The
//! `ContributionRegime` enum picks the rule and hands it the regime's
//! constants from `ContributionTables`, so every formula can be tested on
//! its own and adding a regime never touches the existing ones.

mod separata;
mod forense;
mod inarcassa;
mod ivs;
mod administrator;

pub use separata::GestioneSeparataRule;
pub use forense::CassaForenseRule;
pub use inarcassa::InarcassaRule;
pub use ivs::{IvsRule, IvsFund};
pub use administrator::{administrator_contribution, employer_contribution};

use crate::money::round2;
use crate::rates::ContributionTables;
use serde::{Deserialize, Serialize};

/// Social contribution scheme the taxpayer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionRegime {
    GestioneSeparata,
    CassaForense,
    Inarcassa,
    IvsArtigiani,
    IvsCommercianti,
    /// Any selector this engine does not know; computes zero contribution
    #[serde(other)]
    Unrecognized,
}

/// Reduction on IVS contributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionFactor {
    #[default]
    None,
    /// Flat-rate taxpayers opting into the 35% reduction
    Reduction35,
    /// Pensioners over 65 still trading
    Reduction50,
}

impl ReductionFactor {
    /// Multiplier applied to the whole IVS amount
    pub fn multiplier(&self) -> f64 {
        match self {
            ReductionFactor::None => 1.0,
            ReductionFactor::Reduction35 => 0.65,
            ReductionFactor::Reduction50 => 0.50,
        }
    }
}

/// Taxpayer circumstances that change contribution formulas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionFlags {
    pub other_pension_coverage: bool,
    pub pensioner: bool,
    /// Income is grossed up by the 4% recharge billed to clients
    pub reverse_charge_uplift: bool,
    pub reduction: ReductionFactor,
}

/// Computed contribution with the parameters that produced it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    /// Total due: subjective + integrative + maternity
    pub calculated_amount: f64,
    /// Headline rate of the regime
    pub rate: f64,
    /// Lowest amount the regime can charge, when it has one
    pub minimum: Option<f64>,
    /// Amount at the income cap, when the regime is capped
    pub maximum: Option<f64>,
    pub subjective: f64,
    pub integrative: f64,
    pub maternity: f64,
}

impl ContributionBreakdown {
    pub fn rounded(&self) -> Self {
        Self {
            calculated_amount: round2(self.calculated_amount),
            rate: self.rate,
            minimum: self.minimum.map(round2),
            maximum: self.maximum.map(round2),
            subjective: round2(self.subjective),
            integrative: round2(self.integrative),
            maternity: round2(self.maternity),
        }
    }
}

/// One contribution regime's formula
pub trait ContributionRule {
    fn regime(&self) -> ContributionRegime;

    /// Compute the contribution due on `base_income`.
    /// Negative income is treated as zero.
    fn compute(&self, base_income: f64, flags: &ContributionFlags) -> ContributionBreakdown;
}

/// Rule for selectors the engine does not recognise
pub struct ZeroRule;

impl ContributionRule for ZeroRule {
    fn regime(&self) -> ContributionRegime {
        ContributionRegime::Unrecognized
    }

    fn compute(&self, _base_income: f64, _flags: &ContributionFlags) -> ContributionBreakdown {
        ContributionBreakdown::default()
    }
}

impl ContributionRegime {
    /// Pick the rule for this regime, borrowing its constants
    pub fn rule<'a>(&self, tables: &'a ContributionTables) -> Box<dyn ContributionRule + 'a> {
        match self {
            ContributionRegime::GestioneSeparata => {
                Box::new(GestioneSeparataRule::new(&tables.gestione_separata))
            }
            ContributionRegime::CassaForense => {
                Box::new(CassaForenseRule::new(&tables.cassa_forense))
            }
            ContributionRegime::Inarcassa => Box::new(InarcassaRule::new(&tables.inarcassa)),
            ContributionRegime::IvsArtigiani => {
                Box::new(IvsRule::new(IvsFund::Artigiani, &tables.artigiani))
            }
            ContributionRegime::IvsCommercianti => {
                Box::new(IvsRule::new(IvsFund::Commercianti, &tables.commercianti))
            }
            ContributionRegime::Unrecognized => Box::new(ZeroRule),
        }
    }

    pub fn all() -> [ContributionRegime; 5] {
        [
            ContributionRegime::GestioneSeparata,
            ContributionRegime::CassaForense,
            ContributionRegime::Inarcassa,
            ContributionRegime::IvsArtigiani,
            ContributionRegime::IvsCommercianti,
        ]
    }
}

/// Compute the contribution for `regime` on `base_income`
pub fn compute_contribution(
    base_income: f64,
    regime: ContributionRegime,
    flags: &ContributionFlags,
    tables: &ContributionTables,
) -> ContributionBreakdown {
    if regime == ContributionRegime::Unrecognized {
        log::warn!("unrecognized contribution regime, contribution set to zero");
    }
    let breakdown = regime.rule(tables).compute(base_income, flags);
    log::debug!(
        "{:?} contribution on {:.2}: {:.2}",
        regime,
        base_income,
        breakdown.calculated_amount
    );
    breakdown
}
