//! Income tax and VAT calculators

mod progressive;
mod vat;

pub use progressive::{compute_progressive_tax, ProgressiveTax};
pub use vat::VatSettlement;
