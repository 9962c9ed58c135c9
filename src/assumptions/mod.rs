//! Program tables for lease, finance, tax, trade-in and protection pricing
//!
//! Constructed once and shared read-only by every quote. Tests build
//! alternate tables directly rather than mutating shared state.

pub mod finance;
pub mod lease;
pub mod loader;
pub mod protection;
pub mod trade_in;

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};

pub use finance::{FinanceProgram, FinanceTerms};
pub use lease::{LeaseProgram, LeaseTerms, Residual, ResidualSource, ResidualTable, DEFAULT_RESIDUAL_PERCENT};
pub use loader::{load_from_dir, load_program, LoadedAssumptions};
pub use protection::ProtectionCatalog;
pub use trade_in::{BaseValueTable, ConditionMultipliers, MileageCurve, TradeInAssumptions};

/// Flat sales tax applied to both lease payments and financed purchases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxAssumptions {
    /// Tax rate as a fraction (0.0625 = 6.25%)
    #[serde(default = "default_tax_rate")]
    pub rate: f64,
}

fn default_tax_rate() -> f64 { 0.0625 }

impl Default for TaxAssumptions {
    fn default() -> Self {
        Self { rate: 0.0625 }
    }
}

/// Combined deal program
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DealAssumptions {
    #[serde(default)]
    pub lease: LeaseProgram,
    #[serde(default)]
    pub finance: FinanceProgram,
    #[serde(default)]
    pub tax: TaxAssumptions,
    #[serde(default)]
    pub trade_in: TradeInAssumptions,
    #[serde(default)]
    pub protection: ProtectionCatalog,
}

impl DealAssumptions {
    /// Showroom defaults
    pub fn default_showroom() -> Self {
        Self::default()
    }

    /// Reject tables the calculators cannot use
    pub fn validate(&self) -> Result<()> {
        validate_terms("lease", &self.lease.terms, self.lease.default_term)?;
        validate_terms("finance", &self.finance.terms, self.finance.default_term)?;

        if self.finance.apr_min < 0.0 || self.finance.apr_min > self.finance.apr_max {
            return Err(QuoteError::Config(format!(
                "finance APR range {}..{} is invalid",
                self.finance.apr_min, self.finance.apr_max
            )));
        }
        if !(0.0..1.0).contains(&self.tax.rate) {
            return Err(QuoteError::Config(format!("tax rate {} out of range", self.tax.rate)));
        }
        if self.trade_in.spread < 0.0 || self.trade_in.spread >= 1.0 {
            return Err(QuoteError::Config(format!(
                "trade-in spread {} out of range",
                self.trade_in.spread
            )));
        }
        Ok(())
    }
}

fn validate_terms(program: &str, terms: &[u32], default_term: u32) -> Result<()> {
    if terms.is_empty() {
        return Err(QuoteError::Config(format!("{} program offers no terms", program)));
    }
    if terms.contains(&0) {
        return Err(QuoteError::Config(format!("{} program offers a zero-month term", program)));
    }
    if !terms.contains(&default_term) {
        return Err(QuoteError::Config(format!(
            "{} default term {} is not offered",
            program, default_term
        )));
    }
    Ok(())
}

/// Closest offered term to `requested`.
/// Ties go to `default_term` when it is one of the candidates, else the shorter term.
pub(crate) fn nearest_term(requested: u32, terms: &[u32], default_term: u32) -> u32 {
    let mut best: Option<(u32, u32)> = None;
    for &term in terms {
        let distance = term.abs_diff(requested);
        best = match best {
            None => Some((term, distance)),
            Some((best_term, best_distance)) => {
                let better = distance < best_distance
                    || (distance == best_distance
                        && best_term != default_term
                        && (term == default_term || term < best_term));
                if better { Some((term, distance)) } else { Some((best_term, best_distance)) }
            }
        };
    }
    best.map(|(term, _)| term).unwrap_or(default_term)
}
