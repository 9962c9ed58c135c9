//! Finance program: offered loan terms and APR range

use serde::{Deserialize, Serialize};

use super::nearest_term;
use crate::error::{QuoteError, Result};

/// Everything the finance calculator needs for one term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinanceTerms {
    pub term_months: u32,
    /// Annual percentage rate in percent (6.9 means 6.9%)
    pub apr: f64,
    pub tax_rate: f64,
}

/// Retail installment program offered by the dealership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceProgram {
    /// Offered loan terms in months
    #[serde(default = "default_finance_terms")]
    pub terms: Vec<u32>,

    #[serde(default = "default_finance_term")]
    pub default_term: u32,

    /// APR used when the customer has not entered one (percent)
    #[serde(default = "default_apr")]
    pub default_apr: f64,

    /// Lowest APR accepted (percent)
    #[serde(default)]
    pub apr_min: f64,

    /// Highest APR accepted (percent)
    #[serde(default = "default_apr_max")]
    pub apr_max: f64,
}

fn default_finance_terms() -> Vec<u32> { vec![48, 60, 72, 84] }
fn default_finance_term() -> u32 { 72 }
fn default_apr() -> f64 { 6.9 }
fn default_apr_max() -> f64 { 21.9 }

impl Default for FinanceProgram {
    fn default() -> Self {
        Self {
            terms: default_finance_terms(),
            default_term: 72,
            default_apr: 6.9,
            apr_min: 0.0,
            apr_max: 21.9,
        }
    }
}

impl FinanceProgram {
    /// Check that a term is offered
    pub fn validate_term(&self, term_months: u32) -> Result<u32> {
        if self.terms.contains(&term_months) {
            Ok(term_months)
        } else {
            Err(QuoteError::InvalidTerm {
                requested: term_months,
                available: self.terms.clone(),
            })
        }
    }

    /// Closest offered term to the requested one
    pub fn nearest_term(&self, term_months: u32) -> u32 {
        nearest_term(term_months, &self.terms, self.default_term)
    }

    /// Clamp an APR into the program range. NaN maps to the default APR.
    pub fn clamp_apr(&self, apr: f64) -> f64 {
        if apr.is_nan() {
            return self.default_apr;
        }
        apr.max(self.apr_min).min(self.apr_max)
    }

    /// Calculator inputs for a term and APR
    pub fn terms_for(&self, term_months: u32, apr: f64, tax_rate: f64) -> FinanceTerms {
        FinanceTerms {
            term_months,
            apr,
            tax_rate,
        }
    }
}
