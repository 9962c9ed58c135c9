//! Lease program: offered terms, residual table, money factor and fees

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use super::nearest_term;
use crate::error::{QuoteError, Result};
use crate::money::Money;

/// Residual fraction used when a term has no entry in the residual table
pub const DEFAULT_RESIDUAL_PERCENT: f64 = 0.58;

/// Where a residual fraction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidualSource {
    /// Looked up in the residual table for the term
    Table,
    /// Term missing from the table; the table's default fraction was used
    Default,
}

/// Resolved residual fraction for one term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residual {
    pub percent: f64,
    pub source: ResidualSource,
}

/// Residual fraction of MSRP by lease term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualTable {
    /// Residual fractions keyed by term in months
    #[serde(default)]
    pub by_term: BTreeMap<u32, f64>,

    /// Fraction used for terms not in `by_term`
    #[serde(default = "default_residual_percent")]
    pub default_percent: f64,
}

fn default_residual_percent() -> f64 { DEFAULT_RESIDUAL_PERCENT }

impl Default for ResidualTable {
    fn default() -> Self {
        let mut by_term = BTreeMap::new();
        by_term.insert(24, 0.66);
        by_term.insert(36, 0.60);
        by_term.insert(39, 0.58);
        Self {
            by_term,
            default_percent: DEFAULT_RESIDUAL_PERCENT,
        }
    }
}

impl ResidualTable {
    /// Create from loaded rows of (term, fraction)
    pub fn from_loaded(rows: &[(u32, f64)]) -> Self {
        Self {
            by_term: rows.iter().copied().collect(),
            default_percent: DEFAULT_RESIDUAL_PERCENT,
        }
    }

    /// Residual fraction for a term, falling back to the table default
    pub fn residual_for(&self, term_months: u32) -> Residual {
        match self.by_term.get(&term_months) {
            Some(&percent) => Residual {
                percent,
                source: ResidualSource::Table,
            },
            None => Residual {
                percent: self.default_percent,
                source: ResidualSource::Default,
            },
        }
    }
}

/// Everything the lease calculator needs for one term
#[derive(Debug, Clone, PartialEq)]
pub struct LeaseTerms {
    pub term_months: u32,
    pub residuals: ResidualTable,
    pub money_factor: f64,
    pub acquisition_fee: Money,
    pub tax_rate: f64,
}

/// Lease program offered by the dealership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseProgram {
    /// Offered lease terms in months
    #[serde(default = "default_lease_terms")]
    pub terms: Vec<u32>,

    /// Term preselected on the payment screen
    #[serde(default = "default_lease_term")]
    pub default_term: u32,

    #[serde(default)]
    pub residuals: ResidualTable,

    /// Lease rate as a money factor (APR / 2400)
    #[serde(default = "default_money_factor")]
    pub money_factor: f64,

    /// Bank acquisition fee due at signing
    #[serde(default = "default_acquisition_fee")]
    pub acquisition_fee: Money,
}

fn default_lease_terms() -> Vec<u32> { vec![24, 36, 39] }
fn default_lease_term() -> u32 { 39 }
fn default_money_factor() -> f64 { 0.00125 }
fn default_acquisition_fee() -> Money { 895 }

impl Default for LeaseProgram {
    fn default() -> Self {
        Self {
            terms: default_lease_terms(),
            default_term: 39,
            residuals: ResidualTable::default(),
            money_factor: 0.00125,  // ~3.0% APR equivalent
            acquisition_fee: 895,
        }
    }
}

impl LeaseProgram {
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

    /// Calculator inputs for a term
    pub fn terms_for(&self, term_months: u32, tax_rate: f64) -> LeaseTerms {
        if !self.residuals.by_term.contains_key(&term_months) {
            warn!(
                "lease term {} has no residual entry, using default {:.2}",
                term_months, self.residuals.default_percent
            );
        }
        LeaseTerms {
            term_months,
            residuals: self.residuals.clone(),
            money_factor: self.money_factor,
            acquisition_fee: self.acquisition_fee,
            tax_rate,
        }
    }

    /// Equivalent APR of the money factor, in percent
    pub fn equivalent_apr(&self) -> f64 {
        self.money_factor * 2400.0
    }
}
