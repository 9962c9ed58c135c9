//! Trade-in valuation
//!
//! mid = base value × mileage factor × condition multiplier, rounded.
//! low/high widen mid by the appraisal spread, rounded outward so
//! `low <= mid <= high` survives rounding.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::assumptions::TradeInAssumptions;
use crate::error::{QuoteError, Result};
use crate::money::{ceil_money, floor_money, round_money, Money};

/// Customer-reported vehicle condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Condition::Excellent => "excellent",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
        };
        f.write_str(s)
    }
}

impl FromStr for Condition {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "excellent" => Ok(Condition::Excellent),
            "good" => Ok(Condition::Good),
            "fair" => Ok(Condition::Fair),
            "poor" => Ok(Condition::Poor),
            other => Err(QuoteError::Config(format!("unknown condition: {}", other))),
        }
    }
}

/// Vehicle the customer is trading in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeInDescription {
    pub year: i32,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub trim: Option<String>,
    pub mileage_miles: u32,
    pub condition: Condition,
    #[serde(default)]
    pub vin: Option<String>,
}

/// Appraisal range for a trade-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInEstimate {
    pub low: Money,
    pub mid: Money,
    pub high: Money,
}

/// Source of base values by (year, make, model)
pub trait BaseValueLookup {
    /// Base wholesale value before mileage and condition adjustments
    fn base_value(&self, year: i32, make: &str, model: &str) -> Option<f64>;
}

impl<L: BaseValueLookup + ?Sized> BaseValueLookup for &L {
    fn base_value(&self, year: i32, make: &str, model: &str) -> Option<f64> {
        (**self).base_value(year, make, model)
    }
}

/// Values trade-ins against a base-value lookup
#[derive(Debug, Clone)]
pub struct TradeInValuator<'a, L: BaseValueLookup> {
    assumptions: &'a TradeInAssumptions,
    lookup: L,
}

impl<'a, L: BaseValueLookup> TradeInValuator<'a, L> {
    pub fn new(assumptions: &'a TradeInAssumptions, lookup: L) -> Self {
        Self { assumptions, lookup }
    }

    /// Estimate the trade-in range.
    ///
    /// Fails with [`QuoteError::LookupFailure`] when the vehicle has no base
    /// value; callers route the customer to a manual appraisal.
    pub fn estimate(&self, description: &TradeInDescription) -> Result<TradeInEstimate> {
        let base = self
            .lookup
            .base_value(description.year, &description.make, &description.model)
            .ok_or_else(|| {
                warn!(
                    "no base value for {} {} {}",
                    description.year, description.make, description.model
                );
                QuoteError::LookupFailure {
                    year: description.year,
                    make: description.make.clone(),
                    model: description.model.clone(),
                }
            })?;

        let age_years = self.assumptions.valuation_year() - description.year;
        let mileage_factor = self
            .assumptions
            .mileage
            .factor(description.mileage_miles, age_years);
        let condition_factor = self
            .assumptions
            .conditions
            .for_condition(description.condition);

        let mid_raw = base * mileage_factor * condition_factor;
        let mid = round_money(mid_raw);
        if mid <= 0 {
            warn!(
                "{} {} {} values at {:.2}, needs manual appraisal",
                description.year, description.make, description.model, mid_raw
            );
            return Err(QuoteError::LookupFailure {
                year: description.year,
                make: description.make.clone(),
                model: description.model.clone(),
            });
        }
        let spread = self.assumptions.spread;
        let estimate = TradeInEstimate {
            low: floor_money(mid as f64 * (1.0 - spread)).min(mid),
            mid,
            high: ceil_money(mid as f64 * (1.0 + spread)).max(mid),
        };

        debug!(
            "trade-in {} {} {}: base={:.0} mileage={:.4} condition={:.2} -> {:?}",
            description.year, description.make, description.model,
            base, mileage_factor, condition_factor, estimate
        );
        Ok(estimate)
    }
}
