//! Trade-in appraisal assumptions and the base-value table
//!
//! Base values come from a CSV of (year, make, model, base_value) rows. The
//! showroom ships a small default table; stores load their own with
//! [`BaseValueTable::from_csv_path`].

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, Local};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::deal::trade_in::{BaseValueLookup, Condition};
use crate::error::Result;

const DEFAULT_BASE_VALUES: &str = include_str!("../../data/trade_in_base_values.csv");

/// Value multiplier by reported condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionMultipliers {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
    pub poor: f64,
}

impl Default for ConditionMultipliers {
    fn default() -> Self {
        Self {
            excellent: 1.05,
            good: 1.00,
            fair: 0.90,
            poor: 0.75,
        }
    }
}

impl ConditionMultipliers {
    pub fn for_condition(&self, condition: Condition) -> f64 {
        match condition {
            Condition::Excellent => self.excellent,
            Condition::Good => self.good,
            Condition::Fair => self.fair,
            Condition::Poor => self.poor,
        }
    }
}

/// Expected-mileage curve and the value adjustment for deviating from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileageCurve {
    /// Miles a typical vehicle accumulates per year of age
    pub expected_miles_per_year: f64,

    /// Value change per 1,000 miles below (+) or above (-) expectation
    pub adjustment_per_1000_miles: f64,

    /// Lower bound on the mileage factor
    pub min_factor: f64,

    /// Upper bound on the mileage factor
    pub max_factor: f64,
}

impl Default for MileageCurve {
    fn default() -> Self {
        Self {
            expected_miles_per_year: 12_000.0,
            adjustment_per_1000_miles: 0.005,  // 0.5% per 1,000 miles
            min_factor: 0.70,
            max_factor: 1.10,
        }
    }
}

impl MileageCurve {
    /// Expected odometer reading for a vehicle of the given age.
    /// Vehicles in their first year count as one year old.
    pub fn expected_miles(&self, age_years: i32) -> f64 {
        age_years.max(1) as f64 * self.expected_miles_per_year
    }

    /// Multiplicative value adjustment for actual vs expected mileage
    pub fn factor(&self, mileage_miles: u32, age_years: i32) -> f64 {
        let excess = mileage_miles as f64 - self.expected_miles(age_years);
        let factor = 1.0 - excess / 1000.0 * self.adjustment_per_1000_miles;
        factor.clamp(self.min_factor, self.max_factor)
    }
}

/// Combined trade-in appraisal assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeInAssumptions {
    #[serde(default)]
    pub conditions: ConditionMultipliers,

    #[serde(default)]
    pub mileage: MileageCurve,

    /// Appraisal uncertainty applied either side of the mid value (0.10 = ±10%)
    #[serde(default = "default_spread")]
    pub spread: f64,

    /// Calendar year used to age vehicles; current year when unset
    #[serde(default)]
    pub valuation_year: Option<i32>,
}

fn default_spread() -> f64 { 0.10 }

impl Default for TradeInAssumptions {
    fn default() -> Self {
        Self {
            conditions: ConditionMultipliers::default(),
            mileage: MileageCurve::default(),
            spread: 0.10,
            valuation_year: None,
        }
    }
}

impl TradeInAssumptions {
    pub fn valuation_year(&self) -> i32 {
        self.valuation_year.unwrap_or_else(|| Local::now().year())
    }
}

#[derive(Debug, Deserialize)]
struct BaseValueRow {
    year: i32,
    make: String,
    model: String,
    base_value: f64,
}

/// In-memory base-value table keyed by (year, make, model)
#[derive(Debug, Clone, Default)]
pub struct BaseValueTable {
    values: HashMap<(i32, String, String), f64>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl BaseValueTable {
    /// Table bundled with the kiosk
    pub fn default_showroom() -> Result<Self> {
        Self::from_reader(DEFAULT_BASE_VALUES.as_bytes())
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = Self::default();
        for record in rdr.deserialize() {
            let row: BaseValueRow = record?;
            table.insert(row.year, &row.make, &row.model, row.base_value);
        }
        debug!("loaded {} trade-in base values", table.len());
        Ok(table)
    }

    pub fn insert(&mut self, year: i32, make: &str, model: &str, base_value: f64) {
        self.values
            .insert((year, normalize(make), normalize(model)), base_value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl BaseValueLookup for BaseValueTable {
    fn base_value(&self, year: i32, make: &str, model: &str) -> Option<f64> {
        self.values
            .get(&(year, normalize(make), normalize(model)))
            .copied()
            .filter(|v| *v > 0.0)
    }
}
