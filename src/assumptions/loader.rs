//! Load program tables from a store's configuration directory
//!
//! Expected layout (every file optional, defaults fill the gaps):
//! - `deal_program.json`: full or partial [`DealAssumptions`]
//! - `lease_residuals.csv`: `term_months,residual_percent`
//! - `trade_in_base_values.csv`: `year,make,model,base_value`

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use super::lease::ResidualTable;
use super::trade_in::BaseValueTable;
use super::DealAssumptions;
use crate::error::{QuoteError, Result};

pub const PROGRAM_FILE: &str = "deal_program.json";
pub const RESIDUALS_FILE: &str = "lease_residuals.csv";
pub const BASE_VALUES_FILE: &str = "trade_in_base_values.csv";

/// Everything read from a configuration directory
#[derive(Debug, Clone)]
pub struct LoadedAssumptions {
    pub assumptions: DealAssumptions,
    pub base_values: BaseValueTable,
}

#[derive(Debug, Deserialize)]
struct ResidualRow {
    term_months: u32,
    residual_percent: f64,
}

/// Parse a JSON program file. Missing fields take showroom defaults.
pub fn load_program<P: AsRef<Path>>(path: P) -> Result<DealAssumptions> {
    let file = File::open(path)?;
    load_program_from_reader(file)
}

pub fn load_program_from_reader<R: Read>(reader: R) -> Result<DealAssumptions> {
    let assumptions: DealAssumptions = serde_json::from_reader(reader)?;
    assumptions.validate()?;
    Ok(assumptions)
}

/// Parse a residual CSV into (term, fraction) rows
pub fn load_residuals<P: AsRef<Path>>(path: P) -> Result<Vec<(u32, f64)>> {
    let file = File::open(path)?;
    load_residuals_from_reader(file)
}

pub fn load_residuals_from_reader<R: Read>(reader: R) -> Result<Vec<(u32, f64)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        let row: ResidualRow = record?;
        if !(0.0..=1.0).contains(&row.residual_percent) {
            return Err(QuoteError::Config(format!(
                "residual for {} months out of range: {}",
                row.term_months, row.residual_percent
            )));
        }
        rows.push((row.term_months, row.residual_percent));
    }
    Ok(rows)
}

/// Load a configuration directory, falling back to defaults per file
pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<LoadedAssumptions> {
    let dir = dir.as_ref();

    let program_path = dir.join(PROGRAM_FILE);
    let mut assumptions = if program_path.exists() {
        info!("loading deal program from {}", program_path.display());
        load_program(&program_path)?
    } else {
        DealAssumptions::default_showroom()
    };

    let residuals_path = dir.join(RESIDUALS_FILE);
    if residuals_path.exists() {
        info!("loading lease residuals from {}", residuals_path.display());
        let rows = load_residuals(&residuals_path)?;
        let default_percent = assumptions.lease.residuals.default_percent;
        assumptions.lease.residuals = ResidualTable {
            default_percent,
            ..ResidualTable::from_loaded(&rows)
        };
    }

    let base_values_path = dir.join(BASE_VALUES_FILE);
    let base_values = if base_values_path.exists() {
        info!("loading trade-in base values from {}", base_values_path.display());
        BaseValueTable::from_csv_path(&base_values_path)?
    } else {
        BaseValueTable::default_showroom()?
    };

    Ok(LoadedAssumptions {
        assumptions,
        base_values,
    })
}
