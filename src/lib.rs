//! Deal Quote Engine - lease and finance quotes for the showroom kiosk
//!
//! This library provides:
//! - Trade-in valuation from a base-value table with mileage and condition adjustments
//! - Protection package totals
//! - Lease and finance payment calculators
//! - A quote orchestrator producing one consistent quote per set of inputs
//! - Program tables (terms, residuals, rates, tax) loadable from JSON and CSV

pub mod assumptions;
pub mod deal;
pub mod error;
pub mod money;

// Re-export commonly used types
pub use assumptions::{DealAssumptions, LeaseProgram, FinanceProgram, BaseValueTable};
pub use deal::{DealQuote, FinancingMethod, QuoteConfig, QuoteEngine, QuoteRequest, VehiclePricing};
pub use error::{QuoteError, Result};
pub use money::Money;
