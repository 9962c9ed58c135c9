//! Deal quote engine: trade-in valuation, protection totals, lease and
//! finance calculators, and the orchestrator that combines them

pub mod finance;
pub mod lease;
pub mod matrix;
pub mod protection;
pub mod quote;
pub mod sequence;
pub mod trade_in;
mod vehicle;

pub use finance::{amortized_payment, calculate_finance, FinanceQuote};
pub use lease::{calculate_lease, LeaseQuote};
pub use matrix::MatrixCell;
pub use protection::{aggregate, ProtectionPackage, ProtectionSelection, ProtectionSummary};
pub use quote::{
    DealQuote, FinancingMethod, LeadQuoteSummary, ProtectionTreatment, QuoteConfig, QuoteEngine,
    QuoteRequest, QuoteStatus, QuoteWarning, TradeIn,
};
pub use sequence::{LatestResult, RequestTicket};
pub use trade_in::{BaseValueLookup, Condition, TradeInDescription, TradeInEstimate, TradeInValuator};
pub use vehicle::VehiclePricing;
