//! Error types for the deal quote engine

use thiserror::Error;

/// Errors raised while valuing trade-ins, loading programs or building quotes
#[derive(Debug, Error)]
pub enum QuoteError {
    /// No base value exists for the described trade-in vehicle.
    /// Callers fall back to a manual appraisal.
    #[error("no base value for {year} {make} {model}")]
    LookupFailure {
        year: i32,
        make: String,
        model: String,
    },

    /// Requested term is not offered by the program
    #[error("term of {requested} months is not offered (available: {available:?})")]
    InvalidTerm { requested: u32, available: Vec<u32> },

    /// A sub-computation failed; a provisional quote is still produced
    #[error("quote incomplete: {0}")]
    QuoteIncomplete(String),

    /// Unknown enum value or malformed program table
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
