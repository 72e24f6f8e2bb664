//! Error types for bond terms, loading and yield solving

use thiserror::Error;

/// Errors raised by the fallible parts of the library (validation, parsing, loading)
#[derive(Debug, Error)]
pub enum BondError {
    #[error("invalid bond terms: {0}")]
    InvalidTerms(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("failed to read bond file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse bond file: {0}")]
    Csv(#[from] csv::Error),
}

/// Reasons the yield-to-maturity search gave up
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SolverError {
    #[error("price function returned a non-finite value at yield {at}")]
    NonFinite { at: f64 },

    #[error("invalid search bracket [{lower}, {upper}]")]
    InvalidBracket { lower: f64, upper: f64 },

    #[error("solver tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    #[error("no convergence after {0} iterations")]
    MaxIterations(u32),
}
