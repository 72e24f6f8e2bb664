//! Bond Analytics - fixed-coupon bond cashflows and yield analytics
//!
//! This library provides:
//! - Coupon/principal schedule generation on a simplified 365/30 day model
//! - Price from yield with discrete compounding at the coupon frequency
//! - Yield-to-maturity by bisection
//! - Macaulay and modified duration, convexity and DV01
//! - A flat yield curve behind a pluggable curve trait
//! - Parallel batch analytics over CSV bond quotes

pub mod bond;
pub mod config;
pub mod curve;
pub mod date;
pub mod error;
pub mod portfolio;

// Re-export commonly used types
pub use bond::{AnalyticsResult, Bond, BondReport, Cashflow, CashflowType, YieldSolution, YtmResult};
pub use config::SolverConfig;
pub use curve::{FlatYieldCurve, YieldCurve};
pub use date::Date;
pub use error::{BondError, SolverError};
pub use portfolio::{BondQuote, PortfolioRunner, PortfolioSummary, PositionReport};
