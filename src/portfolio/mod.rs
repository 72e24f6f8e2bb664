//! Batch analytics over a set of quoted bonds
//!
//! Each quote is analysed independently, so a batch is fanned out across
//! threads with rayon.

pub mod loader;

pub use loader::{load_quotes, load_quotes_from_reader};

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bond::{Bond, BondReport};
use crate::config::SolverConfig;
use crate::date::Date;

/// A bond with its settlement date and clean market price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondQuote {
    pub bond_id: String,
    pub bond: Bond,
    pub settle: Date,
    pub price: f64,
}

/// Analytics for one quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub bond_id: String,
    #[serde(flatten)]
    pub report: BondReport,
}

/// Aggregates across a batch of reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub positions: usize,
    pub converged: usize,
    /// Sum of dirty prices of converged positions
    pub market_value: f64,
    /// Market-value-weighted modified duration
    pub modified_duration: f64,
    pub total_dv01: f64,
}

/// Runs yield and risk analytics with a fixed solver configuration
#[derive(Debug, Clone, Default)]
pub struct PortfolioRunner {
    solver: SolverConfig,
}

impl PortfolioRunner {
    pub fn new(solver: SolverConfig) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }

    /// Analyse a single quote
    pub fn run(&self, quote: &BondQuote) -> PositionReport {
        debug!("Analysing {}", quote.bond_id);
        PositionReport {
            bond_id: quote.bond_id.clone(),
            report: quote.bond.analyze_at_price(quote.settle, quote.price, &self.solver),
        }
    }

    /// Analyse all quotes in parallel, preserving input order
    pub fn run_batch(&self, quotes: &[BondQuote]) -> Vec<PositionReport> {
        info!("Running analytics for {} bonds", quotes.len());
        quotes.par_iter().map(|quote| self.run(quote)).collect()
    }

    /// Totals over the positions whose yield converged
    pub fn summary(reports: &[PositionReport]) -> PortfolioSummary {
        let converged: Vec<_> = reports.iter().filter_map(|r| r.report.analytics).collect();

        let market_value: f64 = converged.iter().map(|a| a.price).sum();
        let total_dv01: f64 = converged.iter().map(|a| a.dv01).sum();
        let weighted: f64 = converged.iter().map(|a| a.modified_duration * a.price).sum();
        let modified_duration = if market_value.abs() > 0.0 {
            weighted / market_value
        } else {
            0.0
        };

        PortfolioSummary {
            positions: reports.len(),
            converged: converged.len(),
            market_value,
            modified_duration,
            total_dv01,
        }
    }
}
