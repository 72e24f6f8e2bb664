//! Yield solver configuration

use std::env;

use serde::{Deserialize, Serialize};

/// Bisection settings for yield-to-maturity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Lower end of the annual yield bracket
    pub lower: f64,
    /// Upper end of the annual yield bracket
    pub upper: f64,
    /// Stop once the bracket is no wider than this
    pub tolerance: f64,
    /// Hard cap on bisection steps
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 0.5,
            tolerance: 1e-8,
            max_iterations: 200,
        }
    }
}

impl SolverConfig {
    /// Defaults overridden by `BOND_YTM_LOWER`, `BOND_YTM_UPPER`,
    /// `BOND_YTM_TOLERANCE` and `BOND_YTM_MAX_ITERATIONS` when set and parseable
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lower: env_or("BOND_YTM_LOWER", defaults.lower),
            upper: env_or("BOND_YTM_UPPER", defaults.upper),
            tolerance: env_or("BOND_YTM_TOLERANCE", defaults.tolerance),
            max_iterations: env_or("BOND_YTM_MAX_ITERATIONS", defaults.max_iterations),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
