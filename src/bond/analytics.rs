//! Price, yield-to-maturity, duration, convexity and DV01
//!
//! Discounting is discrete at the bond's coupon frequency: a cashflow at `t`
//! years is worth `amount / (1 + y/f)^(t*f)`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::schedule::Cashflow;
use super::Bond;
use crate::config::SolverConfig;
use crate::date::Date;
use crate::error::SolverError;

/// Outcome of the yield search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YieldSolution {
    Converged(f64),
    Failed(SolverError),
}

impl YieldSolution {
    pub fn value(&self) -> Option<f64> {
        match self {
            YieldSolution::Converged(y) => Some(*y),
            YieldSolution::Failed(_) => None,
        }
    }
}

/// Yield-to-maturity together with the accrued interest used to reach the dirty price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YtmResult {
    pub ytm: YieldSolution,
    /// Always populated, even when the search fails
    pub accrued: f64,
}

impl YtmResult {
    /// The solved yield, or NaN when the search failed
    pub fn yield_or_nan(&self) -> f64 {
        self.ytm.value().unwrap_or(f64::NAN)
    }
}

/// Risk measures at a given yield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    /// PV-weighted average time to cashflow (years)
    pub macaulay_duration: f64,
    /// Macaulay duration / (1 + y/f)
    pub modified_duration: f64,
    /// Years squared
    pub convexity: f64,
    /// Price change for a one basis point yield move
    pub dv01: f64,
    /// Present value of the schedule at the yield
    pub price: f64,
}

/// Schedule, yield and analytics for one bond at a market price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondReport {
    pub settle: Date,
    pub clean_price: f64,
    pub accrued: f64,
    pub num_cashflows: usize,
    /// `None` when the yield search failed
    pub ytm: Option<f64>,
    pub analytics: Option<AnalyticsResult>,
}

impl Bond {
    fn discount_base(&self, yld: f64) -> f64 {
        1.0 + yld / self.frequency as f64
    }

    fn present_value(&self, cf: &Cashflow, base: f64) -> f64 {
        let freq = self.frequency as f64;
        cf.amount / base.powf(cf.time * freq)
    }

    /// Present value of `cashflows` at annual yield `yld`, compounded at the coupon frequency
    pub fn price_from_yield(&self, yld: f64, cashflows: &[Cashflow]) -> f64 {
        let base = self.discount_base(yld);
        cashflows.iter().map(|cf| self.present_value(cf, base)).sum()
    }

    /// Solve for the yield matching `market_price` plus accrued, with the default bracket
    pub fn calculate_ytm(&self, market_price: f64, cashflows: &[Cashflow]) -> YtmResult {
        self.calculate_ytm_with(&SolverConfig::default(), market_price, cashflows)
    }

    /// Solve for the yield matching `market_price` plus accrued by bisection.
    ///
    /// A bracket that does not contain the root is not an error: the search
    /// collapses onto one of its ends.
    pub fn calculate_ytm_with(
        &self,
        config: &SolverConfig,
        market_price: f64,
        cashflows: &[Cashflow],
    ) -> YtmResult {
        let accrued = self.accrued_interest();
        let dirty_price = market_price + accrued;

        let ytm = match self.bisect_yield(config, dirty_price, cashflows) {
            Ok(y) => YieldSolution::Converged(y),
            Err(e) => {
                warn!("Yield search failed for dirty price {:.6}: {}", dirty_price, e);
                YieldSolution::Failed(e)
            }
        };

        YtmResult { ytm, accrued }
    }

    fn bisect_yield(
        &self,
        config: &SolverConfig,
        dirty_price: f64,
        cashflows: &[Cashflow],
    ) -> Result<f64, SolverError> {
        let diff = |y: f64| -> Result<f64, SolverError> {
            let value = self.price_from_yield(y, cashflows) - dirty_price;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(SolverError::NonFinite { at: y })
            }
        };

        let mut low = config.lower;
        let mut high = config.upper;
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(SolverError::InvalidBracket { lower: low, upper: high });
        }
        if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
            return Err(SolverError::InvalidTolerance(config.tolerance));
        }

        let mut diff_low = diff(low)?;
        let diff_high = diff(high)?;
        if (diff_low < 0.0) == (diff_high < 0.0) && diff_low != 0.0 && diff_high != 0.0 {
            warn!(
                "Dirty price {:.6} not bracketed by yields [{}, {}]; result will sit on a boundary",
                dirty_price, low, high
            );
        }

        let mut iterations = 0;
        while high - low > config.tolerance {
            if iterations >= config.max_iterations {
                return Err(SolverError::MaxIterations(iterations));
            }

            let mid = 0.5 * (low + high);
            let diff_mid = diff(mid)?;
            if diff_mid == 0.0 {
                debug!("Exact root at {} after {} iterations", mid, iterations + 1);
                return Ok(mid);
            }

            // Compare signs directly; the product underflows for tiny notionals
            if (diff_low < 0.0) != (diff_mid < 0.0) {
                high = mid;
            } else {
                low = mid;
                diff_low = diff_mid;
            }
            iterations += 1;
        }

        let ytm = 0.5 * (low + high);
        debug!("Yield converged to {:.10} after {} iterations", ytm, iterations);
        Ok(ytm)
    }

    /// Price, durations, convexity and DV01 at annual yield `yld`.
    ///
    /// Nothing guards against a zero price; the ratios come out infinite or NaN.
    pub fn calculate_analytics(&self, yld: f64, cashflows: &[Cashflow]) -> AnalyticsResult {
        let price = self.price_from_yield(yld, cashflows);
        let base = self.discount_base(yld);
        let period = 1.0 / self.frequency as f64;

        let mut duration_sum = 0.0;
        let mut convexity_sum = 0.0;
        for cf in cashflows {
            let pv = self.present_value(cf, base);
            duration_sum += cf.time * pv;
            convexity_sum += cf.time * (cf.time + period) * pv;
        }

        let macaulay_duration = duration_sum / price;
        let modified_duration = macaulay_duration / base;
        let convexity = convexity_sum / (price * base * base);
        let dv01 = modified_duration * price * 0.0001;

        AnalyticsResult {
            macaulay_duration,
            modified_duration,
            convexity,
            dv01,
            price,
        }
    }

    /// Generate the schedule, solve the yield at `clean_price`, and compute analytics at it
    pub fn analyze_at_price(&self, settle: Date, clean_price: f64, config: &SolverConfig) -> BondReport {
        let cashflows = self.generate_cashflows(settle);
        let result = self.calculate_ytm_with(config, clean_price, &cashflows);
        let ytm = result.ytm.value();

        BondReport {
            settle,
            clean_price,
            accrued: result.accrued,
            num_cashflows: cashflows.len(),
            ytm,
            analytics: ytm.map(|y| self.calculate_analytics(y, &cashflows)),
        }
    }
}
