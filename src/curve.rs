//! Yield curve interface over a continuous time axis (years)
//!
//! Bond analytics discount at their own yield and do not consume a curve;
//! this is the seam for curve-based discounting.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Discount factor and forward rate queries
pub trait YieldCurve: Send + Sync {
    /// Discount factor to time `t`
    fn discount_factor(&self, t: f64) -> f64;

    /// Forward rate between `t1` and `t2`
    fn forward_rate(&self, t1: f64, t2: f64) -> f64;

    /// Continuously compounded zero rate implied by the discount factor
    fn zero_rate(&self, t: f64) -> f64 {
        if t == 0.0 {
            return self.forward_rate(0.0, 0.0);
        }
        -self.discount_factor(t).ln() / t
    }
}

impl<C: YieldCurve + ?Sized> YieldCurve for Box<C> {
    fn discount_factor(&self, t: f64) -> f64 {
        self.as_ref().discount_factor(t)
    }

    fn forward_rate(&self, t1: f64, t2: f64) -> f64 {
        self.as_ref().forward_rate(t1, t2)
    }
}

impl<C: YieldCurve + ?Sized> YieldCurve for Arc<C> {
    fn discount_factor(&self, t: f64) -> f64 {
        self.as_ref().discount_factor(t)
    }

    fn forward_rate(&self, t1: f64, t2: f64) -> f64 {
        self.as_ref().forward_rate(t1, t2)
    }
}

/// Single continuously compounded rate for every maturity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatYieldCurve {
    pub rate: f64,
}

impl FlatYieldCurve {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl YieldCurve for FlatYieldCurve {
    fn discount_factor(&self, t: f64) -> f64 {
        (-self.rate * t).exp()
    }

    /// Always the flat rate; a bootstrapped curve would interpolate here
    fn forward_rate(&self, _t1: f64, _t2: f64) -> f64 {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_flat_discount_factor() {
        let curve = FlatYieldCurve::new(0.05);
        assert_eq!(curve.discount_factor(0.0), 1.0);
        assert_abs_diff_eq!(curve.discount_factor(2.0), (-0.1_f64).exp(), epsilon = 1e-15);
        assert!(curve.discount_factor(10.0) < curve.discount_factor(1.0));
    }

    #[test]
    fn test_negative_rate_not_rejected() {
        let curve = FlatYieldCurve::new(-0.01);
        assert!(curve.discount_factor(1.0) > 1.0);
    }

    #[test]
    fn test_forward_rate_ignores_times() {
        let curve = FlatYieldCurve::new(0.03);
        assert_eq!(curve.forward_rate(0.0, 1.0), 0.03);
        assert_eq!(curve.forward_rate(7.5, 2.0), 0.03);
    }

    #[test]
    fn test_zero_rate_recovers_flat_rate() {
        let curve = FlatYieldCurve::new(0.042);
        assert_abs_diff_eq!(curve.zero_rate(3.0), 0.042, epsilon = 1e-12);
        assert_eq!(curve.zero_rate(0.0), 0.042);
    }

    #[test]
    fn test_curve_behind_pointers() {
        let shared: Arc<dyn YieldCurve> = Arc::new(FlatYieldCurve::new(0.02));
        let boxed: Box<dyn YieldCurve> = Box::new(FlatYieldCurve::new(0.02));
        assert_abs_diff_eq!(shared.discount_factor(1.0), boxed.discount_factor(1.0), epsilon = 1e-15);
        assert_eq!(shared.forward_rate(1.0, 2.0), 0.02);
    }
}
