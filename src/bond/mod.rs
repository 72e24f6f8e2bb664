//! Fixed-coupon bond terms, cashflow schedule and yield analytics

mod analytics;
mod schedule;

pub use analytics::{AnalyticsResult, BondReport, YieldSolution, YtmResult};
pub use schedule::{Cashflow, CashflowType};

use serde::{Deserialize, Serialize};

use crate::error::BondError;

/// Upper bound on `num_years * frequency` accepted by [`Bond::validate`]
pub const MAX_COUPON_PERIODS: u32 = 100_000;

/// Default settlement lag in days
fn default_settlement_days() -> u32 {
    1
}

/// Contract terms of a fixed-coupon bullet bond
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    /// Redemption amount
    pub face_value: f64,
    /// Annual coupon rate as a decimal (0.05 = 5%)
    pub coupon_rate: f64,
    /// Whole years to maturity
    pub num_years: u32,
    /// Coupons per year (1, 2, 4, 12, ...)
    pub frequency: u32,
    /// Settlement lag; carried with the terms but not used in any calculation
    #[serde(default = "default_settlement_days")]
    pub settlement_days: u32,
}

impl Bond {
    /// Create a bond with a one-day settlement lag. Terms are not checked;
    /// see [`Bond::try_new`] for the validating constructor.
    pub fn new(face_value: f64, coupon_rate: f64, num_years: u32, frequency: u32) -> Self {
        Self {
            face_value,
            coupon_rate,
            num_years,
            frequency,
            settlement_days: default_settlement_days(),
        }
    }

    /// Create a bond, rejecting terms that would make the analytics degenerate
    pub fn try_new(
        face_value: f64,
        coupon_rate: f64,
        num_years: u32,
        frequency: u32,
    ) -> Result<Self, BondError> {
        let bond = Self::new(face_value, coupon_rate, num_years, frequency);
        bond.validate()?;
        Ok(bond)
    }

    pub fn with_settlement_days(mut self, settlement_days: u32) -> Self {
        self.settlement_days = settlement_days;
        self
    }

    /// Check that face value is positive and finite, coupon rate finite,
    /// maturity and frequency non-zero, and the coupon count within bounds
    pub fn validate(&self) -> Result<(), BondError> {
        if !self.face_value.is_finite() || self.face_value <= 0.0 {
            return Err(BondError::InvalidTerms(format!(
                "face value must be positive, got {}",
                self.face_value
            )));
        }
        if !self.coupon_rate.is_finite() {
            return Err(BondError::InvalidTerms(format!(
                "coupon rate must be finite, got {}",
                self.coupon_rate
            )));
        }
        if self.num_years == 0 {
            return Err(BondError::InvalidTerms("maturity must be at least one year".into()));
        }
        if self.frequency == 0 {
            return Err(BondError::InvalidTerms("coupon frequency must be positive".into()));
        }
        let periods = self.num_years.checked_mul(self.frequency);
        if !matches!(periods, Some(n) if n <= MAX_COUPON_PERIODS) {
            return Err(BondError::InvalidTerms(format!(
                "{} years at {} coupons a year exceeds {} coupon periods",
                self.num_years, self.frequency, MAX_COUPON_PERIODS
            )));
        }
        Ok(())
    }

    /// Regular coupon payment: `face * coupon_rate / frequency`
    pub fn coupon_amount(&self) -> f64 {
        self.face_value * self.coupon_rate / self.frequency as f64
    }

    /// Fixed accrued-interest approximation: half a coupon year at 30/360
    pub fn accrued_interest(&self) -> f64 {
        self.face_value * self.coupon_rate * 0.5 * (30.0 / 360.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_settlement_lag() {
        let bond = Bond::new(1000.0, 0.05, 2, 2);
        assert_eq!(bond.settlement_days, 1);
        assert_eq!(bond.with_settlement_days(3).settlement_days, 3);
    }

    #[test]
    fn test_coupon_amount() {
        assert_eq!(Bond::new(1000.0, 0.05, 2, 2).coupon_amount(), 25.0);
        assert_eq!(Bond::new(1000.0, 0.06, 5, 12).coupon_amount(), 5.0);
    }

    #[test]
    fn test_accrued_ignores_frequency() {
        let semi = Bond::new(1000.0, 0.06, 5, 2);
        let quarterly = Bond::new(1000.0, 0.06, 5, 4);
        assert!((semi.accrued_interest() - 2.5).abs() < 1e-12);
        assert_eq!(semi.accrued_interest(), quarterly.accrued_interest());
    }

    #[test]
    fn test_try_new_rejects_degenerate_terms() {
        assert!(Bond::try_new(1000.0, 0.05, 10, 2).is_ok());
        assert!(matches!(Bond::try_new(0.0, 0.05, 10, 2), Err(BondError::InvalidTerms(_))));
        assert!(matches!(Bond::try_new(-5.0, 0.05, 10, 2), Err(BondError::InvalidTerms(_))));
        assert!(matches!(Bond::try_new(1000.0, f64::NAN, 10, 2), Err(BondError::InvalidTerms(_))));
        assert!(matches!(Bond::try_new(1000.0, 0.05, 0, 2), Err(BondError::InvalidTerms(_))));
        assert!(matches!(Bond::try_new(1000.0, 0.05, 10, 0), Err(BondError::InvalidTerms(_))));
    }

    #[test]
    fn test_try_new_bounds_coupon_periods() {
        assert!(Bond::try_new(1000.0, 0.05, 100, 1000).is_ok());
        assert!(matches!(Bond::try_new(1000.0, 0.05, 100, 1001), Err(BondError::InvalidTerms(_))));
        assert!(matches!(Bond::try_new(1000.0, 0.05, u32::MAX, 2), Err(BondError::InvalidTerms(_))));
        assert!(matches!(Bond::try_new(1000.0, 0.05, 70_000, 70_000), Err(BondError::InvalidTerms(_))));
    }

    #[test]
    fn test_deserialize_without_settlement_days() {
        let bond: Bond = serde_json::from_str(
            r#"{"face_value": 100.0, "coupon_rate": 0.04, "num_years": 3, "frequency": 1}"#,
        )
        .unwrap();
        assert_eq!(bond, Bond::new(100.0, 0.04, 3, 1));
    }
}
