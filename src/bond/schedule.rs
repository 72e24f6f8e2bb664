//! Coupon and principal cashflow generation

use log::debug;
use serde::{Deserialize, Serialize};

use super::Bond;
use crate::date::Date;

/// Kind of payment in a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashflowType {
    Coupon,
    Principal,
}

/// A single scheduled payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    /// Payment date
    pub date: Date,
    /// Years from settlement
    pub time: f64,
    /// Payment amount
    pub amount: f64,
    pub kind: CashflowType,
}

impl Bond {
    /// Build the payment schedule from `settle`.
    ///
    /// Produces `num_years * frequency` coupons at `i / frequency` years followed by
    /// one principal payment at `num_years` whose amount is face value plus one
    /// coupon. The principal therefore shares its time with the final coupon.
    ///
    /// Terms are expected to pass [`Bond::validate`]; the coupon count is not
    /// otherwise checked for overflow.
    pub fn generate_cashflows(&self, settle: Date) -> Vec<Cashflow> {
        let periods = self.num_years * self.frequency;
        let coupon = self.coupon_amount();
        let frequency = self.frequency as f64;

        let mut cashflows = Vec::with_capacity(periods as usize + 1);
        for i in 1..=periods {
            cashflows.push(Cashflow {
                date: settle.advance_coupon(i as i32, self.frequency as i32),
                time: i as f64 / frequency,
                amount: coupon,
                kind: CashflowType::Coupon,
            });
        }

        cashflows.push(Cashflow {
            date: settle.add_years(self.num_years as i32),
            time: self.num_years as f64,
            amount: self.face_value + coupon,
            kind: CashflowType::Principal,
        });

        debug!(
            "Generated {} cashflows from {} ({}y, {}x/yr)",
            cashflows.len(),
            settle,
            self.num_years,
            self.frequency
        );
        cashflows
    }
}
