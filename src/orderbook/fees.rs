//! Fee schedule for maker/taker trade fee accounting.

use super::types::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Configurable maker/taker fee rates, expressed as fractions of notional
/// (e.g. `0.001` = 0.1%). Defaults to 0.001 maker, 0.002 taker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Fee rate charged to the maker (resting) side of a trade.
    pub maker_rate: f64,
    /// Fee rate charged to the taker (aggressing) side of a trade.
    pub taker_rate: f64,
}

impl FeeSchedule {
    /// Construct a fee schedule with explicit maker and taker rates.
    pub fn new(maker_rate: f64, taker_rate: f64) -> Self {
        FeeSchedule {
            maker_rate,
            taker_rate,
        }
    }

    /// A schedule that charges no fees at all.
    pub fn zero_fee() -> Self {
        FeeSchedule::new(0.0, 0.0)
    }

    /// Fee amount for one transaction, in the same currency units as
    /// `price × quantity`: `quantity × price × rate`.
    pub fn maker_fee(&self, price: Price, quantity: Quantity) -> f64 {
        notional(price, quantity) * self.maker_rate
    }

    /// Taker-side fee amount for one transaction.
    pub fn taker_fee(&self, price: Price, quantity: Quantity) -> f64 {
        notional(price, quantity) * self.taker_rate
    }
}

impl Default for FeeSchedule {
    /// 0.001 maker / 0.002 taker.
    fn default() -> Self {
        FeeSchedule::new(0.001, 0.002)
    }
}

fn notional(price: Price, quantity: Quantity) -> f64 {
    price.0 as f64 * quantity.0 as f64
}
