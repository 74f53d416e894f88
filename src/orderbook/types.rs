//! Value types shared across the order book: sides, order types, prices,
//! quantities, orders and trades.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the book an order rests on or aggresses against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order — rests in the bid half-book.
    Buy,
    /// Sell order — rests in the ask half-book.
    Sell,
}

impl Side {
    /// The opposite side, i.e. the half-book an order of this side matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order-type state machine selector: how an incoming order is admitted and matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Rests on the book if it does not fully cross; then matches price-time priority.
    Limit,
    /// Never rests; sweeps the opposite side at whatever prices are available.
    Market,
    /// Immediate-Or-Cancel: matches within the limit price, discards any residual.
    Ioc,
    /// Fill-Or-Kill: matches completely or not at all; no partial fills survive.
    Fok,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Market => write!(f, "MARKET"),
            OrderType::Ioc => write!(f, "IOC"),
            OrderType::Fok => write!(f, "FOK"),
        }
    }
}

/// A price expressed as an integer number of ticks.
///
/// Using an integer representation avoids cumulative rounding error in
/// `level_map[price] += delta` and lets level cleanup compare for exact
/// zero. Decimal call sites
/// convert through [`Price::from_decimal`] / [`Price::to_decimal`] using a
/// caller-supplied tick scale; the matching engine itself never touches a
/// float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(pub i64);

impl Price {
    /// Convert a decimal price to ticks given a `tick_size` (e.g. `0.01` for cents).
    ///
    /// # Panics
    /// Panics if `tick_size` is not positive and finite.
    pub fn from_decimal(value: f64, tick_size: f64) -> Price {
        assert!(
            tick_size > 0.0 && tick_size.is_finite(),
            "tick_size must be a positive, finite number"
        );
        Price((value / tick_size).round() as i64)
    }

    /// Convert this price back to a decimal value given the same `tick_size`
    /// used to construct it.
    pub fn to_decimal(self, tick_size: f64) -> f64 {
        self.0 as f64 * tick_size
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative order quantity, expressed in whole lot units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(pub u64);

impl Quantity {
    /// The zero quantity.
    pub const ZERO: Quantity = Quantity(0);

    /// Whether this quantity is exactly zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Saturating subtraction; floors at zero instead of panicking on underflow.
    pub fn saturating_sub(self, other: Quantity) -> Quantity {
        Quantity(self.0.saturating_sub(other.0))
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Quantity) -> Quantity {
        Quantity(self.0.saturating_add(other.0))
    }

    /// The smaller of two quantities — the size of a fill between two orders.
    pub fn min(self, other: Quantity) -> Quantity {
        Quantity(self.0.min(other.0))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-wide unique order identifier, assigned by the book at admission.
pub type OrderId = u64;

/// Process-wide unique trade identifier, assigned at emission.
pub type TradeId = u64;

/// A resting or incoming instruction.
///
/// `quantity` is mutated in place as fills occur; it always reflects the
/// residual (unfilled) quantity, never the original order size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier assigned by the book at admission.
    pub order_id: OrderId,
    /// Buy or sell.
    pub side: Side,
    /// Limit, market, IOC, or FOK.
    pub order_type: OrderType,
    /// Limit price in ticks. Unused (never compared) for `OrderType::Market`.
    pub price: Price,
    /// Residual quantity, mutated as fills occur.
    pub quantity: Quantity,
    /// Microseconds since a steady monotonic epoch, captured at construction.
    pub timestamp: u64,
}

impl Order {
    /// Construct a new order. `order_id` and `timestamp` are assigned by the
    /// book's dispatcher, not by the caller, so this constructor is crate-private.
    pub(crate) fn new(
        order_id: OrderId,
        side: Side,
        order_type: OrderType,
        price: Price,
        quantity: Quantity,
        timestamp: u64,
    ) -> Self {
        Order {
            order_id,
            side,
            order_type,
            price,
            quantity,
            timestamp,
        }
    }
}

/// An immutable record of one fill between a resting (maker) order and an
/// incoming (taker) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique identifier, process-wide, strictly increasing in emission order.
    pub trade_id: TradeId,
    /// Copy of the book's symbol at the time of the trade.
    pub symbol: String,
    /// The fill price — always the maker's resting price.
    pub price: Price,
    /// The filled quantity.
    pub quantity: Quantity,
    /// Microseconds since a steady monotonic epoch, captured at emission.
    pub timestamp: u64,
    /// The resting order's ID that supplied liquidity.
    pub maker_order_id: OrderId,
    /// The incoming order's ID that removed liquidity.
    pub taker_order_id: OrderId,
    /// The side of the incoming (aggressing) order.
    pub aggressor_side: Side,
    /// Absolute fee charged (or rebated, if negative) to the maker.
    pub maker_fee: f64,
    /// Absolute fee charged to the taker.
    pub taker_fee: f64,
}
