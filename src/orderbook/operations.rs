//! Order-type dispatch: turns a `Side` + `OrderType` + price/quantity into
//! book mutations and an emitted trade list.
//!
//! Each function here owns the admission policy for one order type; all of
//! them delegate the actual price-time matching to
//! [`super::matching::sweep_opposite`]. [`OrderBook`](super::book::OrderBook)
//! is the only caller, always under its single mutex.

use super::fees::FeeSchedule;
use super::level::LevelMap;
use super::matching::{available_liquidity, sweep_opposite};
use super::queue::OrderQueue;
use super::types::{Order, OrderId, OrderType, Price, Quantity, Side, Trade};
use std::sync::atomic::AtomicU64;

/// Bundles the four queue/level-map halves an order-type handler needs,
/// keyed by side, so call sites don't have to match on `side` themselves.
pub(crate) struct Halves<'a> {
    pub bids: &'a mut OrderQueue,
    pub asks: &'a mut OrderQueue,
    pub bid_levels: &'a mut LevelMap,
    pub ask_levels: &'a mut LevelMap,
}

impl<'a> Halves<'a> {
    fn own(&mut self, side: Side) -> (&mut OrderQueue, &mut LevelMap) {
        match side {
            Side::Buy => (&mut *self.bids, &mut *self.bid_levels),
            Side::Sell => (&mut *self.asks, &mut *self.ask_levels),
        }
    }

    fn opposite(&mut self, side: Side) -> (&mut OrderQueue, &mut LevelMap) {
        match side {
            Side::Buy => (&mut *self.asks, &mut *self.ask_levels),
            Side::Sell => (&mut *self.bids, &mut *self.bid_levels),
        }
    }
}

/// A LIMIT order: rests on the book for whatever quantity does not
/// immediately cross, matching price-time priority against the opposite
/// side first.
#[allow(clippy::too_many_arguments)]
pub(crate) fn submit_limit(
    halves: &mut Halves,
    order_id: OrderId,
    side: Side,
    price: Price,
    quantity: Quantity,
    timestamp: u64,
    symbol: &str,
    fees: &FeeSchedule,
    next_trade_id: &AtomicU64,
    now_micros: impl Fn() -> u64,
) -> Vec<Trade> {
    let mut remaining = quantity;
    let (opposite_queue, opposite_level) = halves.opposite(side);
    let trades = sweep_opposite(
        opposite_queue,
        opposite_level,
        side,
        order_id,
        &mut remaining,
        Some(price),
        symbol,
        fees,
        next_trade_id,
        now_micros,
    );

    let filled = quantity.saturating_sub(remaining);
    if filled.0 > 0 {
        let (_, own_level) = halves.own(side);
        own_level.update(price, -(filled.0 as i64));
    }

    if remaining.0 > 0 {
        let order = Order::new(order_id, side, OrderType::Limit, price, remaining, timestamp);
        let (own_queue, own_level) = halves.own(side);
        own_queue.push(order);
        own_level.update(price, remaining.0 as i64);
    }

    trades
}

/// A MARKET order: sweeps the opposite side unconditionally (no price
/// limit); any residual once the opposite side empties is discarded, never
/// rests.
#[allow(clippy::too_many_arguments)]
pub(crate) fn submit_market(
    halves: &mut Halves,
    order_id: OrderId,
    side: Side,
    quantity: Quantity,
    symbol: &str,
    fees: &FeeSchedule,
    next_trade_id: &AtomicU64,
    now_micros: impl Fn() -> u64,
) -> Vec<Trade> {
    let mut remaining = quantity;
    let (opposite_queue, opposite_level) = halves.opposite(side);
    sweep_opposite(
        opposite_queue,
        opposite_level,
        side,
        order_id,
        &mut remaining,
        None,
        symbol,
        fees,
        next_trade_id,
        now_micros,
    )
}

/// An IOC order: sweeps the opposite side within `price`, then discards
/// whatever quantity, if any, remains unfilled — it never rests on the book.
#[allow(clippy::too_many_arguments)]
pub(crate) fn submit_ioc(
    halves: &mut Halves,
    order_id: OrderId,
    side: Side,
    price: Price,
    quantity: Quantity,
    symbol: &str,
    fees: &FeeSchedule,
    next_trade_id: &AtomicU64,
    now_micros: impl Fn() -> u64,
) -> Vec<Trade> {
    let mut remaining = quantity;
    let (opposite_queue, opposite_level) = halves.opposite(side);
    sweep_opposite(
        opposite_queue,
        opposite_level,
        side,
        order_id,
        &mut remaining,
        Some(price),
        symbol,
        fees,
        next_trade_id,
        now_micros,
    )
}

/// A FOK order: pre-scans the opposite side's aggregated level map for
/// enough crossing liquidity to fill `quantity` entirely. If there isn't
/// enough, the order is killed with no trades and no state change at all.
/// Otherwise it behaves exactly like an IOC order, and the pre-scan
/// guarantees that IOC sweep fully fills.
#[allow(clippy::too_many_arguments)]
pub(crate) fn submit_fok(
    halves: &mut Halves,
    order_id: OrderId,
    side: Side,
    price: Price,
    quantity: Quantity,
    symbol: &str,
    fees: &FeeSchedule,
    next_trade_id: &AtomicU64,
    now_micros: impl Fn() -> u64,
) -> Vec<Trade> {
    let (_, opposite_level) = halves.opposite(side);
    let available = available_liquidity(opposite_level, side, price, quantity);
    if available.0 < quantity.0 {
        return Vec::new();
    }

    submit_ioc(
        halves,
        order_id,
        side,
        price,
        quantity,
        symbol,
        fees,
        next_trade_id,
        now_micros,
    )
}
