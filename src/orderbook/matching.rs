//! The core crossing loop shared by LIMIT, MARKET, IOC, and FOK.
//!
//! All four order types ultimately sweep the opposite side's
//! [`OrderQueue`]/[`LevelMap`] pair the same way: repeatedly take the
//! opposite top, check whether it still crosses, fill the smaller of the two
//! residual quantities at the *maker's* price, and push the maker back if
//! any quantity survives. What differs between order types is only (a)
//! whether there is a price limit at all (`None` sweeps unconditionally,
//! which is exactly a MARKET order) and (b) what happens to the taker's own
//! side afterward — handled by the callers in [`super::operations`].

use super::fees::FeeSchedule;
use super::level::LevelMap;
use super::queue::OrderQueue;
use super::types::{OrderId, Price, Quantity, Side, Trade};
use std::sync::atomic::{AtomicU64, Ordering};

/// Whether `opposite_top_price` still crosses a taker limit of `price_limit`
/// on `taker_side`. `None` means no limit at all (a market sweep).
fn crosses(taker_side: Side, price_limit: Option<Price>, opposite_top_price: Price) -> bool {
    match price_limit {
        None => true,
        Some(limit) => match taker_side {
            Side::Buy => opposite_top_price.0 <= limit.0,
            Side::Sell => opposite_top_price.0 >= limit.0,
        },
    }
}

/// Repeatedly match `remaining` against the opposite side's book until
/// either `remaining` reaches zero, the opposite side empties, or the
/// opposite top no longer crosses `price_limit`.
///
/// Only the opposite side's queue and level map are mutated here — the
/// taker's own side (for a resting LIMIT order) is reconciled by the caller
/// in one batched step once the sweep is done, since the taker's own top
/// never changes identity mid-sweep: a fresh crossing LIMIT order is always
/// the best price on its own side, so nothing else on that side participates
/// in this sweep.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sweep_opposite(
    opposite_queue: &mut OrderQueue,
    opposite_level: &mut LevelMap,
    taker_side: Side,
    taker_order_id: OrderId,
    remaining: &mut Quantity,
    price_limit: Option<Price>,
    symbol: &str,
    fees: &FeeSchedule,
    next_trade_id: &AtomicU64,
    now_micros: impl Fn() -> u64,
) -> Vec<Trade> {
    let mut trades = Vec::new();

    while remaining.0 > 0 {
        let Some(maker_top) = opposite_queue.top() else {
            break;
        };
        if !crosses(taker_side, price_limit, maker_top.price) {
            break;
        }

        let mut maker = opposite_queue.pop().expect("top() just returned Some");
        let trade_price = maker.price;
        let trade_quantity = (*remaining).min(maker.quantity);

        let trade_id = next_trade_id.fetch_add(1, Ordering::Relaxed);
        let maker_fee = fees.maker_fee(trade_price, trade_quantity);
        let taker_fee = fees.taker_fee(trade_price, trade_quantity);

        let (maker_order_id, resolved_taker_id) = (maker.order_id, taker_order_id);
        trades.push(Trade {
            trade_id,
            symbol: symbol.to_string(),
            price: trade_price,
            quantity: trade_quantity,
            timestamp: now_micros(),
            maker_order_id,
            taker_order_id: resolved_taker_id,
            aggressor_side: taker_side,
            maker_fee,
            taker_fee,
        });

        maker.quantity = maker.quantity.saturating_sub(trade_quantity);
        *remaining = remaining.saturating_sub(trade_quantity);
        opposite_level.update(trade_price, -(trade_quantity.0 as i64));

        if !maker.quantity.is_zero() {
            opposite_queue.push(maker);
        }
    }

    trades
}

/// Sum the opposite level map's resting quantity at prices that cross
/// `price_limit`, stopping as soon as the running total reaches `target` or
/// the first non-crossing price is encountered.
pub(crate) fn available_liquidity(
    opposite_level: &LevelMap,
    taker_side: Side,
    price_limit: Price,
    target: Quantity,
) -> Quantity {
    let mut total = Quantity::ZERO;
    let levels: Vec<(Price, Quantity)> = match taker_side {
        Side::Buy => opposite_level.ascending().collect(),
        Side::Sell => opposite_level.ascending().rev().collect(),
    };
    for (price, qty) in levels {
        if !crosses(taker_side, Some(price_limit), price) {
            break;
        }
        total = total.saturating_add(qty);
        if total.0 >= target.0 {
            break;
        }
    }
    total
}
