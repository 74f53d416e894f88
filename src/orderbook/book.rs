//! The order book itself: a single mutex guarding one symbol's bid/ask
//! half-books, wired to the dispatch functions in
//! [`super::operations`].
//!
//! Order IDs and trade IDs are handed out from process-wide atomics rather
//! than per-instance counters, so IDs stay globally unique even across
//! multiple [`OrderBook`] instances in the same process.

use super::error::OrderBookError;
use super::fees::FeeSchedule;
use super::level::LevelMap;
use super::operations::{self, Halves};
use super::queue::OrderQueue;
use super::snapshot::OrderBookSnapshot;
use super::trade::TradeListener;
use super::types::{OrderType, Price, Quantity, Side, Trade, TradeId};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

static NEXT_ORDER_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_TRADE_ID: AtomicU64 = AtomicU64::new(1);

fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

struct BookState {
    bids: OrderQueue,
    asks: OrderQueue,
    bid_levels: LevelMap,
    ask_levels: LevelMap,
    trades: Vec<Trade>,
    listener: Option<TradeListener>,
}

impl BookState {
    fn new() -> Self {
        BookState {
            bids: OrderQueue::new(Side::Buy),
            asks: OrderQueue::new(Side::Sell),
            bid_levels: LevelMap::new(),
            ask_levels: LevelMap::new(),
            trades: Vec::new(),
            listener: None,
        }
    }

    fn halves(&mut self) -> Halves<'_> {
        Halves {
            bids: &mut self.bids,
            asks: &mut self.asks,
            bid_levels: &mut self.bid_levels,
            ask_levels: &mut self.ask_levels,
        }
    }
}

/// A single-symbol limit order book with an in-process matching engine.
///
/// All mutating operations acquire one internal mutex for their entire
/// duration, including, if one is registered, the synchronous call into the
/// [`TradeListener`]. This keeps every observer — the trade
/// history, the aggregated level maps, and any snapshot taken concurrently
/// from another thread — consistent with the matching that produced it, at
/// the cost of serializing all order flow for this symbol through one lock.
pub struct OrderBook {
    symbol: String,
    fee_schedule: FeeSchedule,
    state: Mutex<BookState>,
}

impl OrderBook {
    /// Create an empty book for `symbol`, using the default fee schedule
    /// (0.001 maker / 0.002 taker).
    pub fn new(symbol: impl Into<String>) -> Self {
        OrderBook::with_fee_schedule(symbol, FeeSchedule::default())
    }

    /// Create an empty book for `symbol` with an explicit fee schedule.
    pub fn with_fee_schedule(symbol: impl Into<String>, fee_schedule: FeeSchedule) -> Self {
        OrderBook {
            symbol: symbol.into(),
            fee_schedule,
            state: Mutex::new(BookState::new()),
        }
    }

    /// The symbol this book was constructed for.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The fee schedule currently in effect.
    pub fn fee_schedule(&self) -> FeeSchedule {
        self.fee_schedule
    }

    /// Register a listener invoked once per emitted trade, in emission
    /// order, while the book's mutex is held. Replaces any previously
    /// registered listener.
    pub fn set_trade_listener(&self, listener: TradeListener) {
        let mut state = self.state.lock().expect("order book mutex poisoned");
        state.listener = Some(listener);
    }

    /// Submit a resting LIMIT order: matches against the opposite side up
    /// to `price`, then rests any unfilled remainder.
    pub fn submit_limit(
        &self,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<Vec<Trade>, OrderBookError> {
        validate_price(price)?;
        validate_quantity(quantity)?;
        let order_id = NEXT_ORDER_ID.fetch_add(1, Ordering::Relaxed);
        trace!("submitting LIMIT {} {} {} {}", order_id, side, price, quantity);
        self.dispatch(|halves, symbol, fees, trade_ids, now| {
            operations::submit_limit(
                halves, order_id, side, price, quantity, now(), symbol, fees, trade_ids, now,
            )
        })
    }

    /// Submit a MARKET order: sweeps the opposite side unconditionally;
    /// any unfilled remainder is discarded, never rests.
    pub fn submit_market(
        &self,
        side: Side,
        quantity: Quantity,
    ) -> Result<Vec<Trade>, OrderBookError> {
        validate_quantity(quantity)?;
        let order_id = NEXT_ORDER_ID.fetch_add(1, Ordering::Relaxed);
        trace!("submitting MARKET {} {} {}", order_id, side, quantity);
        self.dispatch(|halves, symbol, fees, trade_ids, now| {
            operations::submit_market(halves, order_id, side, quantity, symbol, fees, trade_ids, now)
        })
    }

    /// Submit an IOC order: matches within `price`, discards any residual.
    pub fn submit_ioc(
        &self,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<Vec<Trade>, OrderBookError> {
        validate_price(price)?;
        validate_quantity(quantity)?;
        let order_id = NEXT_ORDER_ID.fetch_add(1, Ordering::Relaxed);
        trace!("submitting IOC {} {} {} {}", order_id, side, price, quantity);
        self.dispatch(|halves, symbol, fees, trade_ids, now| {
            operations::submit_ioc(
                halves, order_id, side, price, quantity, symbol, fees, trade_ids, now,
            )
        })
    }

    /// Submit a FOK order: fills completely within `price` or not at all.
    pub fn submit_fok(
        &self,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<Vec<Trade>, OrderBookError> {
        validate_price(price)?;
        validate_quantity(quantity)?;
        let order_id = NEXT_ORDER_ID.fetch_add(1, Ordering::Relaxed);
        trace!("submitting FOK {} {} {} {}", order_id, side, price, quantity);
        self.dispatch(|halves, symbol, fees, trade_ids, now| {
            operations::submit_fok(
                halves, order_id, side, price, quantity, symbol, fees, trade_ids, now,
            )
        })
    }

    /// Convenience entry point for callers that carry side and order type
    /// as strings (e.g. a language binding or a wire protocol), mirroring
    /// the typed methods above but raising [`OrderBookError::InvalidSide`]
    /// or [`OrderBookError::InvalidType`] on an unrecognized string instead
    /// of failing to compile.
    pub fn submit_str(
        &self,
        side: &str,
        order_type: &str,
        price: f64,
        quantity: f64,
        tick_size: f64,
    ) -> Result<Vec<Trade>, OrderBookError> {
        let side = parse_side(side)?;
        let order_type = parse_order_type(order_type)?;
        let quantity = quantity_from_decimal(quantity)?;
        match order_type {
            OrderType::Limit => self.submit_limit(side, decimal_price(price, tick_size)?, quantity),
            OrderType::Market => self.submit_market(side, quantity),
            OrderType::Ioc => self.submit_ioc(side, decimal_price(price, tick_size)?, quantity),
            OrderType::Fok => self.submit_fok(side, decimal_price(price, tick_size)?, quantity),
        }
    }

    /// The best bid and ask, if any.
    pub fn get_bbo(&self) -> (Option<(Price, Quantity)>, Option<(Price, Quantity)>) {
        let state = self.state.lock().expect("order book mutex poisoned");
        (state.bid_levels.highest(), state.ask_levels.lowest())
    }

    /// A point-in-time snapshot of the top `depth` price levels on each
    /// side, taken under a single lock acquisition so bids, asks, and BBO
    /// are mutually consistent.
    pub fn get_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        let state = self.state.lock().expect("order book mutex poisoned");
        OrderBookSnapshot::capture(&self.symbol, &state.bid_levels, &state.ask_levels, depth)
    }

    /// The full trade history recorded by this book, oldest first.
    pub fn trade_history(&self) -> Vec<Trade> {
        let state = self.state.lock().expect("order book mutex poisoned");
        state.trades.clone()
    }

    fn dispatch(
        &self,
        run: impl FnOnce(&mut Halves, &str, &FeeSchedule, &AtomicU64, &dyn Fn() -> u64) -> Vec<Trade>,
    ) -> Result<Vec<Trade>, OrderBookError> {
        let mut state = self.state.lock().expect("order book mutex poisoned");
        let symbol = self.symbol.clone();
        let fees = self.fee_schedule;
        let trades = {
            let mut halves = state.halves();
            run(&mut halves, &symbol, &fees, &NEXT_TRADE_ID, &now_micros)
        };

        if !trades.is_empty() {
            trace!("{} {} trade(s) emitted", symbol, trades.len());
        }
        state.trades.extend(trades.iter().cloned());

        if let Some(listener) = state.listener.clone() {
            for trade in &trades {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener(trade)));
                if let Err(payload) = outcome {
                    let message = panic_message(payload);
                    debug!("{} trade callback panicked: {}", symbol, message);
                    return Err(OrderBookError::CallbackFault(message));
                }
            }
        }

        Ok(trades)
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "trade listener panicked with a non-string payload".to_string()
    }
}

fn validate_price(price: Price) -> Result<(), OrderBookError> {
    if price.0 <= 0 {
        return Err(OrderBookError::InvalidPrice(price.0 as f64));
    }
    Ok(())
}

/// Validate and convert a decimal price to ticks. Only called for order
/// types that actually use a limit price (`LIMIT`, `IOC`, `FOK`) — `MARKET`
/// never touches this, since its price field is unused per spec.
fn decimal_price(price: f64, tick_size: f64) -> Result<Price, OrderBookError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(OrderBookError::InvalidPrice(price));
    }
    Ok(Price::from_decimal(price, tick_size))
}

fn validate_quantity(quantity: Quantity) -> Result<(), OrderBookError> {
    if quantity.0 == 0 {
        return Err(OrderBookError::InvalidQuantity(0.0));
    }
    Ok(())
}

fn quantity_from_decimal(value: f64) -> Result<Quantity, OrderBookError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(OrderBookError::InvalidQuantity(value));
    }
    Ok(Quantity(value.round() as u64))
}

fn parse_side(side: &str) -> Result<Side, OrderBookError> {
    match side.to_ascii_uppercase().as_str() {
        "BUY" => Ok(Side::Buy),
        "SELL" => Ok(Side::Sell),
        other => Err(OrderBookError::InvalidSide(other.to_string())),
    }
}

fn parse_order_type(order_type: &str) -> Result<OrderType, OrderBookError> {
    match order_type.to_ascii_uppercase().as_str() {
        "LIMIT" => Ok(OrderType::Limit),
        "MARKET" => Ok(OrderType::Market),
        "IOC" => Ok(OrderType::Ioc),
        "FOK" => Ok(OrderType::Fok),
        other => Err(OrderBookError::InvalidType(other.to_string())),
    }
}
