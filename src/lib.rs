//! # Order Book Engine
//!
//! A single-symbol limit order book with an in-process matching engine:
//! price-time priority, LIMIT/MARKET/IOC/FOK order types, maker/taker fee
//! accounting, and best-bid/offer and depth snapshots.
//!
//! ## Key Features
//!
//! - **Price-time priority matching**: orders at the same price fill in the
//!   order they arrived, tracked through a priority queue per side.
//! - **Four order types**: `LIMIT` rests on the book when it does not fully
//!   cross; `MARKET` sweeps unconditionally; `IOC` matches within a limit
//!   price and discards any residual; `FOK` fills completely or not at all.
//! - **Maker/taker fee accounting**: every trade carries the fee charged to
//!   both sides, computed from a configurable [`FeeSchedule`].
//! - **Consistent market data**: [`OrderBook::get_bbo`] and
//!   [`OrderBook::get_snapshot`] are taken under a single lock acquisition,
//!   so they always reflect one consistent point in time.
//!
//! ## Concurrency model
//!
//! One [`OrderBook`] serializes all order flow for its symbol through a
//! single internal mutex, including any registered [`TradeListener`]
//! callback. This trades the throughput of a lock-free design for a much
//! simpler reasoning model: every observer sees book state exactly as it
//! was the instant a given trade was committed. Multiple symbols should use
//! one `OrderBook` each rather than sharing one instance.
//!
//! ## Status
//! This project is currently in active development and is not yet suitable
//! for production use.

pub mod orderbook;

pub use orderbook::{
    Bbo, FeeSchedule, Order, OrderBook, OrderBookError, OrderBookSnapshot, OrderId, OrderType,
    Price, Quantity, Side, SnapshotLevel, Trade, TradeId, TradeListener,
};
