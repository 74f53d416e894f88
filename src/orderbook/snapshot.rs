//! Market-data snapshots: the best bid/offer and a depth-limited view of
//! both sides' aggregated levels, serialized as JSON.

use super::level::LevelMap;
use super::types::{Price, Quantity};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One price level as it appears in a snapshot: price and total resting
/// quantity, with no indication of how many individual orders make it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLevel {
    /// The price, in ticks.
    pub price: Price,
    /// Total resting quantity across every order at this price.
    pub quantity: Quantity,
}

/// Best bid and best offer, each `None` if that side of the book is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bbo {
    /// The highest resting bid, if any.
    pub bid: Option<SnapshotLevel>,
    /// The lowest resting ask, if any.
    pub ask: Option<SnapshotLevel>,
}

/// A consistent, point-in-time view of one symbol's book.
///
/// Bids are ordered best-first (descending price); asks are ordered
/// best-first (ascending price). Both are truncated to the same `depth`,
/// with no exception for a partially-filled last level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The symbol this snapshot was taken for.
    pub symbol: String,
    /// ISO-8601 UTC timestamp, microsecond precision, `Z`-suffixed.
    pub timestamp: String,
    /// Best bid and offer at capture time.
    pub bbo: Bbo,
    /// Up to `depth` bid levels, best (highest price) first.
    pub bids: Vec<SnapshotLevel>,
    /// Up to `depth` ask levels, best (lowest price) first.
    pub asks: Vec<SnapshotLevel>,
}

impl OrderBookSnapshot {
    pub(crate) fn capture(
        symbol: &str,
        bid_levels: &LevelMap,
        ask_levels: &LevelMap,
        depth: usize,
    ) -> Self {
        let bids: Vec<SnapshotLevel> = bid_levels
            .ascending()
            .rev()
            .take(depth)
            .map(|(price, quantity)| SnapshotLevel { price, quantity })
            .collect();
        let asks: Vec<SnapshotLevel> = ask_levels
            .ascending()
            .take(depth)
            .map(|(price, quantity)| SnapshotLevel { price, quantity })
            .collect();

        let bbo = Bbo {
            bid: bids.first().copied(),
            ask: asks.first().copied(),
        };

        OrderBookSnapshot {
            symbol: symbol.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            bbo,
            bids,
            asks,
        }
    }

    /// Serialize this snapshot to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
