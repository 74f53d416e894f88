//! Aggregated price-level map: the derived index kept in lockstep with an
//! [`OrderQueue`](super::queue::OrderQueue).
//!
//! This map is never authoritative over individual orders — callers must
//! only apply deltas that correspond to real fills or insertions recorded
//! in the order queue. [`OrderBook`](super::book::OrderBook) centralizes
//! every mutation through [`LevelMap::update`] so the two indices cannot
//! drift apart.

use super::types::{Price, Quantity};
use std::collections::BTreeMap;

/// Ordered map from price to total resting quantity at that price, for one side.
#[derive(Debug, Clone, Default)]
pub struct LevelMap {
    levels: BTreeMap<Price, Quantity>,
}

impl LevelMap {
    /// An empty level map.
    pub fn new() -> Self {
        LevelMap {
            levels: BTreeMap::new(),
        }
    }

    /// Add `delta` to the quantity resting at `price`. If the result is
    /// zero, the key is removed — no price with zero quantity is ever
    /// present.
    pub fn update(&mut self, price: Price, delta: i64) {
        let entry = self.levels.entry(price).or_insert(Quantity(0));
        let updated = if delta >= 0 {
            entry.0.saturating_add(delta as u64)
        } else {
            entry.0.saturating_sub((-delta) as u64)
        };
        if updated == 0 {
            self.levels.remove(&price);
        } else {
            *entry = Quantity(updated);
        }
    }

    /// The resting quantity at `price`, or zero if the level is absent.
    pub fn quantity_at(&self, price: Price) -> Quantity {
        self.levels.get(&price).copied().unwrap_or(Quantity(0))
    }

    /// Whether any price level is populated on this side.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Ascending `(price, quantity)` iterator — natural order for asks,
    /// reverse it for bids.
    pub fn ascending(&self) -> impl DoubleEndedIterator<Item = (Price, Quantity)> + '_ {
        self.levels.iter().map(|(&p, &q)| (p, q))
    }

    /// The lowest populated price and its quantity.
    pub fn lowest(&self) -> Option<(Price, Quantity)> {
        self.levels.iter().next().map(|(&p, &q)| (p, q))
    }

    /// The highest populated price and its quantity.
    pub fn highest(&self) -> Option<(Price, Quantity)> {
        self.levels.iter().next_back().map(|(&p, &q)| (p, q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_inserts_and_accumulates() {
        let mut m = LevelMap::new();
        m.update(Price(10), 5);
        m.update(Price(10), 3);
        assert_eq!(m.quantity_at(Price(10)), Quantity(8));
    }

    #[test]
    fn update_to_zero_removes_level() {
        let mut m = LevelMap::new();
        m.update(Price(10), 5);
        m.update(Price(10), -5);
        assert_eq!(m.quantity_at(Price(10)), Quantity(0));
        assert!(m.is_empty());
    }

    #[test]
    fn negative_delta_never_goes_below_zero() {
        let mut m = LevelMap::new();
        m.update(Price(10), 5);
        m.update(Price(10), -100);
        assert_eq!(m.quantity_at(Price(10)), Quantity(0));
        assert!(m.is_empty());
    }

    #[test]
    fn lowest_and_highest() {
        let mut m = LevelMap::new();
        m.update(Price(10), 1);
        m.update(Price(20), 1);
        m.update(Price(15), 1);
        assert_eq!(m.lowest(), Some((Price(10), Quantity(1))));
        assert_eq!(m.highest(), Some((Price(20), Quantity(1))));
    }

    #[test]
    fn ascending_order_is_price_sorted() {
        let mut m = LevelMap::new();
        m.update(Price(30), 1);
        m.update(Price(10), 2);
        m.update(Price(20), 3);
        let prices: Vec<Price> = m.ascending().map(|(p, _)| p).collect();
        assert_eq!(prices, vec![Price(10), Price(20), Price(30)]);
    }
}
