//! Per-side priority-ordered order queue.
//!
//! Each half-book keeps one [`OrderQueue`] holding every live resting order
//! on that side, ordered by price-time priority. Partial
//! fills are applied by popping the top order, mutating a local copy, and
//! pushing it back if the remainder is positive — this keeps the
//! `(price, timestamp)` key of a partially-filled order unchanged, which is
//! what preserves its queue position across fills.

use super::types::{Order, Side};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Wraps an [`Order`] with the `Ord` impl that gives `BinaryHeap` price-time
/// priority semantics for a given side.
///
/// `BinaryHeap` is a max-heap, so "highest priority pops first" must be
/// expressed as "highest priority compares greatest". For bids that means
/// higher price, then earlier timestamp. For asks it means lower price,
/// then earlier timestamp.
#[derive(Debug, Clone)]
struct HeapOrder {
    order: Order,
    side: Side,
}

impl PartialEq for HeapOrder {
    fn eq(&self, other: &Self) -> bool {
        self.order.price == other.order.price && self.order.timestamp == other.order.timestamp
    }
}
impl Eq for HeapOrder {}

impl PartialOrd for HeapOrder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapOrder {
    fn cmp(&self, other: &Self) -> Ordering {
        let price_order = match self.side {
            Side::Buy => self.order.price.cmp(&other.order.price),
            Side::Sell => other.order.price.cmp(&self.order.price),
        };
        price_order.then_with(|| other.order.timestamp.cmp(&self.order.timestamp))
    }
}

/// A priority-ordered collection of live resting orders for one side of the book.
#[derive(Debug, Clone, Default)]
pub struct OrderQueue {
    side: Option<Side>,
    heap: BinaryHeap<HeapOrder>,
}

impl OrderQueue {
    /// Create an empty queue for `side`. The side is fixed for the life of the queue.
    pub fn new(side: Side) -> Self {
        OrderQueue {
            side: Some(side),
            heap: BinaryHeap::new(),
        }
    }

    /// Insert an order, preserving price-time priority.
    pub fn push(&mut self, order: Order) {
        let side = self.side.unwrap_or(order.side);
        self.side.get_or_insert(order.side);
        self.heap.push(HeapOrder { order, side });
    }

    /// The highest-priority order without removing it.
    pub fn top(&self) -> Option<&Order> {
        self.heap.peek().map(|h| &h.order)
    }

    /// Remove and return the highest-priority order.
    pub fn pop(&mut self) -> Option<Order> {
        self.heap.pop().map(|h| h.order)
    }

    /// Whether the queue holds no live orders.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of live resting orders.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::types::{OrderType, Price, Quantity};

    fn order(id: u64, side: Side, price: i64, qty: u64, ts: u64) -> Order {
        Order::new(id, side, OrderType::Limit, Price(price), Quantity(qty), ts)
    }

    #[test]
    fn bid_queue_orders_by_price_then_time() {
        let mut q = OrderQueue::new(Side::Buy);
        q.push(order(1, Side::Buy, 10, 5, 100));
        q.push(order(2, Side::Buy, 12, 5, 200));
        q.push(order(3, Side::Buy, 12, 5, 150));

        assert_eq!(q.pop().unwrap().order_id, 3); // higher price (12), earlier ts
        assert_eq!(q.pop().unwrap().order_id, 2);
        assert_eq!(q.pop().unwrap().order_id, 1);
        assert!(q.is_empty());
    }

    #[test]
    fn ask_queue_orders_by_price_then_time() {
        let mut q = OrderQueue::new(Side::Sell);
        q.push(order(1, Side::Sell, 10, 5, 100));
        q.push(order(2, Side::Sell, 8, 5, 200));
        q.push(order(3, Side::Sell, 8, 5, 50));

        assert_eq!(q.pop().unwrap().order_id, 3); // lower price (8), earlier ts
        assert_eq!(q.pop().unwrap().order_id, 2);
        assert_eq!(q.pop().unwrap().order_id, 1);
    }

    #[test]
    fn partial_fill_preserves_priority() {
        let mut q = OrderQueue::new(Side::Buy);
        q.push(order(1, Side::Buy, 10, 50, 100));
        q.push(order(2, Side::Buy, 10, 50, 200));

        let mut top = q.pop().unwrap();
        assert_eq!(top.order_id, 1);
        top.quantity = Quantity(20);
        q.push(top);

        // order 1 still has priority at the same price because its timestamp
        // (100) is unchanged, even though it was popped and re-pushed.
        assert_eq!(q.top().unwrap().order_id, 1);
        assert_eq!(q.top().unwrap().quantity, Quantity(20));
    }

    #[test]
    fn top_does_not_remove() {
        let mut q = OrderQueue::new(Side::Buy);
        q.push(order(1, Side::Buy, 10, 5, 100));
        assert_eq!(q.top().unwrap().order_id, 1);
        assert_eq!(q.len(), 1);
    }
}
