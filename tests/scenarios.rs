//! Literal order-flow scenarios against a fresh book, one per test.

use orderbook_engine::{OrderBook, Price, Quantity, Side};

#[test]
fn s1_simple_cross() {
    let book = OrderBook::new("TEST");
    book.submit_limit(Side::Sell, Price(10), Quantity(100)).unwrap();
    let trades = book.submit_limit(Side::Buy, Price(10), Quantity(100)).unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, Price(10));
    assert_eq!(trades[0].quantity, Quantity(100));
    assert_eq!(trades[0].aggressor_side, Side::Buy);

    let (bid, ask) = book.get_bbo();
    assert_eq!(bid, None);
    assert_eq!(ask, None);
}

#[test]
fn s2_partial_fill() {
    let book = OrderBook::new("TEST");
    book.submit_limit(Side::Sell, Price(10), Quantity(100)).unwrap();
    let trades = book.submit_limit(Side::Buy, Price(10), Quantity(60)).unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].quantity, Quantity(60));

    let (bid, ask) = book.get_bbo();
    assert_eq!(bid, None);
    assert_eq!(ask, Some((Price(10), Quantity(40))));
}

#[test]
fn s3_price_time_priority() {
    let book = OrderBook::new("TEST");
    book.submit_limit(Side::Sell, Price(10), Quantity(50)).unwrap();
    book.submit_limit(Side::Sell, Price(10), Quantity(50)).unwrap();
    let trades = book.submit_limit(Side::Buy, Price(10), Quantity(60)).unwrap();

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].quantity, Quantity(50));
    assert_eq!(trades[1].quantity, Quantity(10));
    // Order IDs are handed out from a process-wide counter shared across
    // every book in the test binary, so only relative order is meaningful:
    // the earlier-submitted resting SELL fills first.
    assert!(trades[0].maker_order_id < trades[1].maker_order_id);

    let (_, ask) = book.get_bbo();
    assert_eq!(ask, Some((Price(10), Quantity(40))));
}

#[test]
fn s4_market_sweep() {
    let book = OrderBook::new("TEST");
    book.submit_limit(Side::Sell, Price(100), Quantity(10)).unwrap();
    book.submit_limit(Side::Sell, Price(101), Quantity(10)).unwrap();
    book.submit_limit(Side::Sell, Price(102), Quantity(10)).unwrap();

    let trades = book.submit_market(Side::Buy, Quantity(25)).unwrap();

    assert_eq!(trades.len(), 3);
    assert_eq!((trades[0].price, trades[0].quantity), (Price(100), Quantity(10)));
    assert_eq!((trades[1].price, trades[1].quantity), (Price(101), Quantity(10)));
    assert_eq!((trades[2].price, trades[2].quantity), (Price(102), Quantity(5)));

    let (_, ask) = book.get_bbo();
    assert_eq!(ask, Some((Price(102), Quantity(5))));
}

#[test]
fn s5_ioc_partial_then_cancel() {
    let book = OrderBook::new("TEST");
    book.submit_limit(Side::Sell, Price(100), Quantity(10)).unwrap();
    book.submit_limit(Side::Sell, Price(102), Quantity(10)).unwrap();

    let trades = book.submit_ioc(Side::Buy, Price(101), Quantity(15)).unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, Price(100));
    assert_eq!(trades[0].quantity, Quantity(10));

    let snapshot = book.get_snapshot(10);
    assert!(snapshot.asks.iter().all(|l| l.price != Price(100)));
    assert_eq!(snapshot.asks.len(), 1);
    assert_eq!(snapshot.asks[0].price, Price(102));
}

#[test]
fn s6a_fok_kills_when_insufficient() {
    let book = OrderBook::new("TEST");
    book.submit_limit(Side::Sell, Price(100), Quantity(5)).unwrap();
    book.submit_limit(Side::Sell, Price(101), Quantity(5)).unwrap();

    let before = book.get_snapshot(10);
    let trades = book.submit_fok(Side::Buy, Price(101), Quantity(15)).unwrap();
    let after = book.get_snapshot(10);

    assert!(trades.is_empty());
    assert_eq!(before.bids, after.bids);
    assert_eq!(before.asks, after.asks);
}

#[test]
fn s6b_fok_fills_completely_when_sufficient() {
    let book = OrderBook::new("TEST");
    book.submit_limit(Side::Sell, Price(100), Quantity(5)).unwrap();
    book.submit_limit(Side::Sell, Price(101), Quantity(5)).unwrap();

    let trades = book.submit_fok(Side::Buy, Price(101), Quantity(10)).unwrap();

    assert_eq!(trades.len(), 2);
    assert_eq!((trades[0].price, trades[0].quantity), (Price(100), Quantity(5)));
    assert_eq!((trades[1].price, trades[1].quantity), (Price(101), Quantity(5)));

    let (bid, ask) = book.get_bbo();
    assert_eq!(bid, None);
    assert_eq!(ask, None);
}

#[test]
fn round_trip_matching_pair_clears_both_sides_in_one_trade() {
    let book = OrderBook::new("TEST");
    book.submit_limit(Side::Sell, Price(50), Quantity(30)).unwrap();
    let trades = book.submit_limit(Side::Buy, Price(50), Quantity(30)).unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].quantity, Quantity(30));
    assert_eq!(trades[0].price, Price(50));

    let (bid, ask) = book.get_bbo();
    assert_eq!(bid, None);
    assert_eq!(ask, None);
}

#[test]
fn snapshot_is_idempotent_without_intervening_mutation() {
    let book = OrderBook::new("TEST");
    book.submit_limit(Side::Buy, Price(99), Quantity(5)).unwrap();
    book.submit_limit(Side::Sell, Price(101), Quantity(7)).unwrap();

    let first = book.get_snapshot(5);
    let second = book.get_snapshot(5);

    assert_eq!(first.bbo, second.bbo);
    assert_eq!(first.bids, second.bids);
    assert_eq!(first.asks, second.asks);
}
