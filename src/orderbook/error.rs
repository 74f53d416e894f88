//! Order book error types.
//!
//! Business outcomes — partial fills, FOK kills, discarded IOC/MARKET
//! residuals — are never errors; they are reported through the returned
//! trade list. `OrderBookError` is reserved for structural faults: malformed
//! input at the binding boundary, or a trade callback that panicked.

use thiserror::Error;

/// Errors that can occur while submitting an order to an [`OrderBook`](super::book::OrderBook).
#[derive(Error, Debug)]
pub enum OrderBookError {
    /// An unrecognized side string was passed to [`OrderBook::submit_str`](super::book::OrderBook::submit_str).
    #[error("invalid side: {0:?} (expected \"BUY\" or \"SELL\")")]
    InvalidSide(String),

    /// An unrecognized order-type string was passed to [`OrderBook::submit_str`](super::book::OrderBook::submit_str).
    #[error("invalid order type: {0:?} (expected \"LIMIT\", \"MARKET\", \"IOC\", or \"FOK\")")]
    InvalidType(String),

    /// Quantity was non-positive, `NaN`, or infinite.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(f64),

    /// Price was negative, `NaN`, or infinite.
    #[error("invalid price: {0}")]
    InvalidPrice(f64),

    /// The trade callback panicked while processing an emitted trade.
    ///
    /// The trade that triggered the panic was already committed to book
    /// state and history before the callback ran, so book state is not
    /// corrupted by this error.
    #[error("trade callback panicked: {0}")]
    CallbackFault(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            OrderBookError::InvalidSide("FOO".into()).to_string(),
            "invalid side: \"FOO\" (expected \"BUY\" or \"SELL\")"
        );
        assert_eq!(
            OrderBookError::InvalidQuantity(-1.0).to_string(),
            "invalid quantity: -1"
        );
    }
}
