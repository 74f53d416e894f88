//! Trade callback plumbing.

use super::types::Trade;
use std::sync::Arc;

/// A listener invoked once per emitted trade, in emission order, while the
/// book's mutex is held.
///
/// Listeners must be non-blocking and must not re-enter the book that
/// invoked them — doing so deadlocks, since the mutex is not reentrant.
pub type TradeListener = Arc<dyn Fn(&Trade) + Send + Sync>;
