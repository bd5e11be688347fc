//! Snapshot fetching
//!
//! One instrument per call. Failures never escape: a not-found answer means
//! the instrument is gone, anything else is worth retrying next tick.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{BookInput, InstrumentTarget, MidPricePolicy, Snapshot};
use crate::infrastructure::client::QuoteSource;

/// Result of fetching one instrument
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched(Snapshot),
    /// Book or last trade price answered not-found; carries the token id
    Retired(String),
    /// Any other failure; the previous snapshot stays valid
    Transient,
}

pub struct SnapshotFetcher<S> {
    source: Arc<S>,
    depth: usize,
    mid_price_policy: MidPricePolicy,
}

impl<S: QuoteSource> SnapshotFetcher<S> {
    pub fn new(source: Arc<S>, depth: usize, mid_price_policy: MidPricePolicy) -> Self {
        Self {
            source,
            depth,
            mid_price_policy,
        }
    }

    pub async fn fetch(&self, target: &InstrumentTarget) -> FetchOutcome {
        let token_id = target.token_id.as_str();
        let (book, last_trade) = tokio::join!(
            self.source.order_book(token_id),
            self.source.last_trade_price(token_id)
        );

        let (book, last_trade) = match (book, last_trade) {
            (Ok(book), Ok(last_trade)) => (book, last_trade),
            (Err(e), _) | (_, Err(e)) if e.is_not_found() => {
                warn!("Orderbook unavailable (404) for {}: {}", describe(target), e);
                return FetchOutcome::Retired(target.token_id.clone());
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Orderbook fetch failed for {}: {}", describe(target), e);
                return FetchOutcome::Transient;
            }
        };

        let input = BookInput {
            bids: &book.bids,
            asks: &book.asks,
            timestamp: &book.timestamp,
            last_trade_price: last_trade.price_f64(),
        };
        FetchOutcome::Fetched(Snapshot::build(target, input, self.depth, self.mid_price_policy))
    }
}

/// `token <id> (<market slug>)`
fn describe(target: &InstrumentTarget) -> String {
    format!("token {} ({})", target.token_id, target.market_slug)
}
