//! Normalized per-instrument snapshots

use super::orderbook::{BookSide, OrderLevel, PriceLevel};
use super::target::InstrumentTarget;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the mid price is derived when one side of the book is empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MidPricePolicy {
    /// Mid is absent unless both best bid and best ask exist
    #[default]
    BookOnly,
    /// Fall back to the last trade price when the book has no two-sided quote
    LastTradeFallback,
}

impl MidPricePolicy {
    pub fn mid(self, best_bid: Option<f64>, best_ask: Option<f64>, last_trade: Option<f64>) -> Option<f64> {
        match (best_bid, best_ask) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => match self {
                MidPricePolicy::BookOnly => None,
                MidPricePolicy::LastTradeFallback => last_trade,
            },
        }
    }
}

/// Latest observed book and trade state for one instrument.
///
/// Replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub market_slug: String,
    pub question: String,
    pub outcome: String,
    pub token_id: String,
    pub best_bid: Option<f64>,
    pub best_ask: Option<f64>,
    pub best_bid_shares: Option<f64>,
    pub best_ask_shares: Option<f64>,
    pub mid_price: Option<f64>,
    pub last_trade_price: Option<f64>,
    pub bid_levels: usize,
    pub ask_levels: usize,
    /// Book timestamp reported by the CLOB, in milliseconds
    pub timestamp_ms: Option<u64>,
    pub top_bids: Vec<OrderLevel>,
    pub top_asks: Vec<OrderLevel>,
}

/// Raw inputs a snapshot is built from
#[derive(Debug, Clone, Copy)]
pub struct BookInput<'a> {
    pub bids: &'a [PriceLevel],
    pub asks: &'a [PriceLevel],
    pub timestamp: &'a Value,
    pub last_trade_price: Option<f64>,
}

impl Snapshot {
    /// Build a snapshot keeping `depth` levels per side
    pub fn build(
        target: &InstrumentTarget,
        input: BookInput<'_>,
        depth: usize,
        policy: MidPricePolicy,
    ) -> Self {
        let mut bids = BookSide::Bid.parse_levels(input.bids);
        let mut asks = BookSide::Ask.parse_levels(input.asks);

        let best_bid = bids.first().copied();
        let best_ask = asks.first().copied();
        let best_bid_price = best_bid.map(|l| l.price);
        let best_ask_price = best_ask.map(|l| l.price);

        let bid_levels = bids.len();
        let ask_levels = asks.len();
        bids.truncate(depth);
        asks.truncate(depth);

        Self {
            market_slug: target.market_slug.clone(),
            question: target.question.clone(),
            outcome: target.outcome.clone(),
            token_id: target.token_id.clone(),
            best_bid: best_bid_price,
            best_ask: best_ask_price,
            best_bid_shares: best_bid.map(|l| l.shares),
            best_ask_shares: best_ask.map(|l| l.shares),
            mid_price: policy.mid(best_bid_price, best_ask_price, input.last_trade_price),
            last_trade_price: input.last_trade_price,
            bid_levels,
            ask_levels,
            timestamp_ms: parse_timestamp(input.timestamp),
            top_bids: bids,
            top_asks: asks,
        }
    }

    /// Notional resting at the best bid
    pub fn best_bid_notional(&self) -> Option<f64> {
        Some(self.best_bid? * self.best_bid_shares?)
    }

    /// Notional resting at the best ask
    pub fn best_ask_notional(&self) -> Option<f64> {
        Some(self.best_ask? * self.best_ask_shares?)
    }
}

/// Book timestamps are only trusted when they are non-negative integers
fn parse_timestamp(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s.parse().ok(),
        _ => None,
    }
}
