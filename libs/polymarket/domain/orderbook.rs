//! Orderbook domain entities
//!
//! Raw price levels as they arrive from the CLOB and the normalized,
//! sorted ladders built from them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Price Level - Basic unit of orderbook
// =============================================================================

/// Price level in order book, as sent by the CLOB.
///
/// Both fields are kept as raw JSON because the API sends decimal strings,
/// but numbers are accepted too.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceLevel {
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub size: Value,
}

impl PriceLevel {
    pub fn new(price: impl Into<Value>, size: impl Into<Value>) -> Self {
        Self {
            price: price.into(),
            size: size.into(),
        }
    }

    pub fn price_f64(&self) -> Option<f64> {
        parse_decimal(&self.price)
    }

    pub fn size_f64(&self) -> Option<f64> {
        parse_decimal(&self.size)
    }
}

/// Parse a JSON string or number into a finite float
pub fn parse_decimal(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

// =============================================================================
// OrderLevel - Normalized level with notional
// =============================================================================

/// One normalized level of a book side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderLevel {
    pub price: f64,
    pub shares: f64,
    /// price * shares
    pub notional: f64,
    /// Notional of this level plus every better level
    pub cumulative_notional: f64,
}

/// Which side of the book a ladder belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSide {
    Bid,
    Ask,
}

impl BookSide {
    /// Parse raw levels into a sorted ladder with running notional.
    ///
    /// Levels whose price or size is not numeric are dropped. Bids sort
    /// descending, asks ascending. The sort is stable, so levels sharing
    /// a price keep their input order and are not merged.
    pub fn parse_levels(self, levels: &[PriceLevel]) -> Vec<OrderLevel> {
        let mut parsed: Vec<(f64, f64)> = levels
            .iter()
            .filter_map(|level| Some((level.price_f64()?, level.size_f64()?)))
            .collect();

        match self {
            BookSide::Bid => parsed.sort_by(|a, b| b.0.total_cmp(&a.0)),
            BookSide::Ask => parsed.sort_by(|a, b| a.0.total_cmp(&b.0)),
        }

        let mut cumulative = 0.0;
        parsed
            .into_iter()
            .map(|(price, shares)| {
                let notional = price * shares;
                cumulative += notional;
                OrderLevel {
                    price,
                    shares,
                    notional,
                    cumulative_notional: cumulative,
                }
            })
            .collect()
    }
}
