use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Re-export PriceLevel from domain
pub use crate::domain::orderbook::PriceLevel;
use crate::domain::orderbook::parse_decimal;

/// Order book for a token, as returned by `GET /book`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBook {
    #[serde(default)]
    pub market: Option<String>,

    #[serde(default)]
    pub asset_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub bids: Vec<PriceLevel>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub asks: Vec<PriceLevel>,

    /// Milliseconds, usually a decimal string
    #[serde(default)]
    pub timestamp: Value,

    #[serde(default)]
    pub hash: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<PriceLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<PriceLevel>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of `GET /last-trade-price`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LastTradePrice {
    #[serde(default)]
    pub price: Value,

    #[serde(default)]
    pub side: Option<String>,
}

impl LastTradePrice {
    pub fn price_f64(&self) -> Option<f64> {
        parse_decimal(&self.price)
    }
}
