//! Market data query methods for RestClient

use super::super::helpers::{parse_json, require_success};
use super::super::types::*;
use super::{RestClient, Result};
use tracing::debug;

impl RestClient {
    /// Get orderbook for a specific token
    pub async fn get_orderbook(&self, token_id: &str) -> Result<OrderBook> {
        let url = format!("{}/book", self.base_url);

        debug!("Fetching orderbook for token {} from {}", token_id, url);

        let response = self
            .client
            .get(&url)
            .query(&[("token_id", token_id)])
            .send()
            .await?;
        let response = require_success(
            response,
            "Failed to fetch orderbook",
            &format!("orderbook for token {}", token_id),
        )
        .await?;

        parse_json(response).await
    }

    /// Get the last traded price for a specific token
    pub async fn get_last_trade_price(&self, token_id: &str) -> Result<LastTradePrice> {
        let url = format!("{}/last-trade-price", self.base_url);

        debug!("Fetching last trade price for token {}", token_id);

        let response = self
            .client
            .get(&url)
            .query(&[("token_id", token_id)])
            .send()
            .await?;
        let response = require_success(
            response,
            "Failed to fetch last trade price",
            &format!("last trade price for token {}", token_id),
        )
        .await?;

        parse_json(response).await
    }
}
