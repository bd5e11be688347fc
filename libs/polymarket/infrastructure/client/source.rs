//! Quote source abstraction
//!
//! Discovery and snapshot fetching only need three remote calls. They are
//! behind [`QuoteSource`] so the collector can run against the live APIs or
//! an in-memory source.

use async_trait::async_trait;

use super::clob::{LastTradePrice, OrderBook, RestClient, RestError};
use super::gamma::{GammaClient, GammaError, GammaFilters, GammaMarket};

/// Remote market data the collector consumes
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// List markets matching `filters` (single page)
    async fn list_markets(&self, filters: &GammaFilters) -> Result<Vec<GammaMarket>, GammaError>;

    /// Current order book for a token
    async fn order_book(&self, token_id: &str) -> Result<OrderBook, RestError>;

    /// Last traded price for a token
    async fn last_trade_price(&self, token_id: &str) -> Result<LastTradePrice, RestError>;
}

/// [`QuoteSource`] backed by the Gamma and CLOB REST APIs
pub struct PolymarketQuoteClient {
    gamma: GammaClient,
    clob: RestClient,
}

impl PolymarketQuoteClient {
    pub fn new(gamma: GammaClient, clob: RestClient) -> Self {
        Self { gamma, clob }
    }

    /// Build both clients with their default timeouts
    pub fn from_urls(gamma_url: &str, clob_url: &str) -> anyhow::Result<Self> {
        Ok(Self::new(GammaClient::new(gamma_url)?, RestClient::new(clob_url)?))
    }
}

#[async_trait]
impl QuoteSource for PolymarketQuoteClient {
    async fn list_markets(&self, filters: &GammaFilters) -> Result<Vec<GammaMarket>, GammaError> {
        self.gamma.list_markets(filters).await
    }

    async fn order_book(&self, token_id: &str) -> Result<OrderBook, RestError> {
        self.clob.get_orderbook(token_id).await
    }

    async fn last_trade_price(&self, token_id: &str) -> Result<LastTradePrice, RestError> {
        self.clob.get_last_trade_price(token_id).await
    }
}
