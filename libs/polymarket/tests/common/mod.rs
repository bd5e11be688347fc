//! Common test utilities for collector integration tests
//!
//! [`FakeQuoteSource`] is an in-memory [`QuoteSource`] with scripted answers
//! and call counters.

#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use polymarket::infrastructure::{
    GammaError, GammaFilters, GammaMarket, LastTradePrice, OrderBook, PriceLevel, QuoteSource,
    RestError,
};

/// Scripted answer for a token's book endpoint
#[derive(Debug, Clone)]
pub enum BookScript {
    Book(OrderBook),
    NotFound,
    Failing,
}

/// Scripted answer for a token's last-trade-price endpoint.
/// Unscripted tokens answer with a null price.
#[derive(Debug, Clone, Copy)]
pub enum LastTradeScript {
    Price(f64),
    NotFound,
    Failing,
}

#[derive(Default)]
struct State {
    open_markets: Vec<GammaMarket>,
    slug_markets: HashMap<String, Vec<GammaMarket>>,
    listing_fails: bool,
    books: HashMap<String, BookScript>,
    last_trades: HashMap<String, LastTradeScript>,
    listed_slugs: Vec<String>,
    broad_listings: usize,
    book_calls: HashMap<String, usize>,
}

#[derive(Default)]
pub struct FakeQuoteSource {
    state: Mutex<State>,
}

impl FakeQuoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer for the broad `active=true&closed=false` listing
    pub fn set_open_markets(&self, markets: Vec<GammaMarket>) {
        self.state.lock().open_markets = markets;
    }

    /// Answer for a `slug=` lookup
    pub fn set_slug_markets(&self, slug: &str, markets: Vec<GammaMarket>) {
        self.state.lock().slug_markets.insert(slug.to_string(), markets);
    }

    pub fn set_listing_fails(&self, fails: bool) {
        self.state.lock().listing_fails = fails;
    }

    pub fn set_book(&self, token_id: &str, bids: &[(&str, &str)], asks: &[(&str, &str)]) {
        let book = OrderBook {
            asset_id: Some(token_id.to_string()),
            bids: levels(bids),
            asks: levels(asks),
            timestamp: json!("1700000000000"),
            ..Default::default()
        };
        self.script_book(token_id, BookScript::Book(book));
    }

    pub fn script_book(&self, token_id: &str, script: BookScript) {
        self.state.lock().books.insert(token_id.to_string(), script);
    }

    pub fn set_last_trade(&self, token_id: &str, price: f64) {
        self.script_last_trade(token_id, LastTradeScript::Price(price));
    }

    pub fn script_last_trade(&self, token_id: &str, script: LastTradeScript) {
        self.state.lock().last_trades.insert(token_id.to_string(), script);
    }

    pub fn book_calls(&self, token_id: &str) -> usize {
        self.state.lock().book_calls.get(token_id).copied().unwrap_or(0)
    }

    pub fn broad_listings(&self) -> usize {
        self.state.lock().broad_listings
    }

    /// Slugs looked up so far, in call order
    pub fn listed_slugs(&self) -> Vec<String> {
        self.state.lock().listed_slugs.clone()
    }
}

#[async_trait]
impl QuoteSource for FakeQuoteSource {
    async fn list_markets(&self, filters: &GammaFilters) -> Result<Vec<GammaMarket>, GammaError> {
        let mut state = self.state.lock();
        if state.listing_fails {
            return Err(GammaError::ApiError("HTTP 503: unavailable".to_string()));
        }

        match &filters.slug {
            Some(slug) => {
                state.listed_slugs.push(slug.clone());
                Ok(state.slug_markets.get(slug).cloned().unwrap_or_default())
            }
            None => {
                state.broad_listings += 1;
                let limit = filters.limit.unwrap_or(usize::MAX);
                Ok(state.open_markets.iter().take(limit).cloned().collect())
            }
        }
    }

    async fn order_book(&self, token_id: &str) -> Result<OrderBook, RestError> {
        let mut state = self.state.lock();
        *state.book_calls.entry(token_id.to_string()).or_insert(0) += 1;

        match state.books.get(token_id) {
            Some(BookScript::Book(book)) => Ok(book.clone()),
            Some(BookScript::NotFound) => Err(RestError::NotFound(format!("book {}", token_id))),
            Some(BookScript::Failing) | None => {
                Err(RestError::ApiError("HTTP 500: internal error".to_string()))
            }
        }
    }

    async fn last_trade_price(&self, token_id: &str) -> Result<LastTradePrice, RestError> {
        let state = self.state.lock();
        match state.last_trades.get(token_id) {
            Some(LastTradeScript::Price(price)) => Ok(LastTradePrice {
                price: json!(price.to_string()),
                side: None,
            }),
            Some(LastTradeScript::NotFound) => Err(RestError::NotFound(format!(
                "last trade price for token {}",
                token_id
            ))),
            Some(LastTradeScript::Failing) => {
                Err(RestError::ApiError("HTTP 502: bad gateway".to_string()))
            }
            None => Ok(LastTradePrice::default()),
        }
    }
}

fn levels(raw: &[(&str, &str)]) -> Vec<PriceLevel> {
    raw.iter().map(|(p, s)| PriceLevel::new(*p, *s)).collect()
}

pub mod fixtures {
    //! Gamma market fixtures in wire shape (JSON-encoded list fields)

    use polymarket::infrastructure::GammaMarket;
    use serde_json::json;

    pub fn market(slug: &str, question: &str, token_ids: &[&str], outcomes: &[&str]) -> GammaMarket {
        raw_market(json!({
            "id": "1",
            "slug": slug,
            "question": question,
            "active": true,
            "closed": false,
            "clobTokenIds": serde_json::to_string(token_ids).unwrap(),
            "outcomes": serde_json::to_string(outcomes).unwrap(),
        }))
    }

    /// Two-outcome Up/Down market with tokens `{slug}-up` and `{slug}-down`
    pub fn up_down_market(slug: &str) -> GammaMarket {
        let up = format!("{}-up", slug);
        let down = format!("{}-down", slug);
        market(slug, &format!("{} Up or Down?", slug), &[&up, &down], &["Up", "Down"])
    }

    pub fn closed_market(slug: &str) -> GammaMarket {
        let mut market = up_down_market(slug);
        market.closed = Some(true);
        market
    }

    pub fn raw_market(value: serde_json::Value) -> GammaMarket {
        serde_json::from_value(value).unwrap()
    }
}
