//! Polymarket API clients
//!
//! Provides clients for both the Gamma API (market listings) and the CLOB API
//! (order books), plus the [`QuoteSource`] seam over them.

pub mod clob;
pub mod gamma;
pub mod source;

#[cfg(test)]
pub(crate) mod canned_http;

pub use clob::{LastTradePrice, OrderBook, PriceLevel, RestClient, RestError};
pub use gamma::{GammaClient, GammaError, GammaFilters, GammaMarket, MarketDecodeError, MarketRecord};
pub use source::{PolymarketQuoteClient, QuoteSource};
