//! Infrastructure Layer
//!
//! Contains implementations of external interfaces (API clients, config, logging).
//! This layer depends on the domain layer but not on the application layer.

pub mod client;
pub mod config;
pub mod credentials;
pub mod logging;

// Re-export commonly used types from client
pub use client::{
    clob::{LastTradePrice, OrderBook, PriceLevel, RestClient, RestError},
    gamma::{GammaClient, GammaError, GammaFilters, GammaMarket, MarketDecodeError, MarketRecord},
    PolymarketQuoteClient, QuoteSource,
};

// Re-export config types
pub use config::{CollectorConfig, ConfigError, ConfigSource, MarketSelection};

pub use credentials::{detect_credential_mode, CredentialMode};
pub use logging::init_tracing_with_level;
