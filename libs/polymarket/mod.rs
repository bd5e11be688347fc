//! Polymarket snapshot collection
//!
//! Discovers markets on the Gamma API and keeps the latest order book
//! snapshot per outcome token from the CLOB API.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod utils;

// Re-export commonly used items
pub use application::{
    DiscoveredTargets, DiscoveryError, FetchOutcome, MarketDiscovery, SnapshotCollector,
    SnapshotFetcher, SnapshotMonitor, SnapshotStore, SnapshotView, TickOutcome,
};
pub use domain::{InstrumentTarget, MidPricePolicy, OrderLevel, Snapshot};
pub use infrastructure::{
    detect_credential_mode, init_tracing_with_level, CollectorConfig, ConfigError,
    ConfigSource, CredentialMode, GammaClient, GammaError, GammaFilters, GammaMarket,
    LastTradePrice, MarketSelection, OrderBook, PolymarketQuoteClient, PriceLevel, QuoteSource,
    RestClient, RestError,
};
pub use utils::{Heartbeat, ShutdownManager};
