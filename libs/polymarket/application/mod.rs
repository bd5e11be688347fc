//! Application Layer
//!
//! Collector use cases: discovery, snapshot fetching, the state store and
//! the monitor. Depends on the domain and infrastructure layers.

pub mod collector;
pub mod discovery;
pub mod fetcher;
pub mod monitor;
pub mod store;

pub use collector::{SnapshotCollector, TickOutcome};
pub use discovery::{expand_market, DiscoveredTargets, DiscoveryError, MarketDiscovery};
pub use fetcher::{FetchOutcome, SnapshotFetcher};
pub use monitor::{format_ladder, format_summary, SnapshotMonitor};
pub use store::{SnapshotStore, SnapshotView};
