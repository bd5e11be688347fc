//! Domain Layer
//!
//! Contains pure business entities and domain models.
//! This layer has no dependencies on infrastructure or application layers.

pub mod orderbook;
pub mod rolling;
pub mod snapshot;
pub mod target;

// Re-export domain entities
pub use orderbook::{parse_decimal, BookSide, OrderLevel, PriceLevel};
pub use rolling::{rolling_slug_candidates_at, RollingSlug};
pub use snapshot::{BookInput, MidPricePolicy, Snapshot};
pub use target::{distinct_market_groups, InstrumentTarget};
