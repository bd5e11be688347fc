//! Gamma API client and types
//!
//! The Gamma API provides market listings and metadata.

pub mod client;
pub mod types;

pub use client::{GammaClient, GammaError};

// Re-export types with Gamma prefix
pub use types::Market as GammaMarket;
pub use types::{GammaFilters, MarketDecodeError, MarketRecord};
