//! CLOB (Central Limit Order Book) API client and types
//!
//! Read-only REST access to order books and trade prices.

pub mod helpers;
pub mod rest;
pub mod types;

pub use rest::{RestClient, RestError};
pub use types::*;
