//! Polymarket Snapshot Collector - Main Library
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, banners)
//! - **polymarket**: Discovery, snapshot collection and monitoring (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use polymarket_snapshot_collector::bin_common::{load_config_from_env, ConfigType};
//! use polymarket_snapshot_collector::polymarket::application::SnapshotCollector;
//! ```

// Re-export workspace libraries for convenience
pub use polymarket;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod banner;
    pub mod cli;

    pub use banner::{print_banner, print_shutdown};
    pub use cli::{config_type_from_args, load_config_from_env, parse_args, ConfigType};
}
