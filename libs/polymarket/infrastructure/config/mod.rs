use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::MidPricePolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Environment variables that override the YAML file
pub mod env_keys {
    pub const MARKET_FILTER: &str = "MARKET_FILTER";
    pub const TARGET_MARKET_SLUG: &str = "TARGET_MARKET_SLUG";
    pub const SLUG_STEP_SECONDS: &str = "SLUG_STEP_SECONDS";
    pub const ORDERBOOK_LEVELS: &str = "ORDERBOOK_LEVELS";
    pub const SHOW_ORDERBOOK_LEVELS: &str = "SHOW_ORDERBOOK_LEVELS";
}

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Which markets the collector tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MarketSelection {
    /// Every open market whose question or slug contains `keyword`
    Filter {
        #[serde(default)]
        keyword: String,
    },
    /// The live instance of a self-rolling market family
    Rolling {
        base_slug: String,
        #[serde(default = "default_slug_step")]
        step_secs: u64,
    },
}

impl Default for MarketSelection {
    fn default() -> Self {
        MarketSelection::Filter {
            keyword: "btc".to_string(),
        }
    }
}

impl std::fmt::Display for MarketSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketSelection::Filter { keyword } => write!(f, "filter={:?}", keyword),
            MarketSelection::Rolling { base_slug, step_secs } => {
                write!(f, "rolling_slug={} step={}s", base_slug, step_secs)
            }
        }
    }
}

/// Snapshot collector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_gamma_api_url")]
    pub gamma_api_url: String,
    #[serde(default = "default_clob_api_url")]
    pub clob_api_url: String,
    /// Fast cadence: one snapshot fan-out per tick
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Slow cadence: market discovery refresh
    #[serde(default = "default_discovery_interval")]
    pub discovery_interval_secs: u64,
    /// Maximum number of distinct markets to track
    #[serde(default = "default_max_market_groups")]
    pub max_market_groups: usize,
    /// Page size of the broad market listing in filter mode
    #[serde(default = "default_list_markets_limit")]
    pub list_markets_limit: usize,
    #[serde(default)]
    pub selection: MarketSelection,
    /// Depth levels kept per side in each snapshot
    #[serde(default = "default_orderbook_levels")]
    pub orderbook_levels: usize,
    #[serde(default = "default_true")]
    pub show_orderbook_levels: bool,
    #[serde(default)]
    pub mid_price_policy: MidPricePolicy,
    /// Snapshots printed per monitor pass
    #[serde(default = "default_monitor_max_rows")]
    pub monitor_max_rows: usize,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where [`CollectorConfig::load_or_default`] took its values from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file was missing
    Defaults,
}

impl ConfigSource {
    pub fn log(self, path: &Path) {
        match self {
            ConfigSource::File => info!("Config file: {}", path.display()),
            ConfigSource::Defaults => {
                warn!("Config file {} not found, using defaults", path.display())
            }
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            gamma_api_url: default_gamma_api_url(),
            clob_api_url: default_clob_api_url(),
            poll_interval_secs: default_poll_interval(),
            discovery_interval_secs: default_discovery_interval(),
            max_market_groups: default_max_market_groups(),
            list_markets_limit: default_list_markets_limit(),
            selection: MarketSelection::default(),
            orderbook_levels: default_orderbook_levels(),
            show_orderbook_levels: true,
            mid_price_policy: MidPricePolicy::default(),
            monitor_max_rows: default_monitor_max_rows(),
            log_level: default_log_level(),
        }
    }
}

impl CollectorConfig {
    /// Load configuration from YAML file, then apply environment overrides
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let config: CollectorConfig = serde_yaml::from_str(&yaml_content)?;
        config.finish(|key| std::env::var(key).ok())
    }

    /// Like [`CollectorConfig::load`], but a missing file means defaults.
    ///
    /// Nothing is logged here since tracing is usually not up yet; the
    /// returned [`ConfigSource`] says where the values came from.
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<(Self, ConfigSource)> {
        let path = config_path.as_ref();
        if path.exists() {
            return Ok((Self::load(path)?, ConfigSource::File));
        }
        let config = Self::default().finish(|key| std::env::var(key).ok())?;
        Ok((config, ConfigSource::Defaults))
    }

    fn finish(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        self.apply_env_overrides(lookup)?;
        self.normalize();
        self.validate()?;
        Ok(self)
    }

    /// Apply `MARKET_FILTER`, `TARGET_MARKET_SLUG`, `SLUG_STEP_SECONDS`,
    /// `ORDERBOOK_LEVELS` and `SHOW_ORDERBOOK_LEVELS`.
    ///
    /// A non-empty `TARGET_MARKET_SLUG` selects rolling mode over any filter.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let step_override = match non_empty(lookup(env_keys::SLUG_STEP_SECONDS)) {
            Some(raw) => Some(parse_number::<u64>(env_keys::SLUG_STEP_SECONDS, &raw)?),
            None => None,
        };

        if let Some(slug) = non_empty(lookup(env_keys::TARGET_MARKET_SLUG)) {
            let step_secs = match &self.selection {
                MarketSelection::Rolling { step_secs, .. } => *step_secs,
                MarketSelection::Filter { .. } => default_slug_step(),
            };
            self.selection = MarketSelection::Rolling {
                base_slug: slug,
                step_secs,
            };
        } else if let Some(keyword) = lookup(env_keys::MARKET_FILTER) {
            self.selection = MarketSelection::Filter { keyword };
        }

        if let (Some(step), MarketSelection::Rolling { step_secs, .. }) =
            (step_override, &mut self.selection)
        {
            *step_secs = step;
        }

        if let Some(raw) = non_empty(lookup(env_keys::ORDERBOOK_LEVELS)) {
            self.orderbook_levels = parse_number(env_keys::ORDERBOOK_LEVELS, &raw)?;
        }

        if let Some(raw) = lookup(env_keys::SHOW_ORDERBOOK_LEVELS) {
            self.show_orderbook_levels = raw.trim() != "0";
        }

        Ok(())
    }

    /// Trim and lower-case operator supplied identifiers
    fn normalize(&mut self) {
        match &mut self.selection {
            MarketSelection::Filter { keyword } => *keyword = keyword.trim().to_lowercase(),
            MarketSelection::Rolling { base_slug, .. } => {
                *base_slug = base_slug.trim().to_lowercase()
            }
        }
        self.log_level = self.log_level.trim().to_lowercase();
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.discovery_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "discovery_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.max_market_groups == 0 {
            return Err(ConfigError::ValidationError(
                "max_market_groups must be greater than 0".to_string(),
            ));
        }

        if self.list_markets_limit == 0 {
            return Err(ConfigError::ValidationError(
                "list_markets_limit must be greater than 0".to_string(),
            ));
        }

        if let MarketSelection::Rolling { base_slug, .. } = &self.selection {
            if base_slug.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "rolling selection requires a base_slug".to_string(),
                ));
            }
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  Gamma API: {}", self.gamma_api_url);
        info!("  CLOB API: {}", self.clob_api_url);
        info!("  Selection: {}", self.selection);
        info!("  Poll interval: {} seconds", self.poll_interval_secs);
        info!("  Discovery interval: {} seconds", self.discovery_interval_secs);
        info!("  Max market groups: {}", self.max_market_groups);
        info!(
            "  Orderbook levels: {} (shown: {})",
            self.orderbook_levels, self.show_orderbook_levels
        );
        info!("  Mid price policy: {:?}", self.mid_price_policy);
        info!("  Log level: {}", self.log_level);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("{} must be a non-negative integer, got {:?}", key, raw)))
}

fn default_gamma_api_url() -> String {
    "https://gamma-api.polymarket.com".to_string()
}

fn default_clob_api_url() -> String {
    "https://clob.polymarket.com".to_string()
}

fn default_poll_interval() -> u64 {
    5
}

fn default_discovery_interval() -> u64 {
    120
}

fn default_max_market_groups() -> usize {
    6
}

fn default_list_markets_limit() -> usize {
    100
}

fn default_slug_step() -> u64 {
    900
}

fn default_orderbook_levels() -> usize {
    4
}

fn default_monitor_max_rows() -> usize {
    8
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
