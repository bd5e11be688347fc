//! Market discovery
//!
//! Decides which instruments the collector polls. Two modes:
//! - filter: broad listing of open markets, keyword match on question/slug
//! - rolling: query the candidate slugs of a rolling market family and keep
//!   the first live instance only

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{distinct_market_groups, rolling_slug_candidates_at, InstrumentTarget};
use crate::infrastructure::client::gamma::{GammaError, GammaFilters, GammaMarket, MarketRecord};
use crate::infrastructure::client::QuoteSource;
use crate::infrastructure::config::MarketSelection;

/// Page size when looking up a single rolling slug
const SLUG_LOOKUP_LIMIT: usize = 5;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Market listing failed: {0}")]
    Listing(#[from] GammaError),
}

/// Result of one discovery pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveredTargets {
    pub targets: Vec<InstrumentTarget>,
    /// Set when rolling mode tried every candidate without finding a live market
    pub exhausted_candidates: Option<Vec<String>>,
}

impl DiscoveredTargets {
    fn found(targets: Vec<InstrumentTarget>) -> Self {
        Self {
            targets,
            exhausted_candidates: None,
        }
    }

    fn exhausted(candidates: Vec<String>) -> Self {
        Self {
            targets: Vec::new(),
            exhausted_candidates: Some(candidates),
        }
    }
}

pub struct MarketDiscovery<S> {
    source: Arc<S>,
    selection: MarketSelection,
    max_market_groups: usize,
    list_limit: usize,
}

impl<S: QuoteSource> MarketDiscovery<S> {
    pub fn new(
        source: Arc<S>,
        selection: MarketSelection,
        max_market_groups: usize,
        list_limit: usize,
    ) -> Self {
        Self {
            source,
            selection,
            max_market_groups,
            list_limit,
        }
    }

    pub fn selection(&self) -> &MarketSelection {
        &self.selection
    }

    /// Resolve the current set of instruments
    pub async fn discover(&self) -> Result<DiscoveredTargets, DiscoveryError> {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        self.discover_at(now).await
    }

    /// Resolve the current set of instruments as of `now` (Unix seconds)
    pub async fn discover_at(&self, now: u64) -> Result<DiscoveredTargets, DiscoveryError> {
        match &self.selection {
            MarketSelection::Rolling {
                base_slug,
                step_secs,
            } => {
                let candidates = rolling_slug_candidates_at(base_slug, *step_secs, now);
                self.discover_rolling(candidates).await
            }
            MarketSelection::Filter { keyword } => self.discover_filtered(keyword).await,
        }
    }

    async fn discover_rolling(
        &self,
        candidates: Vec<String>,
    ) -> Result<DiscoveredTargets, DiscoveryError> {
        for candidate in &candidates {
            let markets = self
                .source
                .list_markets(&GammaFilters::by_slug(candidate.clone(), SLUG_LOOKUP_LIMIT))
                .await?;

            let live = decode_markets(&markets).into_iter().find(|record| {
                record.is_live()
                    && record
                        .slug
                        .as_deref()
                        .is_some_and(|slug| candidates.iter().any(|c| c.eq_ignore_ascii_case(slug)))
            });

            if let Some(record) = live {
                debug!("Rolling candidate {} is live", candidate);
                // One market only: never mix adjacent windows
                let targets = expand_market(&record);
                if targets.is_empty() {
                    break;
                }
                return Ok(DiscoveredTargets::found(targets));
            }
        }

        Ok(DiscoveredTargets::exhausted(candidates))
    }

    async fn discover_filtered(&self, keyword: &str) -> Result<DiscoveredTargets, DiscoveryError> {
        let markets = self
            .source
            .list_markets(&GammaFilters::open_markets(self.list_limit))
            .await?;

        let mut selected = Vec::new();
        for record in decode_markets(&markets) {
            if !record.matches_keyword(keyword) {
                continue;
            }
            let targets = expand_market(&record);
            if targets.is_empty() {
                continue;
            }
            selected.extend(targets);

            if distinct_market_groups(&selected) >= self.max_market_groups {
                break;
            }
        }

        if selected.is_empty() && !markets.is_empty() {
            warn!(
                "No markets matched filter {:?}; falling back to the first {} listed markets",
                keyword, self.max_market_groups
            );
            let head = &markets[..markets.len().min(self.max_market_groups)];
            selected = decode_markets(head).iter().flat_map(expand_market).collect();
        }

        Ok(DiscoveredTargets::found(selected))
    }
}

/// Validate raw markets, skipping the ones that fail to decode
fn decode_markets(markets: &[GammaMarket]) -> Vec<MarketRecord> {
    markets
        .iter()
        .filter_map(|market| match MarketRecord::try_from(market) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(
                    "Skipping undecodable market {}: {}",
                    market.slug.as_deref().unwrap_or("<no slug>"),
                    e
                );
                None
            }
        })
        .collect()
}

/// One target per token id; missing outcome labels become `outcome-{n}`.
/// Markets without token ids expand to nothing.
pub fn expand_market(record: &MarketRecord) -> Vec<InstrumentTarget> {
    let group_id = record.group_id();

    record
        .token_ids
        .iter()
        .enumerate()
        .map(|(idx, token_id)| {
            let outcome = record
                .outcomes
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("outcome-{}", idx + 1));
            InstrumentTarget::new(group_id.clone(), record.question.clone(), outcome, token_id.clone())
        })
        .collect()
}
