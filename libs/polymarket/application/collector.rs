//! Snapshot collector loop
//!
//! Two cadences share one loop: discovery refreshes the tracked set on the
//! slow interval (or whenever the set is empty), and every tick fans out one
//! snapshot fetch per tracked instrument.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, error, info, warn};

use super::discovery::{DiscoveredTargets, MarketDiscovery};
use super::fetcher::{FetchOutcome, SnapshotFetcher};
use super::store::SnapshotStore;
use crate::domain::{distinct_market_groups, InstrumentTarget};
use crate::infrastructure::client::QuoteSource;
use crate::infrastructure::config::{CollectorConfig, MarketSelection};
use crate::utils::{Heartbeat, ShutdownManager};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(300);

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Discovery was due and failed; the previous set is kept and nothing is fetched
    DiscoveryFailed,
    /// Nothing to poll this tick
    NoTargets,
    Polled {
        fetched: usize,
        transient: usize,
        retired: usize,
    },
}

pub struct SnapshotCollector<S> {
    discovery: MarketDiscovery<S>,
    fetcher: SnapshotFetcher<S>,
    store: Arc<SnapshotStore>,
    targets: Vec<InstrumentTarget>,
    last_discovery: Option<Instant>,
    poll_interval: Duration,
    discovery_interval: Duration,
}

impl<S: QuoteSource> SnapshotCollector<S> {
    pub fn new(source: Arc<S>, config: &CollectorConfig, store: Arc<SnapshotStore>) -> Self {
        let discovery = MarketDiscovery::new(
            Arc::clone(&source),
            config.selection.clone(),
            config.max_market_groups,
            config.list_markets_limit,
        );
        let fetcher = SnapshotFetcher::new(source, config.orderbook_levels, config.mid_price_policy);

        Self {
            discovery,
            fetcher,
            store,
            targets: Vec::new(),
            last_discovery: None,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            discovery_interval: Duration::from_secs(config.discovery_interval_secs),
        }
    }

    /// Currently tracked instruments
    pub fn targets(&self) -> &[InstrumentTarget] {
        &self.targets
    }

    /// Run ticks until shutdown
    pub async fn run(&mut self, shutdown: &ShutdownManager) {
        if let MarketSelection::Rolling {
            base_slug,
            step_secs,
        } = self.discovery.selection()
        {
            info!(
                "Rolling slug mode enabled: base={} step={}s",
                base_slug, step_secs
            );
        }

        let mut heartbeat = Heartbeat::new(HEARTBEAT_INTERVAL);

        while shutdown.is_running() {
            let outcome = self.tick().await;
            debug!("Tick finished: {:?}", outcome);

            if heartbeat.due() {
                info!(
                    "Heartbeat: tracking {} instruments, {} snapshots stored",
                    self.targets.len(),
                    self.store.len()
                );
            }

            shutdown.interruptible_sleep(self.poll_interval).await;
        }

        info!("Collector stopped");
    }

    /// One loop iteration: refresh discovery when due, then poll
    pub async fn tick(&mut self) -> TickOutcome {
        let now = Instant::now();
        let refresh_due = self.targets.is_empty()
            || self
                .last_discovery
                .map_or(true, |at| now.duration_since(at) >= self.discovery_interval);

        if refresh_due {
            match self.discovery.discover().await {
                Ok(found) => self.apply_discovery(found, now),
                Err(e) => {
                    error!("Failed to refresh active markets: {}", e);
                    return TickOutcome::DiscoveryFailed;
                }
            }
        }

        if self.targets.is_empty() {
            warn!("No active tokens available. Retrying...");
            return TickOutcome::NoTargets;
        }

        self.poll_targets().await
    }

    fn apply_discovery(&mut self, found: DiscoveredTargets, at: Instant) {
        if let Some(candidates) = &found.exhausted_candidates {
            warn!(
                "No active market found for rolling slug candidates: {}",
                candidates.join(", ")
            );
        }

        self.targets = found.targets;
        self.last_discovery = Some(at);

        let token_ids = self.targets.iter().map(|t| t.token_id.clone()).collect();
        let evicted = self.store.replace_tracked(token_ids);
        if evicted > 0 {
            debug!("Evicted {} snapshots no longer tracked", evicted);
        }

        info!(
            "Tracking {} token outcomes across {} markets ({})",
            self.targets.len(),
            distinct_market_groups(&self.targets),
            self.discovery.selection()
        );
    }

    async fn poll_targets(&mut self) -> TickOutcome {
        let outcomes = join_all(self.targets.iter().map(|t| self.fetcher.fetch(t))).await;

        let mut fetched = 0;
        let mut transient = 0;
        let mut retired = HashSet::new();

        for outcome in outcomes {
            match outcome {
                FetchOutcome::Fetched(snapshot) => {
                    self.store.upsert(snapshot);
                    fetched += 1;
                }
                FetchOutcome::Retired(token_id) => {
                    retired.insert(token_id);
                }
                FetchOutcome::Transient => transient += 1,
            }
        }

        if !retired.is_empty() {
            self.targets.retain(|t| !retired.contains(&t.token_id));
            self.store.retire(&retired);
            info!(
                "Temporarily skipped {} unavailable token(s) until next market refresh.",
                retired.len()
            );
        }

        TickOutcome::Polled {
            fetched,
            transient,
            retired: retired.len(),
        }
    }
}
