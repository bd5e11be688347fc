//! Integration tests for the collector tick: discovery refresh, fan-out,
//! retirement and eviction.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::fixtures::up_down_market;
use common::{BookScript, FakeQuoteSource, LastTradeScript};
use polymarket::application::{SnapshotCollector, SnapshotStore, TickOutcome};
use polymarket::infrastructure::{CollectorConfig, MarketSelection};
use polymarket::utils::ShutdownManager;

/// Discovery interval long enough that only the first tick discovers
const NEVER: u64 = 3600;

fn config(discovery_interval_secs: u64) -> CollectorConfig {
    CollectorConfig {
        discovery_interval_secs,
        selection: MarketSelection::Filter {
            keyword: "btc".to_string(),
        },
        ..Default::default()
    }
}

fn setup(
    discovery_interval_secs: u64,
) -> (Arc<FakeQuoteSource>, Arc<SnapshotStore>, SnapshotCollector<FakeQuoteSource>) {
    let source = Arc::new(FakeQuoteSource::new());
    let store = Arc::new(SnapshotStore::new());
    let collector = SnapshotCollector::new(
        Arc::clone(&source),
        &config(discovery_interval_secs),
        Arc::clone(&store),
    );
    (source, store, collector)
}

fn script_up_down(source: &FakeQuoteSource, slug: &str) {
    source.set_book(&format!("{}-up", slug), &[("0.40", "100"), ("0.40", "50")], &[("0.46", "30")]);
    source.set_book(&format!("{}-down", slug), &[("0.54", "30")], &[("0.60", "100")]);
}

#[tokio::test]
async fn test_tick_discovers_and_stores_snapshots() {
    let (source, store, mut collector) = setup(NEVER);
    source.set_open_markets(vec![up_down_market("btc-a")]);
    script_up_down(&source, "btc-a");
    source.set_last_trade("btc-a-up", 0.41);

    let outcome = collector.tick().await;

    assert_eq!(
        outcome,
        TickOutcome::Polled {
            fetched: 2,
            transient: 0,
            retired: 0
        }
    );
    let up = store.get("btc-a-up").unwrap();
    assert_eq!(up.best_bid, Some(0.40));
    assert_eq!(up.best_bid_shares, Some(100.0));
    assert_eq!(up.last_trade_price, Some(0.41));
    assert!((up.mid_price.unwrap() - 0.43).abs() < 1e-12);
    assert_eq!(up.outcome, "Up");
    assert_eq!(store.get("btc-a-down").unwrap().last_trade_price, None);
    assert_eq!(store.tracked_ids(), vec!["btc-a-up".to_string(), "btc-a-down".to_string()]);
}

#[tokio::test]
async fn test_not_found_retires_until_next_refresh() {
    let (source, store, mut collector) = setup(NEVER);
    source.set_open_markets(vec![up_down_market("btc-a")]);
    script_up_down(&source, "btc-a");
    source.script_book("btc-a-down", BookScript::NotFound);

    let outcome = collector.tick().await;
    assert_eq!(
        outcome,
        TickOutcome::Polled {
            fetched: 1,
            transient: 0,
            retired: 1
        }
    );
    assert!(store.get("btc-a-down").is_none());
    assert_eq!(collector.targets().len(), 1);
    assert_eq!(store.tracked_ids(), vec!["btc-a-up".to_string()]);

    collector.tick().await;
    assert_eq!(source.book_calls("btc-a-down"), 1);
    assert_eq!(source.book_calls("btc-a-up"), 2);
}

#[tokio::test]
async fn test_last_trade_not_found_retires_instrument() {
    let (source, store, mut collector) = setup(NEVER);
    source.set_open_markets(vec![up_down_market("btc-a")]);
    script_up_down(&source, "btc-a");
    source.script_last_trade("btc-a-up", LastTradeScript::NotFound);

    let outcome = collector.tick().await;

    assert_eq!(
        outcome,
        TickOutcome::Polled {
            fetched: 1,
            transient: 0,
            retired: 1
        }
    );
    assert!(store.get("btc-a-up").is_none());
    assert_eq!(store.tracked_ids(), vec!["btc-a-down".to_string()]);
}

#[tokio::test]
async fn test_not_found_wins_over_transient_failure() {
    let (source, store, mut collector) = setup(NEVER);
    source.set_open_markets(vec![up_down_market("btc-a")]);
    script_up_down(&source, "btc-a");
    source.script_book("btc-a-up", BookScript::Failing);
    source.script_last_trade("btc-a-up", LastTradeScript::NotFound);
    source.script_book("btc-a-down", BookScript::NotFound);
    source.script_last_trade("btc-a-down", LastTradeScript::Failing);

    let outcome = collector.tick().await;

    assert_eq!(
        outcome,
        TickOutcome::Polled {
            fetched: 0,
            transient: 0,
            retired: 2
        }
    );
    assert!(collector.targets().is_empty());
    assert!(store.tracked_ids().is_empty());
}

#[tokio::test]
async fn test_last_trade_failure_is_transient() {
    let (source, store, mut collector) = setup(NEVER);
    source.set_open_markets(vec![up_down_market("btc-a")]);
    script_up_down(&source, "btc-a");
    collector.tick().await;

    source.script_last_trade("btc-a-down", LastTradeScript::Failing);
    let outcome = collector.tick().await;

    assert_eq!(
        outcome,
        TickOutcome::Polled {
            fetched: 1,
            transient: 1,
            retired: 0
        }
    );
    assert_eq!(collector.targets().len(), 2);
    assert!(store.get("btc-a-down").is_some());
}

#[tokio::test]
async fn test_retired_instrument_returns_after_refresh() {
    let (source, _store, mut collector) = setup(0);
    source.set_open_markets(vec![up_down_market("btc-a")]);
    script_up_down(&source, "btc-a");
    source.script_book("btc-a-down", BookScript::NotFound);

    collector.tick().await;
    assert_eq!(collector.targets().len(), 1);

    script_up_down(&source, "btc-a");
    let outcome = collector.tick().await;

    assert_eq!(
        outcome,
        TickOutcome::Polled {
            fetched: 2,
            transient: 0,
            retired: 0
        }
    );
    assert_eq!(source.book_calls("btc-a-down"), 2);
}

#[tokio::test]
async fn test_transient_failure_keeps_previous_snapshot() {
    let (source, store, mut collector) = setup(NEVER);
    source.set_open_markets(vec![up_down_market("btc-a")]);
    script_up_down(&source, "btc-a");

    collector.tick().await;
    source.script_book("btc-a-up", BookScript::Failing);
    let outcome = collector.tick().await;

    assert_eq!(
        outcome,
        TickOutcome::Polled {
            fetched: 1,
            transient: 1,
            retired: 0
        }
    );
    assert_eq!(collector.targets().len(), 2);
    assert_eq!(store.get("btc-a-up").unwrap().best_bid, Some(0.40));
}

#[tokio::test]
async fn test_refresh_evicts_departed_instruments() {
    let (source, store, mut collector) = setup(0);
    source.set_open_markets(vec![up_down_market("btc-a")]);
    script_up_down(&source, "btc-a");
    script_up_down(&source, "btc-b");

    collector.tick().await;
    assert_eq!(store.len(), 2);

    source.set_open_markets(vec![up_down_market("btc-b")]);
    collector.tick().await;

    assert!(store.get("btc-a-up").is_none());
    assert!(store.get("btc-a-down").is_none());
    assert!(store.get("btc-b-up").is_some());
    assert_eq!(store.len(), 2);
    assert!(collector.targets().iter().all(|t| t.market_slug == "btc-b"));
}

#[tokio::test]
async fn test_discovery_failure_keeps_previous_set() {
    let (source, store, mut collector) = setup(0);
    source.set_open_markets(vec![up_down_market("btc-a")]);
    script_up_down(&source, "btc-a");
    collector.tick().await;

    source.set_listing_fails(true);
    let outcome = collector.tick().await;

    assert_eq!(outcome, TickOutcome::DiscoveryFailed);
    assert_eq!(collector.targets().len(), 2);
    assert_eq!(store.len(), 2);
    assert_eq!(source.book_calls("btc-a-up"), 1);

    source.set_listing_fails(false);
    assert!(matches!(collector.tick().await, TickOutcome::Polled { fetched: 2, .. }));
}

#[tokio::test]
async fn test_empty_discovery_skips_fan_out() {
    let (source, store, mut collector) = setup(NEVER);

    assert_eq!(collector.tick().await, TickOutcome::NoTargets);
    assert!(store.is_empty());

    // An empty set triggers discovery again on the next tick
    source.set_open_markets(vec![up_down_market("btc-a")]);
    script_up_down(&source, "btc-a");
    assert!(matches!(collector.tick().await, TickOutcome::Polled { fetched: 2, .. }));
    assert_eq!(source.broad_listings(), 2);
}

#[tokio::test]
async fn test_exhausted_rolling_selection_skips_fan_out() {
    let source = Arc::new(FakeQuoteSource::new());
    source.set_open_markets(vec![up_down_market("btc-a")]);
    let store = Arc::new(SnapshotStore::new());
    let config = CollectorConfig {
        selection: MarketSelection::Rolling {
            base_slug: "btc-15m-1700000000".to_string(),
            step_secs: 900,
        },
        ..Default::default()
    };
    let mut collector = SnapshotCollector::new(Arc::clone(&source), &config, store);

    assert_eq!(collector.tick().await, TickOutcome::NoTargets);
    assert_eq!(source.broad_listings(), 0);
    assert!(!source.listed_slugs().is_empty());
}

#[tokio::test]
async fn test_run_stops_on_shutdown() {
    let (source, store, mut collector) = setup(NEVER);
    source.set_open_markets(vec![up_down_market("btc-a")]);
    script_up_down(&source, "btc-a");

    let shutdown = ShutdownManager::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.trigger();
    });

    tokio::time::timeout(Duration::from_secs(5), collector.run(&shutdown))
        .await
        .unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(source.book_calls("btc-a-up"), 1);
}
