use anyhow::Result;
use polymarket::application::{SnapshotCollector, SnapshotMonitor, SnapshotStore};
use polymarket::infrastructure::{
    detect_credential_mode, init_tracing_with_level, CollectorConfig, PolymarketQuoteClient,
};
use polymarket::utils::ShutdownManager;
use polymarket_snapshot_collector::bin_common::{
    config_type_from_args, load_config_from_env, parse_args, print_banner, print_shutdown,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load config first (before logging is initialized)
    let args = parse_args();
    let config_path = load_config_from_env(config_type_from_args(&args));
    let (config, config_source) = CollectorConfig::load_or_default(&config_path)?;

    init_tracing_with_level(&config.log_level);
    config_source.log(&config_path);
    config.log();
    detect_credential_mode(|key| std::env::var(key).ok()).log();

    let source = Arc::new(PolymarketQuoteClient::from_urls(
        &config.gamma_api_url,
        &config.clob_api_url,
    )?);
    let store = Arc::new(SnapshotStore::new());

    let shutdown = ShutdownManager::new();
    shutdown.spawn_signal_handler();

    print_banner(
        "Polymarket Snapshot Collector",
        &[
            format!("Selection: {}", config.selection),
            format!(
                "Poll every {}s, refresh markets every {}s",
                config.poll_interval_secs, config.discovery_interval_secs
            ),
        ],
    );

    let monitor = SnapshotMonitor::new(
        store.view(),
        Duration::from_secs(config.poll_interval_secs),
        config.monitor_max_rows,
        config.orderbook_levels,
        config.show_orderbook_levels,
    );
    let monitor_shutdown = shutdown.clone();
    let monitor_task = tokio::spawn(async move { monitor.run(&monitor_shutdown).await });

    let mut collector = SnapshotCollector::new(source, &config, store);
    collector.run(&shutdown).await;

    monitor_task.await?;
    print_shutdown("Snapshot collector");
    Ok(())
}
