//! Periodic snapshot report
//!
//! Reads the store through a [`SnapshotView`] and logs one summary line per
//! snapshot, optionally followed by the depth ladders.

use std::time::Duration;

use tracing::info;

use super::store::SnapshotView;
use crate::domain::{OrderLevel, Snapshot};
use crate::utils::ShutdownManager;

pub struct SnapshotMonitor {
    view: SnapshotView,
    interval: Duration,
    max_rows: usize,
    depth: usize,
    show_levels: bool,
}

impl SnapshotMonitor {
    pub fn new(
        view: SnapshotView,
        interval: Duration,
        max_rows: usize,
        depth: usize,
        show_levels: bool,
    ) -> Self {
        Self {
            view,
            interval,
            max_rows,
            depth,
            show_levels,
        }
    }

    pub async fn run(&self, shutdown: &ShutdownManager) {
        while shutdown.is_running() {
            for line in self.render() {
                info!("{}", line);
            }
            shutdown.interruptible_sleep(self.interval).await;
        }
    }

    /// Report lines for the current store contents
    pub fn render(&self) -> Vec<String> {
        let snapshots = self.view.snapshots_in_order(self.max_rows);
        if snapshots.is_empty() {
            return vec!["Waiting for first orderbook snapshots...".to_string()];
        }

        let mut lines = Vec::with_capacity(snapshots.len() * 3);
        for snapshot in &snapshots {
            lines.push(format_summary(snapshot));
            if self.show_levels {
                lines.push(format!("  bids[{}]: {}", self.depth, format_ladder(&snapshot.top_bids)));
                lines.push(format!("  asks[{}]: {}", self.depth, format_ladder(&snapshot.top_asks)));
            }
        }
        lines
    }
}

pub fn format_summary(snapshot: &Snapshot) -> String {
    format!(
        "{} [{}] | bid={} sh={} total={} | ask={} sh={} total={} | mid={} last={} | depth(b/a)={}/{}",
        snapshot.market_slug,
        snapshot.outcome,
        fmt_num(snapshot.best_bid, 2),
        fmt_num(snapshot.best_bid_shares, 2),
        fmt_num(snapshot.best_bid_notional(), 2),
        fmt_num(snapshot.best_ask, 2),
        fmt_num(snapshot.best_ask_shares, 2),
        fmt_num(snapshot.best_ask_notional(), 2),
        fmt_num(snapshot.mid_price, 3),
        fmt_num(snapshot.last_trade_price, 2),
        snapshot.bid_levels,
        snapshot.ask_levels,
    )
}

/// `price:shares($notional)` entries, or `n/a` for an empty side
pub fn format_ladder(levels: &[OrderLevel]) -> String {
    if levels.is_empty() {
        return "n/a".to_string();
    }
    levels
        .iter()
        .map(|l| format!("{:.2}:{:.2}(${:.2})", l.price, l.shares, l.notional))
        .collect::<Vec<_>>()
        .join(", ")
}

fn fmt_num(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "None".to_string(),
    }
}
