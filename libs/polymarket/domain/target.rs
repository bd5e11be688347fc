//! Instruments selected for polling

use serde::{Deserialize, Serialize};

/// One quotable outcome of a market, produced by discovery.
///
/// Identity is the token id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentTarget {
    /// Market group identifier (market slug)
    pub market_slug: String,
    /// Human readable market label
    pub question: String,
    pub outcome: String,
    pub token_id: String,
}

impl InstrumentTarget {
    pub fn new(
        market_slug: impl Into<String>,
        question: impl Into<String>,
        outcome: impl Into<String>,
        token_id: impl Into<String>,
    ) -> Self {
        Self {
            market_slug: market_slug.into(),
            question: question.into(),
            outcome: outcome.into(),
            token_id: token_id.into(),
        }
    }
}

/// Number of distinct market groups in a list of targets
pub fn distinct_market_groups(targets: &[InstrumentTarget]) -> usize {
    let mut slugs: Vec<&str> = targets.iter().map(|t| t.market_slug.as_str()).collect();
    slugs.sort_unstable();
    slugs.dedup();
    slugs.len()
}
