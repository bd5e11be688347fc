//! Rolling market slugs
//!
//! Short-lived markets (e.g. 15 minute up/down windows) embed the Unix
//! start time of their window in the slug: `btc-updown-15m-1700000000`.
//! A new instance is created every `step` seconds, so the live slug has to
//! be re-derived from the clock.

/// Minimum number of digits for a trailing suffix to count as a timestamp
const MIN_TIMESTAMP_DIGITS: usize = 9;

/// A slug family anchored at an embedded window timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingSlug {
    base: String,
    prefix: String,
    anchor: u64,
    step: u64,
}

impl RollingSlug {
    /// Parse `base` into a rolling family. Returns `None` when the slug has
    /// no trailing `-<timestamp>` suffix.
    pub fn parse(base: &str, step_secs: u64) -> Option<Self> {
        let (prefix, suffix) = base.rsplit_once('-')?;
        if suffix.len() < MIN_TIMESTAMP_DIGITS || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let anchor = suffix.parse().ok()?;

        Some(Self {
            base: base.to_string(),
            prefix: prefix.to_string(),
            anchor,
            step: step_secs.max(1),
        })
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    /// Start of the window containing `now`, never drifting from the anchor
    pub fn aligned_bucket(&self, now: u64) -> u64 {
        if now <= self.anchor {
            return self.anchor;
        }
        self.anchor + ((now - self.anchor) / self.step) * self.step
    }

    /// Candidate slugs for `now`: current, next, previous window, then the
    /// base slug. Duplicates are dropped keeping the first occurrence.
    pub fn candidates_at(&self, now: u64) -> Vec<String> {
        let aligned = self.aligned_bucket(now);
        let ordered = [
            self.slug_for(aligned),
            self.slug_for(aligned.saturating_add(self.step)),
            self.slug_for(aligned.saturating_sub(self.step)),
            self.base.clone(),
        ];

        let mut candidates: Vec<String> = Vec::with_capacity(ordered.len());
        for slug in ordered {
            if !candidates.contains(&slug) {
                candidates.push(slug);
            }
        }
        candidates
    }

    fn slug_for(&self, bucket: u64) -> String {
        format!("{}-{}", self.prefix, bucket)
    }
}

/// Candidate slugs to try at time `now` (Unix seconds).
///
/// A slug without a timestamp suffix is returned unchanged as the only
/// candidate; an empty slug yields no candidates.
pub fn rolling_slug_candidates_at(base: &str, step_secs: u64, now: u64) -> Vec<String> {
    if base.is_empty() {
        return Vec::new();
    }
    match RollingSlug::parse(base, step_secs) {
        Some(rolling) => rolling.candidates_at(now),
        None => vec![base.to_string()],
    }
}
