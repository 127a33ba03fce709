//! Percentile engine — raw measurement in, percentile rank out.
//!
//! Two estimators:
//! - Empirical (mean-rank ECDF) over a metric's full sample distribution.
//! - Piecewise-linear interpolation over the p10/p50/p90 anchors.
//!
//! The dispatcher picks the empirical method whenever the store holds at
//! least one sample for the metric, and interpolation otherwise. The two
//! are never blended.

use serde::{Deserialize, Serialize};

use crate::benchmark::{Anchors, BenchmarkStore};
use crate::metric::MetricKey;

/// Which estimator produced a percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentileMethod {
    Empirical,
    Interpolated,
}

impl PercentileMethod {
    /// Method the dispatcher will use for `key` against `store`.
    pub fn for_metric(store: &BenchmarkStore, key: MetricKey) -> Self {
        if store.samples(key).is_empty() {
            Self::Interpolated
        } else {
            Self::Empirical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Empirical => "empirical",
            Self::Interpolated => "interpolated",
        }
    }
}

/// Mean-rank empirical percentile of `value` within `samples`.
///
/// `(less + 0.5 * equal) / n * 100`, rounded to one decimal place. Ties land
/// at the midpoint of their group. Returns `None` for an empty sample set.
pub fn percentile_from_samples(value: f64, samples: &[f64]) -> Option<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    rank_in_sorted(value, &sorted)
}

/// Same as [`percentile_from_samples`] for a slice already sorted ascending.
fn rank_in_sorted(value: f64, sorted: &[f64]) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let less = sorted.partition_point(|&v| v < value);
    let equal = sorted[less..].partition_point(|&v| v == value);
    let fraction = (less as f64 + 0.5 * equal as f64) / sorted.len() as f64;

    Some(round_to_tenth(fraction * 100.0))
}

/// Three-anchor piecewise-linear percentile.
///
/// The upper segment is capped at 100. The lower segment runs linearly from
/// 0 at `value == 0` to 10 at `p10` and is not floored, so negative values
/// or negative anchors can produce results below 0 or above 10.
pub fn percentile_from_anchors(value: f64, anchors: &Anchors) -> f64 {
    let Anchors { p10, p50, p90 } = *anchors;

    if value <= p10 {
        10.0 * (value / p10)
    } else if value <= p50 {
        10.0 + 40.0 * (value - p10) / (p50 - p10)
    } else if value <= p90 {
        50.0 + 40.0 * (value - p50) / (p90 - p50)
    } else {
        (90.0 + 10.0 * (value - p90) / (p90 - p50)).min(100.0)
    }
}

/// Parse a raw measurement. Empty, non-numeric or non-finite text yields `None`.
pub fn parse_measurement(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Percentile of an already-parsed value for `key`.
pub fn compute_percentile_value(store: &BenchmarkStore, key: MetricKey, value: f64) -> f64 {
    let samples = store.samples(key);
    match rank_in_sorted(value, samples) {
        Some(pct) => {
            tracing::debug!(%key, value, pct, n = samples.len(), "empirical percentile");
            pct
        }
        None => {
            let pct = percentile_from_anchors(value, &store.definition(key).anchors);
            tracing::debug!(%key, value, pct, "interpolated percentile");
            pct
        }
    }
}

/// Percentile of a raw text measurement for `key`.
///
/// Returns `None` when the text is not a finite number; the metric is then
/// simply left out of any aggregate.
pub fn compute_percentile(store: &BenchmarkStore, raw: &str, key: MetricKey) -> Option<f64> {
    let value = parse_measurement(raw)?;
    Some(compute_percentile_value(store, key, value))
}

/// Round a non-negative value to one decimal place.
///
/// Picks the tenth nearest to the exact binary value of `x`, taking the
/// larger tenth on an exact tie. `0.15` is stored just below the midpoint and
/// rounds to `0.1`; `0.25` is an exact tie and rounds to `0.3`.
fn round_to_tenth(x: f64) -> f64 {
    // fl(x * 10) can only overshoot the true floor, which still selects `lower`
    // below.
    let lower = (x * 10.0).floor();
    let midpoint = 2.0 * lower + 1.0;
    // 20x == hi + lo exactly.
    let hi = x * 20.0;
    let lo = x.mul_add(20.0, -hi);
    let tenths = if hi < midpoint || (hi == midpoint && lo < 0.0) {
        lower
    } else {
        lower + 1.0
    };
    tenths / 10.0
}

/// Round half-way cases toward positive infinity.
///
/// Differs from `f64::round` only for negative halves: `-2.5` becomes `-2`.
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}
