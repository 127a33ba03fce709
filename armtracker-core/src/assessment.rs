//! Aggregation of per-metric percentiles into an assessment.
//!
//! An assessment is built from scratch on every call: raw inputs in, one
//! result entry per metric with a usable value, plus the overall score.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::benchmark::{BenchmarkDefinition, BenchmarkStore};
use crate::metric::MetricKey;
use crate::percentile::{
    compute_percentile_value, parse_measurement, round_half_up, PercentileMethod,
};

/// Errors from aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessError {
    #[error("no input provided: enter at least one metric")]
    NoInput,
}

/// Raw text measurements keyed by metric, as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Measurements {
    inputs: BTreeMap<MetricKey, String>,
}

impl Measurements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw input for a metric, replacing any earlier one.
    pub fn set(&mut self, key: MetricKey, raw: impl Into<String>) {
        self.inputs.insert(key, raw.into());
    }

    pub fn with(mut self, key: MetricKey, raw: impl Into<String>) -> Self {
        self.set(key, raw);
        self
    }

    pub fn get(&self, key: MetricKey) -> Option<&str> {
        self.inputs.get(&key).map(|s| s.as_str())
    }

    /// Inputs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, &str)> {
        self.inputs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(MetricKey, S)> for Measurements {
    fn from_iter<I: IntoIterator<Item = (MetricKey, S)>>(iter: I) -> Self {
        let mut m = Self::new();
        for (key, raw) in iter {
            m.set(key, raw);
        }
        m
    }
}

/// One metric's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry {
    pub value: f64,
    /// Percentile rounded for display.
    pub percentile: i64,
    /// Percentile as computed, before rounding. Feeds the overall score.
    pub raw_percentile: f64,
    pub method: PercentileMethod,
    pub benchmark: BenchmarkDefinition,
}

/// Per-metric results plus the overall score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub results: BTreeMap<MetricKey, ResultEntry>,
    pub overall: i64,
}

/// Compute a result entry for every metric with a parseable input.
///
/// Empty and unparseable inputs are skipped; they are null measurements,
/// not errors.
pub fn collect_results(
    store: &BenchmarkStore,
    measurements: &Measurements,
) -> BTreeMap<MetricKey, ResultEntry> {
    let mut results = BTreeMap::new();

    for (key, raw) in measurements.iter() {
        if raw.trim().is_empty() {
            continue;
        }
        let Some(value) = parse_measurement(raw) else {
            tracing::warn!(%key, raw, "ignoring non-numeric measurement");
            continue;
        };

        let raw_percentile = compute_percentile_value(store, key, value);
        results.insert(
            key,
            ResultEntry {
                value,
                percentile: round_half_up(raw_percentile),
                raw_percentile,
                method: PercentileMethod::for_metric(store, key),
                benchmark: *store.definition(key),
            },
        );
    }

    results
}

/// Overall score: mean of the unrounded per-metric percentiles, rounded.
///
/// Refused with [`AssessError::NoInput`] when there are no results.
pub fn compute_overall(results: &BTreeMap<MetricKey, ResultEntry>) -> Result<i64, AssessError> {
    if results.is_empty() {
        return Err(AssessError::NoInput);
    }
    let total: f64 = results.values().map(|r| r.raw_percentile).sum();
    Ok(round_half_up(total / results.len() as f64))
}

/// Full assessment of a set of measurements.
pub fn assess(
    store: &BenchmarkStore,
    measurements: &Measurements,
) -> Result<Assessment, AssessError> {
    let results = collect_results(store, measurements);
    let overall = compute_overall(&results)?;
    tracing::debug!(metrics = results.len(), overall, "assessment complete");
    Ok(Assessment { results, overall })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::Anchors;
    use crate::metric::{Dimension, PitchType};

    fn key(pitch: PitchType, dimension: Dimension) -> MetricKey {
        MetricKey::new(pitch, dimension)
    }

    fn velocity() -> MetricKey {
        key(PitchType::FourSeam, Dimension::Velocity)
    }

    #[test]
    fn no_measurements_is_refused() {
        let store = BenchmarkStore::default();
        assert_eq!(assess(&store, &Measurements::new()), Err(AssessError::NoInput));
    }

    #[test]
    fn only_blank_or_garbage_is_refused() {
        let store = BenchmarkStore::default();
        let m = Measurements::new()
            .with(velocity(), "")
            .with(key(PitchType::Slider, Dimension::SpinRate), "abc");
        assert_eq!(assess(&store, &m), Err(AssessError::NoInput));
    }

    #[test]
    fn single_metric_overall_equals_its_percentile() {
        let store = BenchmarkStore::default();
        let m = Measurements::new().with(velocity(), "93.8");
        let a = assess(&store, &m).unwrap();
        assert_eq!(a.results.len(), 1);
        assert_eq!(a.results[&velocity()].percentile, 50);
        assert_eq!(a.overall, 50);
    }

    #[test]
    fn invalid_inputs_are_excluded_not_fatal() {
        let store = BenchmarkStore::default();
        let m = Measurements::new()
            .with(velocity(), "93.8")
            .with(key(PitchType::FourSeam, Dimension::SpinRate), "")
            .with(key(PitchType::Slider, Dimension::Velocity), "n/a");
        let a = assess(&store, &m).unwrap();
        assert_eq!(a.results.keys().copied().collect::<Vec<_>>(), vec![velocity()]);
    }

    #[test]
    fn overall_uses_unrounded_percentiles() {
        // 10.6 and 10.3 display as 11 and 10. Raw mean 10.45 → 10;
        // averaging the displayed values would give 10.5 → 11.
        let a_key = velocity();
        let b_key = key(PitchType::FourSeam, Dimension::SpinRate);
        let store = BenchmarkStore::default()
            .with_anchors(a_key, Anchors::new(100.0, 200.0, 300.0))
            .with_anchors(b_key, Anchors::new(100.0, 200.0, 300.0));
        // 10 + 40 * (x - 100) / 100 → 10.6 at x = 101.5, 10.3 at x = 100.75
        let m = Measurements::new()
            .with(a_key, "101.5")
            .with(b_key, "100.75");
        let a = assess(&store, &m).unwrap();
        assert_eq!(a.results[&a_key].percentile, 11);
        assert_eq!(a.results[&b_key].percentile, 10);
        assert_eq!(a.overall, 10);
    }

    #[test]
    fn results_keep_benchmark_and_method() {
        let store = BenchmarkStore::default()
            .with_samples(velocity(), vec![90.0, 95.0])
            .unwrap();
        let m = Measurements::new().with(velocity(), "92");
        let a = assess(&store, &m).unwrap();
        let entry = &a.results[&velocity()];
        assert_eq!(entry.method, PercentileMethod::Empirical);
        assert_eq!(entry.benchmark.name, "Velocity");
        assert_eq!(entry.value, 92.0);
        assert_eq!(entry.raw_percentile, 50.0);
    }

    #[test]
    fn later_input_for_same_key_wins() {
        let m: Measurements = vec![(velocity(), "90"), (velocity(), "93.8")]
            .into_iter()
            .collect();
        assert_eq!(m.get(velocity()), Some("93.8"));
    }

    #[test]
    fn negative_unclamped_percentile_rounds_half_up() {
        let ivb = key(PitchType::FourSeam, Dimension::InducedVerticalBreak);
        let store = BenchmarkStore::default().with_anchors(ivb, Anchors::new(10.0, 16.0, 18.0));
        // 10 * (-2.5 / 10) = -2.5 → -2, not -3
        let m = Measurements::new().with(ivb, "-2.5");
        let a = assess(&store, &m).unwrap();
        assert_eq!(a.results[&ivb].raw_percentile, -2.5);
        assert_eq!(a.results[&ivb].percentile, -2);
        assert_eq!(a.overall, -2);
    }
}
