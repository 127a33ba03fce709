//! Benchmark store — per-metric anchors and optional empirical samples.
//!
//! The store is built once at startup (compiled-in MLB defaults, then any
//! config overrides and sample files) and is read-only afterwards. Callers
//! share it by reference.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metric::{Dimension, MetricKey, PitchType};

/// The 10th/50th/90th percentile reference points of a metric.
///
/// Assumed to satisfy `p10 < p50 < p90`; not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

impl Anchors {
    pub const fn new(p10: f64, p50: f64, p90: f64) -> Self {
        Self { p10, p50, p90 }
    }
}

/// Everything needed to rank and display one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkDefinition {
    pub anchors: Anchors,
    pub name: &'static str,
    pub unit: &'static str,
}

/// Errors building a store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("non-finite sample value {value} for metric '{key}'")]
    NonFiniteSample { key: MetricKey, value: f64 },
}

/// MLB league anchors for a metric.
pub fn mlb_anchors(key: MetricKey) -> Anchors {
    use Dimension::*;
    use PitchType::*;

    match (key.pitch, key.dimension) {
        (FourSeam, Velocity) => Anchors::new(91.3, 93.8, 96.6),
        (FourSeam, SpinRate) => Anchors::new(2150.0, 2304.0, 2481.0),
        (FourSeam, HorizontalBreak) => Anchors::new(-8.5, -6.1, -3.8),
        (FourSeam, VerticalBreak) => Anchors::new(-16.8, -14.5, -12.3),
        (FourSeam, InducedVerticalBreak) => Anchors::new(13.6, 16.0, 18.1),

        (Slider, Velocity) => Anchors::new(82.0, 85.5, 88.9),
        (Slider, SpinRate) => Anchors::new(2300.0, 2550.0, 2800.0),
        (Slider, HorizontalBreak) => Anchors::new(-0.5, 3.5, 6.8),
        (Slider, VerticalBreak) => Anchors::new(-35.5, -33.0, -30.2),
        (Slider, InducedVerticalBreak) => Anchors::new(1.8, 4.0, 6.5),

        (Splitter, Velocity) => Anchors::new(82.5, 85.0, 87.8),
        (Splitter, SpinRate) => Anchors::new(1100.0, 1400.0, 1700.0),
        (Splitter, HorizontalBreak) => Anchors::new(-12.5, -9.8, -7.2),
        (Splitter, VerticalBreak) => Anchors::new(-35.0, -32.5, -29.8),
        (Splitter, InducedVerticalBreak) => Anchors::new(1.5, 3.5, 5.8),
    }
}

/// Immutable reference data for every metric key.
///
/// Indexed densely by [`MetricKey::index`], so every key always has a
/// definition and a (possibly empty) sample set.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkStore {
    definitions: [BenchmarkDefinition; MetricKey::COUNT],
    samples: [Vec<f64>; MetricKey::COUNT],
}

impl BenchmarkStore {
    /// Store with the compiled-in MLB anchors and no samples.
    pub fn mlb_defaults() -> Self {
        let definitions = std::array::from_fn(|i| {
            let key = MetricKey::from_index(i);
            BenchmarkDefinition {
                anchors: mlb_anchors(key),
                name: key.dimension.name(),
                unit: key.dimension.unit(),
            }
        });
        Self {
            definitions,
            samples: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Replace the anchors of one metric. Name and unit are unchanged.
    pub fn with_anchors(mut self, key: MetricKey, anchors: Anchors) -> Self {
        tracing::debug!(%key, ?anchors, "overriding benchmark anchors");
        self.definitions[key.index()].anchors = anchors;
        self
    }

    /// Replace the sample distribution of one metric.
    ///
    /// Samples are stored sorted ascending, which the percentile engine relies
    /// on. Non-finite values are rejected.
    pub fn with_samples(
        mut self,
        key: MetricKey,
        mut samples: Vec<f64>,
    ) -> Result<Self, StoreError> {
        if let Some(&value) = samples.iter().find(|v| !v.is_finite()) {
            return Err(StoreError::NonFiniteSample { key, value });
        }
        samples.sort_by(f64::total_cmp);
        tracing::debug!(%key, count = samples.len(), "loaded sample distribution");
        self.samples[key.index()] = samples;
        Ok(self)
    }

    pub fn definition(&self, key: MetricKey) -> &BenchmarkDefinition {
        &self.definitions[key.index()]
    }

    /// Sample distribution for a metric, sorted ascending. Empty when none was loaded.
    pub fn samples(&self, key: MetricKey) -> &[f64] {
        &self.samples[key.index()]
    }

    /// Keys with a non-empty sample distribution.
    pub fn keys_with_samples(&self) -> impl Iterator<Item = MetricKey> + '_ {
        MetricKey::all().filter(|k| !self.samples(*k).is_empty())
    }
}

impl Default for BenchmarkStore {
    fn default() -> Self {
        Self::mlb_defaults()
    }
}
