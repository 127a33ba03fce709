//! Arm Tracker Core — pitch metric percentiles against MLB benchmarks.
//!
//! This crate contains the whole engine:
//! - Metric keys (pitch type × measured dimension)
//! - Benchmark store with compiled-in anchors and optional empirical samples
//! - Percentile estimation (mean-rank ECDF, or p10/p50/p90 interpolation)
//! - Aggregation into per-metric results and an overall score
//! - TOML configuration, CSV sample loading, text rendering, contact drafts

pub mod assessment;
pub mod benchmark;
pub mod config;
pub mod contact;
pub mod metric;
pub mod percentile;
pub mod report;
pub mod samples;

pub use assessment::{
    assess, collect_results, compute_overall, AssessError, Assessment, Measurements, ResultEntry,
};
pub use benchmark::{Anchors, BenchmarkDefinition, BenchmarkStore, StoreError};
pub use config::{ArmTrackerConfig, ConfigError};
pub use contact::{ContactError, ContactMessage};
pub use metric::{Dimension, MetricKey, MetricKeyError, PitchType};
pub use percentile::{
    compute_percentile, compute_percentile_value, percentile_from_anchors, percentile_from_samples,
    PercentileMethod,
};
pub use samples::{SampleError, SampleSet};
