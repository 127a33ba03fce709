//! TOML configuration: benchmark overrides, sample file, contact recipient.
//!
//! ```toml
//! [contact]
//! recipient = "coach@example.com"
//!
//! [samples]
//! path = "samples.csv"
//!
//! [benchmarks.ff_avg_speed]
//! p10 = 91.0
//! p50 = 93.5
//! p90 = 96.0
//! ```
//!
//! Every section is optional. An empty file yields the compiled-in defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::benchmark::{Anchors, BenchmarkStore};
use crate::metric::MetricKey;
use crate::samples::{SampleError, SampleSet};

/// Errors loading configuration or building the store from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("samples: {0}")]
    Samples(#[from] SampleError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplesConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactConfig {
    pub recipient: Option<String>,
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArmTrackerConfig {
    /// Anchor overrides keyed by metric key string.
    #[serde(default)]
    pub benchmarks: BTreeMap<MetricKey, Anchors>,
    #[serde(default)]
    pub samples: SamplesConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

impl ArmTrackerConfig {
    /// Load from a TOML file. A relative sample path is resolved against
    /// the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;

        if let (Some(samples), Some(dir)) = (config.samples.path.as_mut(), path.parent()) {
            if samples.is_relative() {
                *samples = dir.join(&*samples);
            }
        }

        tracing::info!(
            path = %path.display(),
            overrides = config.benchmarks.len(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Build the benchmark store: defaults, then anchor overrides, then samples.
    ///
    /// `samples_override` takes precedence over the configured sample path.
    pub fn build_store(
        &self,
        samples_override: Option<&Path>,
    ) -> Result<BenchmarkStore, ConfigError> {
        let mut store = BenchmarkStore::mlb_defaults();
        for (key, anchors) in &self.benchmarks {
            if !(anchors.p10 < anchors.p50 && anchors.p50 < anchors.p90) {
                tracing::warn!(%key, ?anchors, "benchmark anchors are not increasing");
            }
            store = store.with_anchors(*key, *anchors);
        }

        let sample_path = samples_override.or(self.samples.path.as_deref());
        if let Some(path) = sample_path {
            store = SampleSet::from_file(path)?.apply(store)?;
        }

        Ok(store)
    }
}
