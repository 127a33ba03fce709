//! Empirical sample distributions loaded from CSV.
//!
//! Format: a header row `metric,value`, then one observation per row:
//!
//! ```text
//! metric,value
//! ff_avg_speed,94.1
//! ff_avg_speed,92.7
//! sl_avg_spin,2610
//! ```
//!
//! Rows may appear in any order. Keys absent from the file keep an empty
//! distribution and fall back to anchor interpolation.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::benchmark::{BenchmarkStore, StoreError};
use crate::metric::MetricKey;

/// Errors reading a sample file.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("read sample file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sample row {row}: {source}")]
    Csv {
        row: u64,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Deserialize)]
struct SampleRow {
    metric: MetricKey,
    value: f64,
}

/// Observations grouped by metric key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    pub by_metric: BTreeMap<MetricKey, Vec<f64>>,
}

impl SampleSet {
    /// Load samples from a CSV file.
    pub fn from_file(path: &Path) -> Result<Self, SampleError> {
        let file = std::fs::File::open(path).map_err(|source| SampleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            metrics = set.by_metric.len(),
            observations = set.len(),
            "loaded sample file"
        );
        Ok(set)
    }

    /// Parse samples from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SampleError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut by_metric: BTreeMap<MetricKey, Vec<f64>> = BTreeMap::new();
        for (i, row) in rdr.deserialize::<SampleRow>().enumerate() {
            // Row 1 is the header.
            let row = row.map_err(|source| SampleError::Csv {
                row: i as u64 + 2,
                source,
            })?;
            by_metric.entry(row.metric).or_default().push(row.value);
        }

        Ok(Self { by_metric })
    }

    /// Total number of observations across all metrics.
    pub fn len(&self) -> usize {
        self.by_metric.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_metric.is_empty()
    }

    /// Install every distribution into `store`, replacing existing ones.
    pub fn apply(self, mut store: BenchmarkStore) -> Result<BenchmarkStore, SampleError> {
        for (key, values) in self.by_metric {
            store = store.with_samples(key, values)?;
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{Dimension, PitchType};
    use std::io::Write;

    fn velocity() -> MetricKey {
        MetricKey::new(PitchType::FourSeam, Dimension::Velocity)
    }

    #[test]
    fn groups_rows_by_metric() {
        let csv = "metric,value\nff_avg_speed,94.1\nsl_avg_spin,2610\nff_avg_speed, 92.7\n";
        let set = SampleSet::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(set.by_metric.len(), 2);
        assert_eq!(set.by_metric[&velocity()], vec![94.1, 92.7]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn header_only_is_empty() {
        let set = SampleSet::from_reader("metric,value\n".as_bytes()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn unknown_metric_reports_row() {
        let csv = "metric,value\nff_avg_speed,94.1\ncu_avg_spin,2610\n";
        let err = SampleSet::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SampleError::Csv { row: 3, .. }), "{err}");
    }

    #[test]
    fn non_numeric_value_rejected() {
        let csv = "metric,value\nff_avg_speed,fast\n";
        assert!(SampleSet::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn nan_value_rejected_on_apply() {
        let csv = "metric,value\nff_avg_speed,NaN\n";
        let set = SampleSet::from_reader(csv.as_bytes()).unwrap();
        let err = set.apply(BenchmarkStore::default()).unwrap_err();
        assert!(matches!(err, SampleError::Store(_)));
    }

    #[test]
    fn apply_installs_sorted_samples() {
        let csv = "metric,value\nff_avg_speed,95\nff_avg_speed,91\n";
        let store = SampleSet::from_reader(csv.as_bytes())
            .unwrap()
            .apply(BenchmarkStore::default())
            .unwrap();
        assert_eq!(store.samples(velocity()), &[91.0, 95.0]);
    }

    #[test]
    fn from_file_reads_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "metric,value").unwrap();
        writeln!(file, "fs_avg_spin,1450").unwrap();
        let set = SampleSet::from_file(file.path()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SampleSet::from_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, SampleError::Io { .. }));
    }
}
