//! Metric keys — a pitch type paired with a measured dimension.
//!
//! Keys have a stable string form `<pitch>_<dimension>` (e.g. `ff_avg_speed`)
//! used by config files, sample CSVs and the CLI. Inside the crate a key is a
//! `Copy` value over two closed enums, so every lookup is exhaustive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pitch types with published benchmarks.
///
/// Declaration order is the form/display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PitchType {
    FourSeam,
    Slider,
    Splitter,
}

impl PitchType {
    pub const ALL: [PitchType; 3] = [Self::FourSeam, Self::Slider, Self::Splitter];

    /// Short tag used in metric keys.
    pub fn tag(self) -> &'static str {
        match self {
            Self::FourSeam => "ff",
            Self::Slider => "sl",
            Self::Splitter => "fs",
        }
    }

    /// Human-readable section label.
    pub fn label(self) -> &'static str {
        match self {
            Self::FourSeam => "4-Seam Fastball",
            Self::Slider => "Slider",
            Self::Splitter => "Splitter",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.tag() == tag)
    }
}

/// Measured dimension of a pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Velocity,
    SpinRate,
    HorizontalBreak,
    VerticalBreak,
    InducedVerticalBreak,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Self::Velocity,
        Self::SpinRate,
        Self::HorizontalBreak,
        Self::VerticalBreak,
        Self::InducedVerticalBreak,
    ];

    /// Suffix used in metric keys.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Velocity => "avg_speed",
            Self::SpinRate => "avg_spin",
            Self::HorizontalBreak => "avg_break_x",
            Self::VerticalBreak => "avg_break_z",
            Self::InducedVerticalBreak => "avg_break_z_induced",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.tag() == tag)
    }

    /// Display name shown next to the input and in results.
    pub fn name(self) -> &'static str {
        match self {
            Self::Velocity => "Velocity",
            Self::SpinRate => "Spin Rate",
            Self::HorizontalBreak => "Horizontal Break",
            Self::VerticalBreak => "Vertical Break",
            Self::InducedVerticalBreak => "Induced Vertical Break",
        }
    }

    /// Unit appended directly after a value, including any leading space.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Velocity => " mph",
            Self::SpinRate => " rpm",
            Self::HorizontalBreak | Self::VerticalBreak | Self::InducedVerticalBreak => "\"",
        }
    }
}

/// Error parsing a metric key string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricKeyError {
    #[error("unknown pitch type '{0}' (expected ff, sl or fs)")]
    UnknownPitch(String),
    #[error("unknown metric dimension '{0}'")]
    UnknownDimension(String),
    #[error("malformed metric key '{0}' (expected <pitch>_<dimension>, e.g. ff_avg_speed)")]
    Malformed(String),
}

/// Identifier of one benchmarked metric.
///
/// Ordered by pitch type, then dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MetricKey {
    pub pitch: PitchType,
    pub dimension: Dimension,
}

impl MetricKey {
    pub const fn new(pitch: PitchType, dimension: Dimension) -> Self {
        Self { pitch, dimension }
    }

    /// Number of distinct keys.
    pub const COUNT: usize = PitchType::ALL.len() * Dimension::ALL.len();

    /// Dense position of this key in form order, in `0..COUNT`.
    pub fn index(self) -> usize {
        self.pitch as usize * Dimension::ALL.len() + self.dimension as usize
    }

    /// Inverse of [`MetricKey::index`]. Panics if `index >= COUNT`.
    pub fn from_index(index: usize) -> Self {
        let dims = Dimension::ALL.len();
        Self::new(PitchType::ALL[index / dims], Dimension::ALL[index % dims])
    }

    /// Every key in form order.
    pub fn all() -> impl Iterator<Item = MetricKey> {
        PitchType::ALL.into_iter().flat_map(|pitch| {
            Dimension::ALL
                .into_iter()
                .map(move |dimension| MetricKey::new(pitch, dimension))
        })
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.pitch.tag(), self.dimension.tag())
    }
}

impl FromStr for MetricKey {
    type Err = MetricKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (pitch_tag, dim_tag) = s
            .split_once('_')
            .ok_or_else(|| MetricKeyError::Malformed(s.to_string()))?;
        let pitch = PitchType::from_tag(pitch_tag)
            .ok_or_else(|| MetricKeyError::UnknownPitch(pitch_tag.to_string()))?;
        let dimension = Dimension::from_tag(dim_tag)
            .ok_or_else(|| MetricKeyError::UnknownDimension(dim_tag.to_string()))?;
        Ok(Self::new(pitch, dimension))
    }
}

impl TryFrom<String> for MetricKey {
    type Error = MetricKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MetricKey> for String {
    fn from(key: MetricKey) -> Self {
        key.to_string()
    }
}
