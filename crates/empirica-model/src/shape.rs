//! Dataset shape classification results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetShape {
    /// Single-time-point observations across entities.
    CrossSection,
    /// Observations indexed by both entity and time.
    Panel,
    /// Single-entity observations across time.
    TimeSeries,
}

impl DatasetShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CrossSection => "cross_section",
            Self::Panel => "panel",
            Self::TimeSeries => "time_series",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CrossSection => "截面数据",
            Self::Panel => "面板数据",
            Self::TimeSeries => "时间序列数据",
        }
    }
}

impl fmt::Display for DatasetShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetShape {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cross_section" => Ok(Self::CrossSection),
            "panel" => Ok(Self::Panel),
            "time_series" => Ok(Self::TimeSeries),
            other => Err(ModelError::invalid_config(format!(
                "unknown dataset type '{other}'"
            ))),
        }
    }
}

/// Detected shape with a heuristic confidence in `0..=1`.
///
/// `shape` is `None` only for an empty table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetShapeInfo {
    #[serde(rename = "type")]
    pub shape: Option<DatasetShape>,
    pub confidence: f64,
}

impl DatasetShapeInfo {
    pub const fn new(shape: DatasetShape, confidence: f64) -> Self {
        Self {
            shape: Some(shape),
            confidence,
        }
    }

    pub const fn unknown() -> Self {
        Self {
            shape: None,
            confidence: 0.0,
        }
    }

    /// Replace the detected shape with a user choice; confidence is kept.
    #[must_use]
    pub fn with_override(self, shape: DatasetShape) -> Self {
        Self {
            shape: Some(shape),
            confidence: self.confidence,
        }
    }
}

impl Default for DatasetShapeInfo {
    fn default() -> Self {
        Self::unknown()
    }
}
