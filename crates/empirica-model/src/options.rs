//! Preprocessing configuration.
//!
//! The three sub-configurations are independent; the pipeline always applies
//! them in the order missing values, outliers, standardization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Default tolerated missing ratio before a column is skipped.
pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.5;

/// Default z-score cutoff for outlier detection.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingValueMethod {
    Mean,
    Median,
    Mode,
    /// Drop every row where the column is missing.
    Remove,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    Zscore,
    Iqr,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardizationMethod {
    Zscore,
    Minmax,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissingValueConfig {
    pub method: MissingValueMethod,
    /// Maximum tolerable missing ratio; columns above it are not imputed.
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierConfig {
    pub method: OutlierMethod,
    /// Z-score cutoff, or IQR multiplier for [`OutlierMethod::Iqr`].
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardizationConfig {
    pub method: StandardizationMethod,
}

/// Declarative preprocessing configuration, passed by value into each run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessConfig {
    pub missing_value: MissingValueConfig,
    pub outlier: OutlierConfig,
    pub standardization: StandardizationConfig,
}

impl Default for MissingValueConfig {
    fn default() -> Self {
        Self {
            method: MissingValueMethod::Mean,
            threshold: DEFAULT_MISSING_THRESHOLD,
        }
    }
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            method: OutlierMethod::Zscore,
            threshold: DEFAULT_OUTLIER_THRESHOLD,
        }
    }
}

impl Default for StandardizationConfig {
    fn default() -> Self {
        Self {
            method: StandardizationMethod::None,
        }
    }
}

impl PreprocessConfig {
    /// Configuration that leaves every column untouched.
    pub fn passthrough() -> Self {
        Self {
            missing_value: MissingValueConfig {
                method: MissingValueMethod::None,
                threshold: DEFAULT_MISSING_THRESHOLD,
            },
            outlier: OutlierConfig {
                method: OutlierMethod::None,
                threshold: DEFAULT_OUTLIER_THRESHOLD,
            },
            standardization: StandardizationConfig {
                method: StandardizationMethod::None,
            },
        }
    }

    #[must_use]
    pub fn with_missing_value(mut self, method: MissingValueMethod, threshold: f64) -> Self {
        self.missing_value = MissingValueConfig { method, threshold };
        self
    }

    #[must_use]
    pub fn with_outlier(mut self, method: OutlierMethod, threshold: f64) -> Self {
        self.outlier = OutlierConfig { method, threshold };
        self
    }

    #[must_use]
    pub fn with_standardization(mut self, method: StandardizationMethod) -> Self {
        self.standardization = StandardizationConfig { method };
        self
    }

    /// True when no stage is enabled.
    pub fn is_passthrough(&self) -> bool {
        self.missing_value.method == MissingValueMethod::None
            && self.outlier.method == OutlierMethod::None
            && self.standardization.method == StandardizationMethod::None
    }

    /// Reject thresholds that cannot drive an enabled stage.
    pub fn validate(&self) -> Result<()> {
        if self.missing_value.method != MissingValueMethod::None {
            let threshold = self.missing_value.threshold;
            if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
                return Err(ModelError::invalid_config(format!(
                    "missing-value threshold must be a ratio in [0, 1], got {threshold}"
                )));
            }
        }
        if self.outlier.method != OutlierMethod::None {
            let threshold = self.outlier.threshold;
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(ModelError::invalid_config(format!(
                    "outlier threshold must be a positive number, got {threshold}"
                )));
            }
        }
        Ok(())
    }
}

impl MissingValueMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::Remove => "remove",
            Self::None => "none",
        }
    }
}

impl OutlierMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zscore => "zscore",
            Self::Iqr => "iqr",
            Self::None => "none",
        }
    }
}

impl StandardizationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zscore => "zscore",
            Self::Minmax => "minmax",
            Self::None => "none",
        }
    }
}

impl fmt::Display for MissingValueMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StandardizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PreprocessConfig::default().validate().is_ok());
        assert!(PreprocessConfig::passthrough().is_passthrough());
    }

    #[test]
    fn rejects_ratio_above_one() {
        let config = PreprocessConfig::default().with_missing_value(MissingValueMethod::Mean, 1.5);
        assert!(matches!(
            config.validate(),
            Err(ModelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_non_positive_outlier_threshold() {
        let config = PreprocessConfig::default().with_outlier(OutlierMethod::Iqr, 0.0);
        assert!(config.validate().is_err());
        let config = PreprocessConfig::default().with_outlier(OutlierMethod::Zscore, f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn disabled_stages_ignore_thresholds() {
        let config = PreprocessConfig::passthrough()
            .with_missing_value(MissingValueMethod::None, -3.0)
            .with_outlier(OutlierMethod::None, -1.0);
        assert!(config.validate().is_ok());
    }
}
