//! Per-stage preprocessing records.

use std::fmt;

use serde::Serialize;

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    MissingValue,
    Outlier,
    Standardization,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingValue => "missingValue",
            Self::Outlier => "outlier",
            Self::Standardization => "standardization",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The method a stage actually applied to a column.
///
/// `Skip` marks a column exempted from the stage (too many gaps, or zero
/// variance for standardization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppliedMethod {
    Mean,
    Median,
    Mode,
    Remove,
    Zscore,
    Iqr,
    Minmax,
    Skip,
}

impl AppliedMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::Remove => "remove",
            Self::Zscore => "zscore",
            Self::Iqr => "iqr",
            Self::Minmax => "minmax",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for AppliedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters needed to replay a standardization on new data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum ReplayParameters {
    Zscore { mean: f64, std: f64 },
    Minmax { min: f64, max: f64 },
}

impl ReplayParameters {
    /// Apply the recorded transform to `x`.
    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            Self::Zscore { mean, std } => (x - mean) / std,
            Self::Minmax { min, max } => (x - min) / (max - min),
        }
    }
}

impl fmt::Display for ReplayParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zscore { mean, std } => write!(f, "mean={mean:.4}, std={std:.4}"),
            Self::Minmax { min, max } => write!(f, "min={min:.4}, max={max:.4}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRecord {
    pub column: String,
    pub stage: Stage,
    pub method: AppliedMethod,
    /// Cells changed, or rows removed for [`AppliedMethod::Remove`].
    pub affected_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ReplayParameters>,
}

impl StageRecord {
    pub fn new(column: &str, stage: Stage, method: AppliedMethod, affected_count: usize) -> Self {
        Self {
            column: column.to_string(),
            stage,
            method,
            affected_count,
            parameters: None,
        }
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: ReplayParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// Ordered record of everything the pipeline did.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessSummary {
    pub records: Vec<StageRecord>,
    pub rows_before: usize,
    pub rows_after: usize,
}

impl PreprocessSummary {
    pub fn for_stage(&self, stage: Stage) -> impl Iterator<Item = &StageRecord> {
        self.records.iter().filter(move |r| r.stage == stage)
    }

    pub fn get(&self, column: &str, stage: Stage) -> Option<&StageRecord> {
        self.records
            .iter()
            .find(|r| r.stage == stage && r.column == column)
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_matches_forward_transform() {
        let z = ReplayParameters::Zscore { mean: 10.0, std: 2.0 };
        assert_eq!(z.apply(14.0), 2.0);
        let m = ReplayParameters::Minmax { min: 0.0, max: 4.0 };
        assert_eq!(m.apply(1.0), 0.25);
    }

    #[test]
    fn parameters_display_as_key_value_pairs() {
        let z = ReplayParameters::Zscore { mean: 1.5, std: 0.25 };
        assert_eq!(z.to_string(), "mean=1.5000, std=0.2500");
        let m = ReplayParameters::Minmax { min: -2.0, max: 8.0 };
        assert_eq!(m.to_string(), "min=-2.0000, max=8.0000");
    }

    #[test]
    fn record_serializes_flat() {
        let record = StageRecord::new("roa", Stage::Standardization, AppliedMethod::Zscore, 3)
            .with_parameters(ReplayParameters::Zscore { mean: 1.0, std: 0.5 });
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"column":"roa","stage":"standardization","method":"zscore","affectedCount":3,"parameters":{"method":"zscore","mean":1.0,"std":0.5}}"#
        );
    }
}
