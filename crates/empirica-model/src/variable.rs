//! Per-column variable descriptions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic kind of a column, inferred once at analysis time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Numeric,
    Categorical,
    Date,
    /// Numeric column restricted to {0, 1}.
    Dummy,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Date => "date",
            Self::Dummy => "dummy",
        }
    }

    /// True for kinds that carry numeric statistics.
    pub fn has_numeric_stats(self) -> bool {
        matches!(self, Self::Numeric | Self::Dummy)
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Econometric function a user assigns to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableRole {
    Dependent,
    Independent,
    Instrumental,
    Control,
    Moderator,
    Mediator,
    Grouping,
    Time,
    Id,
    Dummy,
}

impl VariableRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dependent => "dependent",
            Self::Independent => "independent",
            Self::Instrumental => "instrumental",
            Self::Control => "control",
            Self::Moderator => "moderator",
            Self::Mediator => "mediator",
            Self::Grouping => "grouping",
            Self::Time => "time",
            Self::Id => "id",
            Self::Dummy => "dummy",
        }
    }
}

impl fmt::Display for VariableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive statistics over the numeric subset of a column.
///
/// `std`, `skewness` and `kurtosis` are population moments; all fields are 0
/// for an empty subset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub skewness: f64,
    /// Excess kurtosis (normal distribution = 0).
    pub kurtosis: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableStats {
    /// Non-missing cells.
    pub count: usize,
    pub missing: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericStats>,
}

impl VariableStats {
    /// Total rows covered by these statistics.
    pub fn total(&self) -> usize {
        self.count + self.missing
    }

    pub fn missing_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.missing as f64 / total as f64
        }
    }
}

/// Frequency breakdown of a categorical column, most frequent first.
///
/// `percentages` are shares of all table rows, missing cells included, so
/// they sum to less than 100 when the column has gaps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub categories: Vec<String>,
    pub frequencies: Vec<usize>,
    pub percentages: Vec<f64>,
}

impl CategoryBreakdown {
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.frequencies.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariableKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<VariableRole>,
    pub stats: VariableStats,
}

impl VariableInfo {
    pub fn new(name: impl Into<String>, kind: VariableKind, stats: VariableStats) -> Self {
        Self {
            name: name.into(),
            kind,
            role: None,
            stats,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: VariableRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn has_role(&self, role: VariableRole) -> bool {
        self.role == Some(role)
    }
}
