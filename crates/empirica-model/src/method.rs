//! Method recommendation records.

use serde::{Deserialize, Serialize};

/// Descriptive record of a statistical or econometric method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodRecommendation {
    pub name: String,
    pub description: String,
    pub advantages: Vec<String>,
    pub considerations: Vec<String>,
    pub assumptions: Vec<String>,
    pub test_methods: Vec<String>,
    pub formula: String,
    pub suitable_conditions: Vec<String>,
    pub suitable_scenarios: Vec<String>,
    pub confidence: f64,
}
