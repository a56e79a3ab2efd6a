//! Method selection rules.

use std::collections::BTreeMap;

use empirica_model::{DatasetShape, MethodRecommendation, VariableInfo, VariableRole};
use serde::{Deserialize, Serialize};

use crate::catalog::{
    FIXED_EFFECTS, HETEROGENEITY, MEDIATION, MODERATION, OLS, RANDOM_EFFECTS, TIME_SERIES,
    TWO_STAGE_LEAST_SQUARES,
};

pub const FIXED_EFFECTS_CONFIDENCE: f64 = 0.9;
pub const RANDOM_EFFECTS_CONFIDENCE: f64 = 0.85;
pub const OLS_CONFIDENCE: f64 = 0.8;
pub const TWO_STAGE_CONFIDENCE: f64 = 0.85;
pub const TIME_SERIES_CONFIDENCE: f64 = 0.85;
pub const SUPPLEMENTARY_CONFIDENCE: f64 = 0.75;

/// Structural flags the recommender works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    pub data_type: Option<DatasetShape>,
    pub has_instrumental: bool,
    pub has_moderator: bool,
    pub has_mediator: bool,
    pub has_control: bool,
    pub has_grouping: bool,
}

impl RecommendationInput {
    pub fn new(data_type: Option<DatasetShape>) -> Self {
        Self {
            data_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_instrumental(mut self, has_instrumental: bool) -> Self {
        self.has_instrumental = has_instrumental;
        self
    }

    /// Derive the role flags from assigned variable roles.
    pub fn from_variables(data_type: Option<DatasetShape>, variables: &[VariableInfo]) -> Self {
        let any = |role: VariableRole| variables.iter().any(|v| v.has_role(role));
        Self {
            data_type,
            has_instrumental: any(VariableRole::Instrumental),
            has_moderator: any(VariableRole::Moderator),
            has_mediator: any(VariableRole::Mediator),
            has_control: any(VariableRole::Control),
            has_grouping: any(VariableRole::Grouping),
        }
    }
}

/// Propose estimation methods for the dataset shape.
///
/// - panel: fixed effects, then random effects
/// - cross-section: OLS, then 2SLS when an instrument is assigned
/// - time series: one time-series method
///
/// Order is fixed; an unknown shape yields an empty list.
pub fn recommend(input: &RecommendationInput) -> Vec<MethodRecommendation> {
    let recommendations = match input.data_type {
        Some(DatasetShape::Panel) => vec![
            FIXED_EFFECTS.recommend(FIXED_EFFECTS_CONFIDENCE),
            RANDOM_EFFECTS.recommend(RANDOM_EFFECTS_CONFIDENCE),
        ],
        Some(DatasetShape::CrossSection) => {
            let mut methods = vec![OLS.recommend(OLS_CONFIDENCE)];
            if input.has_instrumental {
                methods.push(TWO_STAGE_LEAST_SQUARES.recommend(TWO_STAGE_CONFIDENCE));
            }
            methods
        }
        Some(DatasetShape::TimeSeries) => vec![TIME_SERIES.recommend(TIME_SERIES_CONFIDENCE)],
        None => Vec::new(),
    };
    tracing::debug!(
        data_type = input.data_type.map_or("unknown", DatasetShape::as_str),
        count = recommendations.len(),
        "recommended methods"
    );
    recommendations
}

/// Follow-up analyses implied by the assigned roles: mediation, moderation,
/// then heterogeneity by group.
pub fn supplementary_methods(input: &RecommendationInput) -> Vec<MethodRecommendation> {
    [
        (input.has_mediator, MEDIATION),
        (input.has_moderator, MODERATION),
        (input.has_grouping, HETEROGENEITY),
    ]
    .into_iter()
    .filter(|(wanted, _)| *wanted)
    .map(|(_, text)| text.recommend(SUPPLEMENTARY_CONFIDENCE))
    .collect()
}

/// A standard robustness check with its default parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobustnessCheck {
    pub name: String,
    pub description: String,
    pub parameters: BTreeMap<String, f64>,
}

fn check(name: &str, description: &str, parameters: &[(&str, f64)]) -> RobustnessCheck {
    RobustnessCheck {
        name: name.to_string(),
        description: description.to_string(),
        parameters: parameters
            .iter()
            .map(|&(key, value)| (key.to_string(), value))
            .collect(),
    }
}

pub fn robustness_checks() -> Vec<RobustnessCheck> {
    vec![
        check(
            "Winsorize处理",
            "对连续变量在上下1%分位进行缩尾处理后重新估计",
            &[("lowerLimit", 0.01), ("upperLimit", 0.01)],
        ),
        check(
            "异常值剔除",
            "剔除z分数绝对值超过阈值的观测后重新估计",
            &[("zThreshold", 3.0)],
        ),
        check(
            "Bootstrap",
            "有放回重抽样估计系数的标准误与置信区间",
            &[("samples", 1000.0)],
        ),
    ]
}
