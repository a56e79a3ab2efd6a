//! Bundles handed to the rendering layer and the empirical-analysis backend.

use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::method::MethodRecommendation;
use crate::options::PreprocessConfig;
use crate::shape::{DatasetShape, DatasetShapeInfo};
use crate::table::Table;
use crate::variable::{VariableInfo, VariableRole};

/// Output of one upload's analysis session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedData {
    pub variables: Vec<VariableInfo>,
    pub raw_data: Table,
    pub preprocess_config: PreprocessConfig,
}

impl ProcessedData {
    pub fn preview(&self, limit: Option<usize>) -> String {
        self.raw_data.preview(limit)
    }
}

/// JSON body for the empirical-analysis start endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpiricalAnalysisRequest {
    pub data: Table,
    pub data_type: Option<DatasetShape>,
    pub dependent_var: String,
    pub independent_vars: Vec<String>,
    pub control_vars: Vec<String>,
    pub group_vars: Vec<String>,
    pub instrumental_vars: Vec<String>,
    pub moderator_vars: Vec<String>,
    pub mediator_vars: Vec<String>,
    pub preprocess_config: PreprocessConfig,
    pub recommendations: Vec<MethodRecommendation>,
    pub selected_method: Option<String>,
}

impl EmpiricalAnalysisRequest {
    /// Assemble a request from role-tagged variables.
    ///
    /// Requires exactly one dependent and at least one independent variable.
    /// A selected method must be one of `recommendations`.
    pub fn build(
        data: Table,
        variables: &[VariableInfo],
        shape: &DatasetShapeInfo,
        preprocess_config: PreprocessConfig,
        recommendations: Vec<MethodRecommendation>,
        selected_method: Option<String>,
    ) -> Result<Self> {
        let names = |role: VariableRole| -> Vec<String> {
            variables
                .iter()
                .filter(|variable| variable.has_role(role))
                .map(|variable| variable.name.clone())
                .collect()
        };

        let mut dependents = names(VariableRole::Dependent);
        let dependent_var = match dependents.len() {
            0 => return Err(ModelError::invalid_config("no dependent variable assigned")),
            1 => dependents.remove(0),
            _ => {
                return Err(ModelError::invalid_config(format!(
                    "more than one dependent variable assigned: {}",
                    dependents.join(", ")
                )));
            }
        };
        let independent_vars = names(VariableRole::Independent);
        if independent_vars.is_empty() {
            return Err(ModelError::invalid_config(
                "at least one independent variable is required",
            ));
        }
        if let Some(method) = &selected_method
            && !recommendations.iter().any(|candidate| &candidate.name == method)
        {
            return Err(ModelError::invalid_config(format!(
                "selected method '{method}' is not among the recommendations"
            )));
        }

        Ok(Self {
            data,
            data_type: shape.shape,
            dependent_var,
            independent_vars,
            control_vars: names(VariableRole::Control),
            group_vars: names(VariableRole::Grouping),
            instrumental_vars: names(VariableRole::Instrumental),
            moderator_vars: names(VariableRole::Moderator),
            mediator_vars: names(VariableRole::Mediator),
            preprocess_config,
            recommendations,
            selected_method,
        })
    }
}
