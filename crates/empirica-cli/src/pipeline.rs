//! The analysis control flow: ingest, profile, preprocess, recommend.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use empirica_ingest::read_table;
use empirica_model::{
    DatasetShape, DatasetShapeInfo, EmpiricalAnalysisRequest, MethodRecommendation,
    PreprocessConfig, ProcessedData, RoleAssignment, Table, VariableInfo, assign_roles,
};
use empirica_profile::{
    CorrelationMatrix, CorrelationMethod, StructureDetails, analyze_variables, correlation_matrix,
    describe_structure, detect_data_type,
};
use empirica_recommend::{
    RecommendationInput, RobustnessCheck, recommend, robustness_checks, supplementary_methods,
};
use empirica_transform::{PreprocessOutput, preprocess};
use tracing::info_span;

/// Everything learned from one file before any preprocessing.
#[derive(Debug, Clone)]
pub struct ProfileReport {
    pub path: PathBuf,
    pub table: Table,
    pub variables: Vec<VariableInfo>,
    pub shape: DatasetShapeInfo,
    pub structure: StructureDetails,
    /// Pearson then Spearman, over numeric and dummy variables.
    pub correlations: Vec<CorrelationMatrix>,
}

impl ProfileReport {
    pub fn processed_data(&self, preprocess_config: PreprocessConfig) -> ProcessedData {
        ProcessedData {
            variables: self.variables.clone(),
            raw_data: self.table.clone(),
            preprocess_config,
        }
    }
}

/// User choices for a full analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub config: PreprocessConfig,
    /// Replaces the detected shape; the detected confidence is kept.
    pub data_type: Option<DatasetShape>,
    pub roles: RoleAssignment,
    pub selected_method: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub profile: ProfileReport,
    pub shape: DatasetShapeInfo,
    pub preprocessed: PreprocessOutput,
    pub recommendations: Vec<MethodRecommendation>,
    pub supplementary: Vec<MethodRecommendation>,
    pub robustness: Vec<RobustnessCheck>,
    /// Present when a dependent variable was assigned.
    pub request: Option<EmpiricalAnalysisRequest>,
}

/// Load a file and profile its variables and shape.
pub fn run_profile(path: &Path) -> Result<ProfileReport> {
    let span = info_span!("profile", path = %path.display());
    let _guard = span.enter();

    let table = {
        let _stage = info_span!("ingest").entered();
        read_table(path).with_context(|| format!("load {}", path.display()))?
    };
    let variables = analyze_variables(&table);
    let shape = detect_data_type(&table);
    let structure = describe_structure(&table);
    let correlations = [CorrelationMethod::Pearson, CorrelationMethod::Spearman]
        .into_iter()
        .map(|method| correlation_matrix(&table, &variables, method))
        .collect();
    Ok(ProfileReport {
        path: path.to_path_buf(),
        table,
        variables,
        shape,
        structure,
        correlations,
    })
}

/// Run the whole flow on one file.
pub fn run_analysis(path: &Path, options: &AnalysisOptions) -> Result<AnalysisReport> {
    let mut profile = run_profile(path)?;
    let span = info_span!("analysis", path = %path.display());
    let _guard = span.enter();

    assign_roles(&mut profile.variables, &options.roles).context("assign variable roles")?;
    let shape = match options.data_type {
        Some(shape) => profile.shape.with_override(shape),
        None => profile.shape,
    };

    let preprocessed = preprocess(&profile.table, &profile.variables, options.config)
        .context("preprocess table")?;

    let input = RecommendationInput::from_variables(shape.shape, &profile.variables);
    let recommendations = recommend(&input);
    let supplementary = supplementary_methods(&input);

    let request = if options.roles.dependent.is_some() {
        let request = EmpiricalAnalysisRequest::build(
            preprocessed.table.clone(),
            &profile.variables,
            &shape,
            options.config,
            recommendations.clone(),
            options.selected_method.clone(),
        )
        .context("build analysis request")?;
        Some(request)
    } else {
        tracing::info!("no dependent variable assigned, skipping analysis request");
        None
    };

    Ok(AnalysisReport {
        profile,
        shape,
        preprocessed,
        recommendations,
        supplementary,
        robustness: robustness_checks(),
        request,
    })
}
