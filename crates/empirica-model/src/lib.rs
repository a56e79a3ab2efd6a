//! Shared data model for tabular ingestion, variable profiling,
//! preprocessing and method recommendation.

pub mod error;
pub mod method;
pub mod options;
pub mod request;
pub mod roles;
pub mod shape;
pub mod table;
pub mod value;
pub mod variable;

pub use error::{ModelError, Result};
pub use method::MethodRecommendation;
pub use options::{
    DEFAULT_MISSING_THRESHOLD, DEFAULT_OUTLIER_THRESHOLD, MissingValueConfig, MissingValueMethod,
    OutlierConfig, OutlierMethod, PreprocessConfig, StandardizationConfig, StandardizationMethod,
};
pub use request::{EmpiricalAnalysisRequest, ProcessedData};
pub use roles::{RoleAssignment, assign_roles};
pub use shape::{DatasetShape, DatasetShapeInfo};
pub use table::{PREVIEW_SEPARATOR, Row, Table};
pub use value::{Value, format_date, parse_date, parse_number};
pub use variable::{
    CategoryBreakdown, NumericStats, VariableInfo, VariableKind, VariableRole, VariableStats,
};
