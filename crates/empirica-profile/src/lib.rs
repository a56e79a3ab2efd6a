//! Variable profiling for uploaded tables.
//!
//! - [`analyze_variables`] classifies each column and computes its
//!   descriptive statistics.
//! - [`detect_data_type`] guesses the dataset shape from column names.
//! - [`describe_structure`] adds periods, entities and sampling frequency.
//! - [`correlation_matrix`] gives Pearson or Spearman matrices over the
//!   numeric variables.
//! - [`category_frequencies`] and [`outlier_summary`] back the on-demand
//!   breakdowns shown for single variables.

pub mod analyzer;
pub mod categorical;
pub mod correlation;
pub mod shape;
pub mod stats;

pub use analyzer::{NUMERIC_RATIO, analyze_column, analyze_variables};
pub use categorical::category_frequencies;
pub use correlation::{CorrelationMatrix, CorrelationMethod, correlation_matrix};
pub use shape::{
    ENTITY_TOKENS, StructureDetails, TIME_TOKENS, TimeFrequency, describe_structure,
    detect_data_type, detect_frequency, detect_from_columns,
};
pub use stats::{IQR_MULTIPLIER, OutlierSummary, describe, outlier_summary};
