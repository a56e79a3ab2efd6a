//! Preprocessing pipeline for analyzed tables.
//!
//! [`preprocess`] runs three stages in a fixed order over the numeric
//! variables of a table:
//!
//! 1. missing values: impute (mean, median, mode), drop rows, or skip
//!    columns whose missing ratio exceeds the threshold
//! 2. outliers: detect by z-score or IQR, clamp to `mean ± threshold·std`
//! 3. standardization: z-score or min-max, recording replay parameters
//!
//! Each stage sees the output of the previous one. The result carries a
//! [`PreprocessSummary`] listing one [`StageRecord`] per column and stage.

pub mod error;
pub mod missing;
pub mod outlier;
pub mod pipeline;
pub mod standardize;
pub mod summary;

pub use error::{Result, TransformError};
pub use missing::mode;
pub use outlier::detect_outliers;
pub use pipeline::{PreprocessOutput, preprocess};
pub use summary::{AppliedMethod, PreprocessSummary, ReplayParameters, Stage, StageRecord};
