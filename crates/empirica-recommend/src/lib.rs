//! Econometric method recommendation.
//!
//! [`recommend`] maps a dataset shape (plus the instrument flag) onto a
//! fixed, ordered list of estimation methods. [`supplementary_methods`] and
//! [`robustness_checks`] list follow-up analyses; they never change what
//! [`recommend`] returns.

pub mod catalog;
pub mod recommend;

pub use catalog::MethodText;
pub use recommend::{
    RecommendationInput, RobustnessCheck, recommend, robustness_checks, supplementary_methods,
};
