//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use contagio::prelude::*;
//! ```

pub use crate::classification::LogisticRegression;
pub use crate::kinship::{KinshipEdge, KinshipTable, Membership};
pub use crate::model_selection::{cross_validate, CrossValidationResult, KFold};
pub use crate::panel::Panel;
pub use crate::primitives::{Matrix, Vector};
pub use crate::spillover::{compute_metrics, MetricConfig, MetricTable, YearNetwork};
pub use crate::study::{run_study, ModelSpec, StudyResult};
pub use crate::traits::Estimator;
