//! The model-sequence harness: nested specifications over panel columns.
//!
//! The study fits a ladder of logistic regressions (baseline controls,
//! then network metrics added) and compares them by k-fold CV. This module
//! is glue: it assembles feature matrices from named panel columns and runs
//! the cross-validation loop per specification.

use tracing::info;

use crate::classification::LogisticRegression;
use crate::error::{ContagioError, Result};
use crate::model_selection::{cross_validate, CrossValidationResult, KFold};
use crate::panel::Panel;

/// One model specification: named feature columns and a binary target.
///
/// # Examples
///
/// ```
/// use contagio::study::ModelSpec;
///
/// let spec = ModelSpec::new("baseline", &["polity", "gdp_pc"], "war");
/// assert_eq!(spec.features.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ModelSpec {
    /// Label used in reporting.
    pub name: String,
    /// Panel columns used as predictors.
    pub features: Vec<String>,
    /// Panel column holding the 0/1 outcome.
    pub target: String,
}

impl ModelSpec {
    /// Convenience constructor.
    #[must_use]
    pub fn new(name: &str, features: &[&str], target: &str) -> Self {
        Self {
            name: name.to_string(),
            features: features.iter().map(|&f| f.to_string()).collect(),
            target: target.to_string(),
        }
    }
}

/// Cross-validated scores of one specification.
#[derive(Debug, Clone)]
pub struct StudyResult {
    /// Specification label.
    pub name: String,
    /// Per-fold scores.
    pub cv: CrossValidationResult,
}

/// Evaluate each specification by k-fold cross-validation.
///
/// `template` carries the hyperparameters; it is cloned per specification
/// and per fold. The panel must already be complete on every referenced
/// column (run the imputation and `retain_complete` passes first).
///
/// # Errors
///
/// Returns an error on unknown columns, non-finite cells, or training
/// failures.
pub fn run_study(
    panel: &Panel,
    specs: &[ModelSpec],
    template: &LogisticRegression,
    kfold: &KFold,
) -> Result<Vec<StudyResult>> {
    let mut results = Vec::with_capacity(specs.len());

    for spec in specs {
        let features: Vec<&str> = spec.features.iter().map(String::as_str).collect();
        let x = panel.to_matrix(&features)?;
        let y = panel.target(&spec.target)?;

        if x.as_slice().iter().any(|v| !v.is_finite()) {
            return Err(ContagioError::Other(format!(
                "specification '{}' has non-finite features; impute and drop incomplete rows first",
                spec.name
            )));
        }

        let cv = cross_validate(template, &x, &y, kfold)?;
        info!(
            spec = %spec.name,
            mean = cv.mean(),
            std = cv.std(),
            "specification evaluated"
        );

        results.push(StudyResult {
            name: spec.name.clone(),
            cv,
        });
    }

    Ok(results)
}
