//! Core traits for the modeling harness.
//!
//! These traits define the API contract the cross-validation loop relies on.

use crate::error::Result;
use crate::primitives::{Matrix, Vector};

/// Supervised estimator following the fit/predict/score convention.
///
/// # Examples
///
/// ```
/// use contagio::classification::LogisticRegression;
/// use contagio::primitives::{Matrix, Vector};
/// use contagio::traits::Estimator;
///
/// let x = Matrix::from_vec(4, 1, vec![-2.0, -1.0, 1.0, 2.0]).unwrap();
/// let y = Vector::from_slice(&[0.0, 0.0, 1.0, 1.0]);
///
/// let mut model = LogisticRegression::new()
///     .with_learning_rate(0.5)
///     .with_max_iter(2000);
/// model.fit(&x, &y).unwrap();
/// assert!(model.score(&x, &y) > 0.9);
/// ```
pub trait Estimator {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, bad labels, etc.).
    fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()>;

    /// Predicts target values for input data.
    fn predict(&self, x: &Matrix) -> Vector;

    /// Computes the score (accuracy for classification).
    fn score(&self, x: &Matrix, y: &Vector) -> f64;
}
