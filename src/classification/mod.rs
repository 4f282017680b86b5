//! Binary logistic regression for the war-onset models.
//!
//! Sigmoid activation, binary cross-entropy loss, plain gradient descent.
//! The study only ever needs two classes (war onset or not), so there is
//! no multi-class machinery here.
//!
//! # Example
//!
//! ```
//! use contagio::classification::LogisticRegression;
//! use contagio::primitives::{Matrix, Vector};
//! use contagio::traits::Estimator;
//!
//! let x = Matrix::from_vec(4, 1, vec![-2.0, -1.0, 1.0, 2.0]).unwrap();
//! let y = Vector::from_slice(&[0.0, 0.0, 1.0, 1.0]);
//!
//! let mut model = LogisticRegression::new()
//!     .with_learning_rate(0.5)
//!     .with_max_iter(2000);
//! model.fit(&x, &y).unwrap();
//!
//! let proba = model.predict_proba(&x);
//! assert!(proba[0] < 0.5 && proba[3] > 0.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ContagioError, Result};
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;

/// Logistic regression classifier for binary outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Model coefficients (weights), set by fit.
    coefficients: Option<Vec<f64>>,
    /// Intercept (bias) term.
    intercept: f64,
    /// Learning rate for gradient descent.
    learning_rate: f64,
    /// Maximum number of iterations.
    max_iter: usize,
    /// Convergence tolerance on the gradient.
    tol: f64,
}

impl LogisticRegression {
    /// Create a classifier with default hyperparameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: 0.0,
            learning_rate: 0.01,
            max_iter: 1000,
            tol: 1e-4,
        }
    }

    /// Set the learning rate.
    #[must_use]
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Set the maximum number of iterations.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Fitted coefficients, `None` before fit.
    #[must_use]
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_deref()
    }

    /// Fitted intercept.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Sigmoid activation: 1 / (1 + e^(-z)).
    fn sigmoid(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }

    /// Probability of class 1 for each sample.
    ///
    /// # Panics
    ///
    /// Panics if the model has not been fitted.
    #[must_use]
    pub fn predict_proba(&self, x: &Matrix) -> Vector {
        let coef = self.coefficients.as_ref().expect("model not fitted yet");
        let (n_samples, _) = x.shape();

        let mut probas = Vec::with_capacity(n_samples);
        for row in 0..n_samples {
            let mut z = self.intercept;
            for (col, &w) in coef.iter().enumerate() {
                z += w * x.get(row, col);
            }
            probas.push(Self::sigmoid(z));
        }

        Vector::from_vec(probas)
    }

    fn validate(&self, x: &Matrix, y: &Vector) -> Result<()> {
        let (n_samples, _) = x.shape();
        if n_samples != y.len() {
            return Err(ContagioError::dimension_mismatch(
                "samples",
                n_samples,
                y.len(),
            ));
        }
        if n_samples == 0 {
            return Err(ContagioError::empty_input("training data"));
        }
        for &label in y.iter() {
            if label != 0.0 && label != 1.0 {
                return Err(ContagioError::Other(format!(
                    "labels must be 0 or 1, got {label}"
                )));
            }
        }
        if self.learning_rate <= 0.0 {
            return Err(ContagioError::InvalidHyperparameter {
                param: "learning_rate".to_string(),
                value: self.learning_rate.to_string(),
                constraint: "> 0".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for LogisticRegression {
    fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()> {
        self.validate(x, y)?;
        let (n_samples, n_features) = x.shape();

        self.coefficients = Some(vec![0.0; n_features]);
        self.intercept = 0.0;

        for _ in 0..self.max_iter {
            let probas = self.predict_proba(x);

            let mut coef_grad = vec![0.0; n_features];
            let mut intercept_grad = 0.0;

            for i in 0..n_samples {
                let error = probas[i] - y[i];
                intercept_grad += error;
                for (j, grad) in coef_grad.iter_mut().enumerate() {
                    *grad += error * x.get(i, j);
                }
            }

            let n = n_samples as f64;
            intercept_grad /= n;
            for grad in &mut coef_grad {
                *grad /= n;
            }

            self.intercept -= self.learning_rate * intercept_grad;
            if let Some(ref mut coef) = self.coefficients {
                for j in 0..n_features {
                    coef[j] -= self.learning_rate * coef_grad[j];
                }
            }

            if intercept_grad.abs() < self.tol && coef_grad.iter().all(|&g| g.abs() < self.tol) {
                break;
            }
        }

        Ok(())
    }

    /// Predicted class labels (0.0 or 1.0) at the 0.5 threshold.
    fn predict(&self, x: &Matrix) -> Vector {
        let probas = self.predict_proba(x);
        Vector::from_vec(
            probas
                .iter()
                .map(|&p| if p >= 0.5 { 1.0 } else { 0.0 })
                .collect(),
        )
    }

    /// Classification accuracy against 0/1 labels.
    fn score(&self, x: &Matrix, y: &Vector) -> f64 {
        let predictions = self.predict(x);
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(p, t)| (*p - *t).abs() < 0.5)
            .count();
        correct as f64 / y.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Matrix, Vector) {
        let x = Matrix::from_vec(
            6,
            1,
            vec![-3.0, -2.0, -1.0, 1.0, 2.0, 3.0],
        )
        .unwrap();
        let y = Vector::from_slice(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        (x, y)
    }

    #[test]
    fn test_fit_separable() {
        let (x, y) = separable_data();
        let mut model = LogisticRegression::new()
            .with_learning_rate(0.5)
            .with_max_iter(2000);
        model.fit(&x, &y).unwrap();
        assert!((model.score(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_predict_proba_ordering() {
        let (x, y) = separable_data();
        let mut model = LogisticRegression::new()
            .with_learning_rate(0.5)
            .with_max_iter(2000);
        model.fit(&x, &y).unwrap();
        let proba = model.predict_proba(&x);
        assert!(proba[0] < proba[5]);
        assert!(proba[0] < 0.5);
        assert!(proba[5] > 0.5);
    }

    #[test]
    fn test_coefficient_sign() {
        let (x, y) = separable_data();
        let mut model = LogisticRegression::new()
            .with_learning_rate(0.5)
            .with_max_iter(2000);
        model.fit(&x, &y).unwrap();
        // Positive feature pushes towards class 1.
        assert!(model.coefficients().unwrap()[0] > 0.0);
    }

    #[test]
    fn test_rejects_non_binary_labels() {
        let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).unwrap();
        let y = Vector::from_slice(&[0.0, 2.0]);
        let mut model = LogisticRegression::new();
        assert!(model.fit(&x, &y).is_err());
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).unwrap();
        let y = Vector::from_slice(&[0.0]);
        let mut model = LogisticRegression::new();
        assert!(model.fit(&x, &y).is_err());
    }

    #[test]
    fn test_rejects_empty_input() {
        let x = Matrix::from_vec(0, 1, Vec::new()).unwrap();
        let y = Vector::from_vec(Vec::new());
        let mut model = LogisticRegression::new();
        assert!(model.fit(&x, &y).is_err());
    }

    #[test]
    fn test_rejects_bad_learning_rate() {
        let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).unwrap();
        let y = Vector::from_slice(&[0.0, 1.0]);
        let mut model = LogisticRegression::new().with_learning_rate(0.0);
        assert!(model.fit(&x, &y).is_err());
    }

    #[test]
    fn test_predict_labels_are_binary() {
        let (x, y) = separable_data();
        let mut model = LogisticRegression::new().with_max_iter(200);
        model.fit(&x, &y).unwrap();
        for &p in model.predict(&x).iter() {
            assert!(p == 0.0 || p == 1.0);
        }
    }
}
