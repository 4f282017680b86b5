//! K-fold cross-validation for the regression harness.
//!
//! The study evaluates each model specification by k-fold CV over the
//! state-year rows; this module provides the splitter and the scoring loop.

use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Result;
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;

/// Per-fold scores from one cross-validation run.
#[derive(Debug, Clone)]
pub struct CrossValidationResult {
    /// Score for each fold.
    pub scores: Vec<f64>,
}

impl CrossValidationResult {
    /// Mean score across folds.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().sum::<f64>() / self.scores.len() as f64
    }

    /// Standard deviation of fold scores.
    #[must_use]
    pub fn std(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .scores
            .iter()
            .map(|&score| (score - mean).powi(2))
            .sum::<f64>()
            / self.scores.len() as f64;
        variance.sqrt()
    }

    /// Minimum fold score.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.scores.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Maximum fold score.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.scores
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// K-fold cross-validator.
///
/// Splits data into K consecutive folds; each fold serves once as the test
/// set while the remaining K-1 folds train.
///
/// # Example
///
/// ```
/// use contagio::model_selection::KFold;
///
/// let kfold = KFold::new(5).with_random_state(42);
/// let splits = kfold.split(10);
/// assert_eq!(splits.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    random_state: Option<u64>,
}

impl KFold {
    /// Create a K-fold splitter; `n_splits` should be at least 2.
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            random_state: None,
        }
    }

    /// Enable shuffling before splitting.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set a seed for reproducible shuffling (implies shuffle).
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self.shuffle = true;
        self
    }

    /// Generate (train, test) index pairs for each fold.
    #[must_use]
    pub fn split(&self, n_samples: usize) -> Vec<(Vec<usize>, Vec<usize>)> {
        let mut indices: Vec<usize> = (0..n_samples).collect();

        if self.shuffle {
            if let Some(seed) = self.random_state {
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                indices.shuffle(&mut rng);
            } else {
                let mut rng = rand::thread_rng();
                indices.shuffle(&mut rng);
            }
        }

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut result = Vec::with_capacity(self.n_splits);
        let mut start = 0;

        for i in 0..self.n_splits {
            let current_fold_size = if i < remainder {
                fold_size + 1
            } else {
                fold_size
            };
            let end = start + current_fold_size;

            let test_indices: Vec<usize> = indices[start..end].to_vec();
            let mut train_indices = Vec::with_capacity(n_samples - current_fold_size);
            train_indices.extend_from_slice(&indices[..start]);
            train_indices.extend_from_slice(&indices[end..]);

            result.push((train_indices, test_indices));
            start = end;
        }

        result
    }
}

/// Run cross-validation of an estimator over the folds of `cv`.
///
/// Clones the estimator per fold, trains on the train split, scores on the
/// test split.
///
/// # Errors
///
/// Propagates any fold's training failure.
///
/// # Example
///
/// ```
/// use contagio::classification::LogisticRegression;
/// use contagio::model_selection::{cross_validate, KFold};
/// use contagio::primitives::{Matrix, Vector};
///
/// let x = Matrix::from_vec(8, 1, vec![-4.0, -3.0, -2.0, -1.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
/// let y = Vector::from_slice(&[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
///
/// let model = LogisticRegression::new().with_learning_rate(0.5).with_max_iter(2000);
/// let kfold = KFold::new(4).with_random_state(7);
/// let results = cross_validate(&model, &x, &y, &kfold).unwrap();
/// assert_eq!(results.scores.len(), 4);
/// ```
pub fn cross_validate<E>(
    estimator: &E,
    x: &Matrix,
    y: &Vector,
    cv: &KFold,
) -> Result<CrossValidationResult>
where
    E: Estimator + Clone,
{
    let n_samples = x.shape().0;
    let splits = cv.split(n_samples);

    let mut scores = Vec::with_capacity(splits.len());

    for (train_idx, test_idx) in splits {
        let x_train = x.take_rows(&train_idx);
        let y_train = take_elements(y, &train_idx);
        let x_test = x.take_rows(&test_idx);
        let y_test = take_elements(y, &test_idx);

        let mut fold_model = estimator.clone();
        fold_model.fit(&x_train, &y_train)?;

        scores.push(fold_model.score(&x_test, &y_test));
    }

    Ok(CrossValidationResult { scores })
}

fn take_elements(v: &Vector, indices: &[usize]) -> Vector {
    Vector::from_vec(indices.iter().map(|&i| v[i]).collect())
}
