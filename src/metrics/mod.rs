//! Evaluation metrics for the binary war-onset classifiers.

/// Classification accuracy.
///
/// accuracy = correct predictions / total predictions
///
/// # Panics
///
/// Panics if slices differ in length or are empty.
///
/// # Examples
///
/// ```
/// use contagio::metrics::accuracy;
///
/// let y_true = vec![0, 1, 1, 0];
/// let y_pred = vec![0, 1, 0, 0];
/// assert!((accuracy(&y_pred, &y_true) - 0.75).abs() < 1e-12);
/// ```
#[must_use]
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "vectors must have same length");
    assert!(!y_true.is_empty(), "vectors cannot be empty");

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    correct as f64 / y_true.len() as f64
}

/// Precision for the positive class: TP / (TP + FP).
///
/// Returns 0.0 when nothing was predicted positive.
///
/// # Panics
///
/// Panics if slices differ in length or are empty.
#[must_use]
pub fn precision(y_pred: &[usize], y_true: &[usize]) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "vectors must have same length");
    assert!(!y_true.is_empty(), "vectors cannot be empty");

    let tp = count_pairs(y_pred, y_true, 1, 1);
    let fp = count_pairs(y_pred, y_true, 1, 0);

    if tp + fp == 0 {
        return 0.0;
    }
    tp as f64 / (tp + fp) as f64
}

/// Recall for the positive class: TP / (TP + FN).
///
/// Returns 0.0 when there are no positive observations.
///
/// # Panics
///
/// Panics if slices differ in length or are empty.
#[must_use]
pub fn recall(y_pred: &[usize], y_true: &[usize]) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "vectors must have same length");
    assert!(!y_true.is_empty(), "vectors cannot be empty");

    let tp = count_pairs(y_pred, y_true, 1, 1);
    let fn_ = count_pairs(y_pred, y_true, 0, 1);

    if tp + fn_ == 0 {
        return 0.0;
    }
    tp as f64 / (tp + fn_) as f64
}

/// Binary cross-entropy (log loss) of predicted probabilities.
///
/// Probabilities are clipped away from 0 and 1 for numerical stability.
///
/// # Panics
///
/// Panics if slices differ in length or are empty.
///
/// # Examples
///
/// ```
/// use contagio::metrics::log_loss;
///
/// let loss = log_loss(&[0.9, 0.1], &[1.0, 0.0]);
/// assert!(loss < 0.2);
/// ```
#[must_use]
pub fn log_loss(y_proba: &[f64], y_true: &[f64]) -> f64 {
    assert_eq!(y_proba.len(), y_true.len(), "vectors must have same length");
    assert!(!y_true.is_empty(), "vectors cannot be empty");

    const EPS: f64 = 1e-15;

    let total: f64 = y_proba
        .iter()
        .zip(y_true.iter())
        .map(|(&p, &t)| {
            let p = p.clamp(EPS, 1.0 - EPS);
            -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
        })
        .sum();

    total / y_true.len() as f64
}

fn count_pairs(y_pred: &[usize], y_true: &[usize], pred: usize, truth: usize) -> usize {
    y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|&(&p, &t)| p == pred && t == truth)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_perfect() {
        let y = vec![0, 1, 1, 0];
        assert!((accuracy(&y, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_accuracy_partial() {
        let y_true = vec![0, 1, 1, 0];
        let y_pred = vec![1, 1, 1, 0];
        assert!((accuracy(&y_pred, &y_true) - 0.75).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_accuracy_length_mismatch_panics() {
        accuracy(&[0, 1], &[0]);
    }

    #[test]
    fn test_precision_recall() {
        // pred: TP at 1, FP at 2, FN at 3.
        let y_true = vec![1, 0, 1, 0];
        let y_pred = vec![1, 1, 0, 0];
        assert!((precision(&y_pred, &y_true) - 0.5).abs() < 1e-12);
        assert!((recall(&y_pred, &y_true) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_precision_no_positive_predictions() {
        let y_true = vec![1, 1];
        let y_pred = vec![0, 0];
        assert_eq!(precision(&y_pred, &y_true), 0.0);
    }

    #[test]
    fn test_recall_no_positive_truth() {
        let y_true = vec![0, 0];
        let y_pred = vec![1, 0];
        assert_eq!(recall(&y_pred, &y_true), 0.0);
    }

    #[test]
    fn test_log_loss_confident_correct_is_small() {
        let loss = log_loss(&[0.99, 0.01], &[1.0, 0.0]);
        assert!(loss < 0.05);
    }

    #[test]
    fn test_log_loss_confident_wrong_is_large() {
        let loss = log_loss(&[0.01, 0.99], &[1.0, 0.0]);
        assert!(loss > 3.0);
    }

    #[test]
    fn test_log_loss_clips_extremes() {
        // Exact 0/1 probabilities must not produce infinities.
        let loss = log_loss(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(loss.is_finite());
    }
}
