//! Phase 5: Threshold selection from the final training predictions.
//!
//! `Fixed` keeps one constant for every label. `Tuned` picks, per label, the
//! cut point with the fewest training misclassifications among: the default
//! 0.5, the midpoints between consecutive distinct confidences, and one cut
//! below / at the extremes. Ties go to the candidate closest to 0.5, then to
//! the smaller one.

use mlhn_core::config::defaults::DEFAULT_LABEL_THRESHOLD;
use mlhn_core::{ProcessedRecord, ThresholdStrategy};

use super::phase4_weight_training::RecordPrediction;

/// Thresholds in effect while training (before selection).
pub fn initial_thresholds(strategy: &ThresholdStrategy, num_labels: usize) -> Vec<f64> {
    match strategy {
        ThresholdStrategy::Fixed { value } => vec![*value; num_labels],
        ThresholdStrategy::Tuned => vec![DEFAULT_LABEL_THRESHOLD; num_labels],
    }
}

pub fn select_thresholds(
    strategy: &ThresholdStrategy,
    records: &[ProcessedRecord],
    predictions: &[RecordPrediction],
    num_labels: usize,
) -> Vec<f64> {
    match strategy {
        ThresholdStrategy::Fixed { value } => vec![*value; num_labels],
        ThresholdStrategy::Tuned => (0..num_labels)
            .map(|j| {
                let pairs: Vec<(f64, bool)> = records
                    .iter()
                    .zip(predictions)
                    .filter_map(|(r, p)| r.truth().map(|t| (p.confidences[j], t[j])))
                    .collect();
                tune_label(&pairs)
            })
            .collect(),
    }
}

/// Best cut point for one label's `(confidence, truth)` pairs.
fn tune_label(pairs: &[(f64, bool)]) -> f64 {
    let mut values: Vec<f64> = pairs.iter().map(|p| p.0).filter(|c| c.is_finite()).collect();
    values.sort_by(f64::total_cmp);
    values.dedup();

    let mut candidates = vec![DEFAULT_LABEL_THRESHOLD];
    if let (Some(&lo), Some(&hi)) = (values.first(), values.last()) {
        candidates.push(lo - 1e-6);
        candidates.push(hi);
    }
    candidates.extend(values.windows(2).map(|w| 0.5 * (w[0] + w[1])));

    let errors = |t: f64| pairs.iter().filter(|&&(c, truth)| (c > t) != truth).count();

    let mut best = DEFAULT_LABEL_THRESHOLD;
    let mut best_errors = errors(best);
    for &t in &candidates[1..] {
        let e = errors(t);
        let closer = (t - DEFAULT_LABEL_THRESHOLD).abs() < (best - DEFAULT_LABEL_THRESHOLD).abs();
        let tie_break = (t - DEFAULT_LABEL_THRESHOLD).abs()
            == (best - DEFAULT_LABEL_THRESHOLD).abs()
            && t < best;
        if e < best_errors || (e == best_errors && (closer || tie_break)) {
            best = t;
            best_errors = e;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_strategy_repeats_the_constant() {
        let t = select_thresholds(&ThresholdStrategy::Fixed { value: 0.3 }, &[], &[], 3);
        assert_eq!(t, vec![0.3, 0.3, 0.3]);
    }

    #[test]
    fn tuned_threshold_separates_low_confidence_positives() {
        let pairs = [(0.1, false), (0.2, false), (0.3, true), (0.35, true), (0.9, true)];
        let t = tune_label(&pairs);
        assert!((t - 0.25).abs() < 1e-12);
        assert_eq!(pairs.iter().filter(|&&(c, y)| (c > t) != y).count(), 0);
    }

    #[test]
    fn tuned_threshold_keeps_default_when_already_perfect() {
        let pairs = [(0.2, false), (0.8, true)];
        assert_eq!(tune_label(&pairs), 0.5);
    }

    #[test]
    fn tuned_threshold_on_single_class_labels_everything_consistently() {
        let pairs = [(0.6, false), (0.7, false)];
        let t = tune_label(&pairs);
        assert!(t >= 0.7);
    }
}
