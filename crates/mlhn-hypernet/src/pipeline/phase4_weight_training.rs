//! Phase 4: Weight training.
//!
//! Each epoch predicts every training record from its matched edges, then for
//! every mispredicted label pushes up the weights of matched edges that voted
//! for the true value: by `learn_rate × (1 − conf)` for a true positive label,
//! by `learn_rate × conf` for a true negative one. Only weights change.

use mlhn_core::errors::MlhnResult;
use mlhn_core::tracing_setup::events;
use mlhn_core::ProcessedRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info_span;

use super::phase3_match_index::MatchIndex;
use crate::population::Population;
use crate::vote;

#[derive(Debug, Clone, Copy)]
pub struct WeightTrainingSettings {
    pub iterations: usize,
    pub learn_rate: f64,
    pub alpha: f64,
    pub parallel: bool,
}

/// Blended confidences and thresholded labels for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPrediction {
    pub confidences: Vec<f64>,
    pub labels: Vec<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightTrainingTrace {
    /// Training Hamming error at the start of each epoch.
    pub hamming_error: Vec<f64>,
    /// Weight updates applied per epoch.
    pub updates: Vec<usize>,
}

/// Predict every training record from its indexed edges.
pub fn predict_records(
    population: &Population,
    records: &[ProcessedRecord],
    index: &MatchIndex,
    thresholds: &[f64],
    alpha: f64,
    parallel: bool,
) -> Vec<RecordPrediction> {
    let predict = |(r, record): (usize, &ProcessedRecord)| -> RecordPrediction {
        let matched = index.matches(r).iter().filter_map(|&e| population.get(e));
        let confidences = vote::blended_confidences(record, matched, alpha);
        let labels = confidences
            .iter()
            .zip(thresholds)
            .map(|(&c, &t)| c > t)
            .collect();
        RecordPrediction {
            confidences,
            labels,
        }
    };
    if parallel {
        records.par_iter().enumerate().map(predict).collect()
    } else {
        records.iter().enumerate().map(predict).collect()
    }
}

/// Fraction of (record, label) pairs where prediction and truth disagree.
pub fn hamming_error(records: &[ProcessedRecord], predictions: &[RecordPrediction]) -> f64 {
    let mut wrong = 0usize;
    let mut total = 0usize;
    for (record, prediction) in records.iter().zip(predictions) {
        let Some(truth) = record.truth() else {
            continue;
        };
        total += truth.len();
        wrong += truth
            .iter()
            .zip(&prediction.labels)
            .filter(|(t, p)| t != p)
            .count();
    }
    if total == 0 {
        0.0
    } else {
        wrong as f64 / total as f64
    }
}

/// Apply one epoch of updates from `predictions`. Returns the update count.
pub fn update_epoch(
    population: &mut Population,
    records: &[ProcessedRecord],
    index: &MatchIndex,
    predictions: &[RecordPrediction],
    learn_rate: f64,
) -> MlhnResult<usize> {
    let mut updates = 0usize;
    for (r, (record, prediction)) in records.iter().zip(predictions).enumerate() {
        let Some(truth) = record.truth() else {
            continue;
        };
        for (j, &actual) in truth.iter().enumerate() {
            if prediction.labels[j] == actual {
                continue;
            }
            let conf = prediction.confidences[j];
            let delta = if actual {
                learn_rate * (1.0 - conf)
            } else {
                learn_rate * conf
            };
            for &e in index.matches(r) {
                let edge = population.edge_mut(e);
                if edge.label()[j] == actual {
                    edge.update_weight(delta, j)?;
                    updates += 1;
                }
            }
        }
    }
    Ok(updates)
}

/// Run every epoch, then predict once more with the trained weights.
pub fn train(
    population: &mut Population,
    records: &[ProcessedRecord],
    index: &MatchIndex,
    thresholds: &[f64],
    settings: &WeightTrainingSettings,
) -> MlhnResult<(WeightTrainingTrace, Vec<RecordPrediction>)> {
    let span = info_span!(
        "mlhn.train_weights",
        epochs = settings.iterations,
        records = records.len()
    );
    let _guard = span.enter();

    let mut trace = WeightTrainingTrace::default();
    for epoch in 0..settings.iterations {
        let predictions = predict_records(
            population,
            records,
            index,
            thresholds,
            settings.alpha,
            settings.parallel,
        );
        let error = hamming_error(records, &predictions);
        let updates = update_epoch(population, records, index, &predictions, settings.learn_rate)?;
        events::gradient_epoch(epoch, updates, error);
        trace.hamming_error.push(error);
        trace.updates.push(updates);
    }

    let final_predictions = predict_records(
        population,
        records,
        index,
        thresholds,
        settings.alpha,
        settings.parallel,
    );
    Ok((trace, final_predictions))
}
