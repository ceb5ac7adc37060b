//! Fitness scoring: how well an edge's votes agree with the training records
//! it matches.
//!
//! Per label `j`, with `m` matched records of which `r_j` agree with the vote:
//!
//! ```text
//! w_j = r_j · ρ_j / (m + r_j · (ρ_j − 1))   if vote_j = 1 and ρ_j > 1
//! w_j = r_j / m                              otherwise
//! fitness = 0.5 · max_j w_j + 0.5 · mean_j w_j
//! ```
//!
//! where `ρ_j` is the label's positive/negative ratio over the training set.
//! An edge matching no record scores 0 everywhere.

use mlhn_core::ProcessedRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::edge::HyperEdge;

/// Positive/negative count ratio per label over the training records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelImbalance {
    ratios: Vec<f64>,
}

impl LabelImbalance {
    /// Labels without negative examples get ratio 1 (no reweighting).
    pub fn from_records(records: &[ProcessedRecord], num_labels: usize) -> Self {
        let mut positives = vec![0usize; num_labels];
        let mut negatives = vec![0usize; num_labels];
        for truth in records.iter().filter_map(ProcessedRecord::truth) {
            for (j, &active) in truth.iter().enumerate().take(num_labels) {
                if active {
                    positives[j] += 1;
                } else {
                    negatives[j] += 1;
                }
            }
        }
        let ratios = positives
            .iter()
            .zip(&negatives)
            .map(|(&p, &n)| if n == 0 { 1.0 } else { p as f64 / n as f64 })
            .collect();
        Self { ratios }
    }

    pub fn from_ratios(ratios: Vec<f64>) -> Self {
        Self { ratios }
    }

    pub fn ratio(&self, label: usize) -> f64 {
        self.ratios.get(label).copied().unwrap_or(1.0)
    }

    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }
}

/// Outcome of scoring one edge. Pure: computing it mutates nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessReport {
    /// Per-label correctness weights; seed values for weight training.
    pub weights: Vec<f64>,
    pub fitness: f64,
    /// Training records the edge matched.
    pub match_count: usize,
}

impl FitnessReport {
    pub fn is_degenerate(&self) -> bool {
        self.match_count == 0
    }

    /// Write weights and fitness into `edge`.
    pub fn apply(&self, edge: &mut HyperEdge) {
        edge.assign_score(&self.weights, self.fitness);
    }
}

/// Score `edge` against every training record.
pub fn score(
    edge: &HyperEdge,
    records: &[ProcessedRecord],
    match_threshold: f64,
    imbalance: &LabelImbalance,
) -> FitnessReport {
    let num_labels = edge.num_labels();
    let mut match_count = 0usize;
    let mut right = vec![0usize; num_labels];

    for record in records {
        if !edge.is_match(record, match_threshold) {
            continue;
        }
        match_count += 1;
        if let Some(agreement) = edge.classify(record) {
            for (count, agrees) in right.iter_mut().zip(agreement) {
                if agrees {
                    *count += 1;
                }
            }
        }
    }

    if match_count == 0 || num_labels == 0 {
        return FitnessReport {
            weights: vec![0.0; num_labels],
            fitness: 0.0,
            match_count,
        };
    }

    let m = match_count as f64;
    let weights: Vec<f64> = right
        .iter()
        .enumerate()
        .map(|(j, &r)| {
            let r = r as f64;
            let ratio = imbalance.ratio(j);
            if edge.label()[j] && ratio > 1.0 {
                r * ratio / (m + r * (ratio - 1.0))
            } else {
                r / m
            }
        })
        .collect();

    let max = weights.iter().copied().fold(f64::MIN, f64::max);
    let mean = weights.iter().sum::<f64>() / num_labels as f64;

    FitnessReport {
        weights,
        fitness: 0.5 * max + 0.5 * mean,
        match_count,
    }
}

/// Score a run of edges, on the rayon pool when `parallel` is set.
pub fn score_all(
    edges: &[HyperEdge],
    records: &[ProcessedRecord],
    match_threshold: f64,
    imbalance: &LabelImbalance,
    parallel: bool,
) -> Vec<FitnessReport> {
    if parallel {
        edges
            .par_iter()
            .map(|e| score(e, records, match_threshold, imbalance))
            .collect()
    } else {
        edges
            .iter()
            .map(|e| score(e, records, match_threshold, imbalance))
            .collect()
    }
}
