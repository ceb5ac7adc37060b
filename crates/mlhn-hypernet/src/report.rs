use chrono::{DateTime, Utc};
use mlhn_core::CorrelationType;
use serde::{Deserialize, Serialize};

/// Summary of one `build` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub records: usize,
    pub num_labels: usize,
    pub correlation_type: CorrelationType,
    pub population_size: usize,
    /// Mean fitness after initial scoring, then after each refinement round.
    pub mean_fitness: Vec<f64>,
    /// Edges resampled per refinement round.
    pub replaced: Vec<usize>,
    /// Resampled edges kept per refinement round.
    pub accepted: Vec<usize>,
    /// Scorings whose edge matched no training record.
    pub degenerate_scored: usize,
    /// (record, edge) pairs in the match index.
    pub matched_pairs: usize,
    /// Training Hamming error at the start of each weight-training epoch.
    pub epoch_hamming_error: Vec<f64>,
    /// Training Hamming error of the finished model.
    pub final_hamming_error: f64,
    pub thresholds: Vec<f64>,
    /// blake3 digest of the trained population.
    pub fingerprint: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl TrainingReport {
    /// Mean fitness of the final population.
    pub fn final_mean_fitness(&self) -> f64 {
        self.mean_fitness.last().copied().unwrap_or(0.0)
    }

    pub fn duration_ms(&self) -> i64 {
        (self.completed_at - self.started_at).num_milliseconds()
    }
}
