//! k-nearest-neighbour label voting.
//!
//! Confidence for label `j` is `(s + hits_j) / (2s + k)` with Laplace
//! smoothing `s`, where `hits_j` counts the `k` nearest training records
//! (Euclidean distance, ties by record order) carrying `j`. A training
//! instance is its own nearest neighbour.

use std::cmp::Ordering;

use mlhn_core::errors::{ConfigError, DataError, LearnerError, MlhnResult};
use mlhn_core::{IMultiLabelLearner, MultiLabelDataset, MultiLabelOutput};
use tracing::debug;

const NAME: &str = "kNN";

#[derive(Debug, Clone)]
pub struct KnnLearner {
    k: usize,
    smoothing: f64,
    threshold: f64,
    training: Option<MultiLabelDataset>,
}

impl KnnLearner {
    pub fn new(k: usize) -> MlhnResult<Self> {
        if k == 0 {
            return Err(ConfigError::InvalidValue {
                field: "k".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(Self {
            k,
            smoothing: 1.0,
            threshold: 0.5,
            training: None,
        })
    }

    /// Laplace smoothing `s`; 0 gives the raw neighbour share.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing.max(0.0);
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Indices of the `k` training records closest to `features`.
    fn neighbours(&self, training: &MultiLabelDataset, features: &[f64]) -> Vec<usize> {
        let mut distances: Vec<(usize, f64)> = training
            .rows()
            .enumerate()
            .map(|(i, (x, _))| (i, squared_distance(x, features)))
            .collect();
        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        distances.into_iter().take(self.k).map(|(i, _)| i).collect()
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl IMultiLabelLearner for KnnLearner {
    fn name(&self) -> &str {
        NAME
    }

    fn build(&mut self, dataset: &MultiLabelDataset) -> MlhnResult<()> {
        if dataset.is_empty() {
            return Err(DataError::EmptyDataset.into());
        }
        debug!(
            records = dataset.len(),
            k = self.k,
            "kNN stored training set"
        );
        self.training = Some(dataset.clone());
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> MlhnResult<MultiLabelOutput> {
        let training = self.training.as_ref().ok_or_else(|| LearnerError::NotTrained {
            learner: NAME.to_string(),
        })?;
        if features.len() != training.num_features() {
            return Err(DataError::RowLengthMismatch {
                row: 0,
                expected: training.num_features(),
                actual: features.len(),
            }
            .into());
        }

        let neighbours = self.neighbours(training, features);
        let mut hits = vec![0usize; training.num_labels()];
        for &i in &neighbours {
            let labels = training.labels(i).unwrap_or_default();
            for (h, &active) in hits.iter_mut().zip(labels) {
                if active {
                    *h += 1;
                }
            }
        }

        let denom = 2.0 * self.smoothing + neighbours.len() as f64;
        let confidences = hits
            .iter()
            .map(|&h| {
                if denom == 0.0 {
                    0.0
                } else {
                    (self.smoothing + h as f64) / denom
                }
            })
            .collect();
        Ok(MultiLabelOutput::from_confidences(confidences, self.threshold))
    }
}
