//! Shared fixtures for workspace tests and benches: seeded synthetic
//! multi-label data and scripted base learners.

use mlhn_core::errors::{LearnerError, MlhnResult};
use mlhn_core::{IMultiLabelLearner, MultiLabelDataset, MultiLabelOutput, ProcessedRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Dataset with `n` records, `num_features` uniform features in [0, 1) and
/// `num_labels` labels. Label `j` fires when feature `j % num_features` plus
/// noise exceeds 0.5; odd labels copy their predecessor 80% of the time so
/// there is label correlation to find.
pub fn correlated_dataset(
    n: usize,
    num_features: usize,
    num_labels: usize,
    seed: u64,
) -> MultiLabelDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut features = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for _ in 0..n {
        let x: Vec<f64> = (0..num_features).map(|_| rng.gen_range(0.0..1.0)).collect();
        let mut y = Vec::with_capacity(num_labels);
        for j in 0..num_labels {
            let own = x[j % num_features] + rng.gen_range(-0.15..0.15) > 0.5;
            let active = if j % 2 == 1 && rng.gen_bool(0.8) {
                y[j - 1]
            } else {
                own
            };
            y.push(active);
        }
        features.push(x);
        labels.push(y);
    }
    MultiLabelDataset::new(features, labels).expect("fixture dataset is well formed")
}

/// Processed records whose base predictions are noisy copies of the truth.
pub fn noisy_processed_records(n: usize, num_labels: usize, seed: u64) -> Vec<ProcessedRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let mut truth = Vec::with_capacity(num_labels);
            for j in 0..num_labels {
                let active = if j > 0 && rng.gen_bool(0.7) {
                    truth[j - 1]
                } else {
                    rng.gen_bool(0.4)
                };
                truth.push(active);
            }
            let confidences: Vec<f64> = truth
                .iter()
                .map(|&t| {
                    let centre = if t { 0.7 } else { 0.3 };
                    (centre + rng.gen_range(-0.3..0.3_f64)).clamp(0.0, 1.0)
                })
                .collect();
            let predicted: Vec<bool> = confidences.iter().map(|&c| c > 0.5).collect();
            ProcessedRecord::new(&predicted, &confidences, Some(truth))
                .expect("fixture record is well formed")
        })
        .collect()
}

/// Four records, two labels; feature 0 is the record id for `ScriptedLearner`.
pub fn four_record_dataset() -> MultiLabelDataset {
    MultiLabelDataset::new(
        vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]],
        vec![
            vec![true, false],
            vec![true, true],
            vec![false, true],
            vec![false, false],
        ],
    )
    .expect("fixture dataset is well formed")
}

/// Base outputs matching `four_record_dataset`, one per record id.
pub fn four_record_outputs() -> Vec<MultiLabelOutput> {
    [
        ([0.8, 0.3], [true, false]),
        ([0.9, 0.6], [true, true]),
        ([0.2, 0.7], [false, true]),
        ([0.4, 0.1], [false, false]),
    ]
    .into_iter()
    .map(|(c, b)| MultiLabelOutput {
        bipartition: b.to_vec(),
        confidences: c.to_vec(),
    })
    .collect()
}

/// Replays fixed outputs, selected by rounding feature 0 to a record id.
#[derive(Debug, Clone)]
pub struct ScriptedLearner {
    outputs: Vec<MultiLabelOutput>,
    built: bool,
}

impl ScriptedLearner {
    pub fn new(outputs: Vec<MultiLabelOutput>) -> Self {
        Self {
            outputs,
            built: false,
        }
    }
}

impl IMultiLabelLearner for ScriptedLearner {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn build(&mut self, _dataset: &MultiLabelDataset) -> MlhnResult<()> {
        self.built = true;
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> MlhnResult<MultiLabelOutput> {
        if !self.built {
            return Err(LearnerError::NotTrained {
                learner: self.name().to_string(),
            }
            .into());
        }
        let id = features.first().map(|v| v.round() as usize).unwrap_or(0);
        self.outputs.get(id).cloned().ok_or_else(|| {
            LearnerError::PredictFailed {
                learner: self.name().to_string(),
                reason: format!("no scripted output for record {id}"),
            }
            .into()
        })
    }
}

/// Where a `FailingLearner` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    Build,
    Predict,
}

/// Base learner that always fails at one point.
#[derive(Debug, Clone)]
pub struct FailingLearner {
    fail_at: FailurePoint,
}

impl FailingLearner {
    pub fn new(fail_at: FailurePoint) -> Self {
        Self { fail_at }
    }
}

impl IMultiLabelLearner for FailingLearner {
    fn name(&self) -> &str {
        "Failing"
    }

    fn build(&mut self, _dataset: &MultiLabelDataset) -> MlhnResult<()> {
        match self.fail_at {
            FailurePoint::Build => Err(LearnerError::BuildFailed {
                learner: self.name().to_string(),
                reason: "scripted build failure".to_string(),
            }
            .into()),
            FailurePoint::Predict => Ok(()),
        }
    }

    fn predict(&self, _features: &[f64]) -> MlhnResult<MultiLabelOutput> {
        Err(LearnerError::PredictFailed {
            learner: self.name().to_string(),
            reason: "scripted predict failure".to_string(),
        }
        .into())
    }
}
