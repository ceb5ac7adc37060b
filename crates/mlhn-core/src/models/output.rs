use serde::{Deserialize, Serialize};

use super::LabelVector;

use crate::errors::{DataError, MlhnResult};

/// Per-instance prediction of a multi-label learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLabelOutput {
    pub bipartition: LabelVector,
    pub confidences: Vec<f64>,
}

impl MultiLabelOutput {
    pub fn new(bipartition: LabelVector, confidences: Vec<f64>) -> MlhnResult<Self> {
        if bipartition.len() != confidences.len() {
            return Err(DataError::LabelCountMismatch {
                expected: bipartition.len(),
                actual: confidences.len(),
            }
            .into());
        }
        Ok(Self {
            bipartition,
            confidences,
        })
    }

    /// Threshold every confidence at `threshold` (strictly greater is positive).
    pub fn from_confidences(confidences: Vec<f64>, threshold: f64) -> Self {
        let bipartition = confidences.iter().map(|&c| c > threshold).collect();
        Self {
            bipartition,
            confidences,
        }
    }

    pub fn num_labels(&self) -> usize {
        self.bipartition.len()
    }
}
