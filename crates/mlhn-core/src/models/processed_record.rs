//! The per-instance representation the hypernetwork works on.
//!
//! Logically a `3 × L` vector: predicted bipartition, predicted confidence,
//! ground truth. Hyperedge vertices index into the first `2 × L` positions
//! only, so those are stored contiguously; ground truth is kept apart and is
//! absent for records built at inference time.

use serde::{Deserialize, Serialize};

use super::{LabelVector, MultiLabelOutput};
use crate::errors::{DataError, MlhnResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    num_labels: usize,
    /// `[predicted (0/1) ; confidence]`, length `2 × num_labels`.
    values: Vec<f64>,
    truth: Option<LabelVector>,
}

impl ProcessedRecord {
    pub fn new(
        predicted: &[bool],
        confidences: &[f64],
        truth: Option<LabelVector>,
    ) -> MlhnResult<Self> {
        let num_labels = predicted.len();
        if confidences.len() != num_labels {
            return Err(DataError::LabelCountMismatch {
                expected: num_labels,
                actual: confidences.len(),
            }
            .into());
        }
        if let Some(t) = &truth {
            if t.len() != num_labels {
                return Err(DataError::LabelCountMismatch {
                    expected: num_labels,
                    actual: t.len(),
                }
                .into());
            }
        }

        let mut values = Vec::with_capacity(2 * num_labels);
        values.extend(predicted.iter().map(|&p| if p { 1.0 } else { 0.0 }));
        values.extend_from_slice(confidences);
        Ok(Self {
            num_labels,
            values,
            truth,
        })
    }

    /// Assemble a record from a base learner's output.
    pub fn from_output(output: &MultiLabelOutput, truth: Option<LabelVector>) -> MlhnResult<Self> {
        Self::new(&output.bipartition, &output.confidences, truth)
    }

    /// Read a flat row of `2 × L` (no truth) or `3 × L` values.
    ///
    /// Bipartition entries above 0.5 count as positive; so do truth entries.
    pub fn from_flat(row: &[f64], num_labels: usize, row_index: usize) -> MlhnResult<Self> {
        let l = num_labels;
        let truth = match row.len() {
            n if n == 2 * l => None,
            n if n == 3 * l => Some(row[2 * l..].iter().map(|&v| v > 0.5).collect()),
            n => {
                return Err(DataError::RowLengthMismatch {
                    row: row_index,
                    expected: 3 * l,
                    actual: n,
                }
                .into())
            }
        };
        let predicted: Vec<bool> = row[..l].iter().map(|&v| v > 0.5).collect();
        Self::new(&predicted, &row[l..2 * l], truth)
    }

    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    /// Value at a vertex position in `[0, 2L)`.
    pub fn value(&self, vertex: usize) -> Option<f64> {
        self.values.get(vertex).copied()
    }

    /// The `[predicted ; confidence]` block hyperedges match against.
    pub fn vertex_values(&self) -> &[f64] {
        &self.values
    }

    /// Predicted bipartition entry for `label`; `None` past the label block.
    pub fn predicted_label(&self, label: usize) -> Option<bool> {
        if label < self.num_labels {
            Some(self.values[label] > 0.5)
        } else {
            None
        }
    }

    pub fn confidences(&self) -> &[f64] {
        &self.values[self.num_labels..]
    }

    pub fn truth(&self) -> Option<&[bool]> {
        self.truth.as_deref()
    }

    /// Replace the ground truth, e.g. from the dataset's label columns.
    pub fn with_truth(mut self, truth: LabelVector) -> MlhnResult<Self> {
        if truth.len() != self.num_labels {
            return Err(DataError::LabelCountMismatch {
                expected: self.num_labels,
                actual: truth.len(),
            }
            .into());
        }
        self.truth = Some(truth);
        Ok(self)
    }

    /// Drop the ground truth so the record is safe to feed to inference.
    pub fn without_truth(mut self) -> Self {
        self.truth = None;
        self
    }
}
