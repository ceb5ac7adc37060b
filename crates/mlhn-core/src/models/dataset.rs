use serde::{Deserialize, Serialize};

use super::LabelVector;
use crate::errors::{DataError, MlhnResult};

/// A validated multi-label table: one feature row and one label row per record.
///
/// Every feature row has the same width and every label row has exactly
/// `num_labels` entries. Empty tables are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLabelDataset {
    num_labels: usize,
    num_features: usize,
    features: Vec<Vec<f64>>,
    labels: Vec<LabelVector>,
    label_names: Vec<String>,
}

impl MultiLabelDataset {
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<LabelVector>) -> MlhnResult<Self> {
        let Some(first_labels) = labels.first() else {
            return Err(DataError::EmptyDataset.into());
        };
        let num_labels = first_labels.len();
        if num_labels == 0 {
            return Err(DataError::LabelCountMismatch {
                expected: 1,
                actual: 0,
            }
            .into());
        }
        if features.len() != labels.len() {
            return Err(DataError::RecordCountMismatch {
                features: features.len(),
                labels: labels.len(),
            }
            .into());
        }
        let num_features = features.first().map(Vec::len).unwrap_or(0);

        for (row, (x, y)) in features.iter().zip(&labels).enumerate() {
            if y.len() != num_labels {
                return Err(DataError::LabelCountMismatch {
                    expected: num_labels,
                    actual: y.len(),
                }
                .into());
            }
            if x.len() != num_features {
                return Err(DataError::RowLengthMismatch {
                    row,
                    expected: num_features,
                    actual: x.len(),
                }
                .into());
            }
        }

        let label_names = (0..num_labels).map(|j| format!("label_{j}")).collect();
        Ok(Self {
            num_labels,
            num_features,
            features,
            labels,
            label_names,
        })
    }

    /// Replace the generated `label_{j}` names.
    pub fn with_label_names(mut self, names: Vec<String>) -> MlhnResult<Self> {
        if names.len() != self.num_labels {
            return Err(DataError::LabelCountMismatch {
                expected: self.num_labels,
                actual: names.len(),
            }
            .into());
        }
        self.label_names = names;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    pub fn features(&self, row: usize) -> Option<&[f64]> {
        self.features.get(row).map(Vec::as_slice)
    }

    pub fn labels(&self, row: usize) -> Option<&[bool]> {
        self.labels.get(row).map(Vec::as_slice)
    }

    /// Iterate `(features, labels)` pairs in record order.
    pub fn rows(&self) -> impl Iterator<Item = (&[f64], &[bool])> + '_ {
        self.features
            .iter()
            .zip(&self.labels)
            .map(|(x, y)| (x.as_slice(), y.as_slice()))
    }

    /// Number of records carrying each label.
    pub fn positive_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.num_labels];
        for y in &self.labels {
            for (count, &active) in counts.iter_mut().zip(y) {
                if active {
                    *count += 1;
                }
            }
        }
        counts
    }
}
