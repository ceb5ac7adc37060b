/// Shape errors in training or inference data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("dataset contains no records")]
    EmptyDataset,

    #[error("label count mismatch: expected {expected}, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },

    #[error("{features} feature rows but {labels} label rows")]
    RecordCountMismatch { features: usize, labels: usize },

    #[error("row {row} has length {actual}, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("row {row} carries no ground-truth labels")]
    MissingGroundTruth { row: usize },
}
