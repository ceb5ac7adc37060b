/// Errors raised while constructing or mutating a hyperedge.
#[derive(Debug, thiserror::Error)]
pub enum EdgeError {
    #[error("hyperedge field {field} has length {actual}, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("hyperedge constrains vertex {vertex} more than once")]
    DuplicateVertex { vertex: usize },

    #[error("hyperedge vertex {vertex} is outside [0, {limit})")]
    VertexOutOfRange { vertex: usize, limit: usize },

    #[error("label index {index} is outside [0, {num_labels})")]
    LabelIndexOutOfRange { index: usize, num_labels: usize },
}
