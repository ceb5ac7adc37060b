use super::{ConfigError, DataError, EdgeError, LearnerError};

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum MlhnError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("hyperedge error: {0}")]
    Edge(#[from] EdgeError),

    #[error("learner error: {0}")]
    Learner(#[from] LearnerError),
}

pub type MlhnResult<T> = Result<T, MlhnError>;
