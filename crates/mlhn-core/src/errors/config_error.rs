/// Configuration errors. Raised at construction, never mid-training.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("config parse error: {message}")]
    ParseError { message: String },

    #[error("hyperedge order {order} exceeds the {available} vertices available per block")]
    OrderExceedsVertices { order: usize, available: usize },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
