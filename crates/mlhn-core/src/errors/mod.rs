mod config_error;
mod data_error;
mod edge_error;
mod learner_error;
mod mlhn_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use edge_error::EdgeError;
pub use learner_error::LearnerError;
pub use mlhn_error::{MlhnError, MlhnResult};
