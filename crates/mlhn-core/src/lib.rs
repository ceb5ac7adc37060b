//! # mlhn-core
//!
//! Foundation crate for the multi-label hypernetwork.
//! Defines the processed-record model, the base learner contract, errors,
//! config, and tracing setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::{CorrelationType, HyperNetConfig, ReplacementPolicy, ThresholdStrategy};
pub use errors::{MlhnError, MlhnResult};
pub use models::{LabelVector, MultiLabelDataset, MultiLabelOutput, ProcessedRecord};
pub use traits::IMultiLabelLearner;
