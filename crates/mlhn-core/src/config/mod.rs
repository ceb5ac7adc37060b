pub mod defaults;
mod hypernet_config;

pub use hypernet_config::{CorrelationType, HyperNetConfig, ReplacementPolicy, ThresholdStrategy};
