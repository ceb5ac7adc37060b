//! # mlhn-hypernet
//!
//! Multi-label hypernetwork (MLHN): refines a base learner's per-label
//! confidences with a population of hyperedges that capture global
//! (predicted bipartition) and local (predicted confidence) label correlation.
//!
//! ## Training pipeline
//!
//! | Phase | Work |
//! |-------|------|
//! | Initialization | `edges_per_record` sampled hyperedges per training record |
//! | Refinement | sort by fitness, resample the worst share, decay the share |
//! | Match index | matching edges per training record |
//! | Weight training | push up weights of outvoted correct edges |
//! | Thresholds | fixed or tuned per-label decision thresholds |
//!
//! Prediction blends `alpha × base confidence` with
//! `(1 − alpha) × positive vote share` of the matching edges.

pub mod edge;
pub mod engine;
pub mod fitness;
pub mod pipeline;
pub mod population;
pub mod report;
pub mod sampling;
pub mod vote;

pub use edge::{HyperEdge, ValueType};
pub use engine::HyperNetworkLearner;
pub use fitness::{FitnessReport, LabelImbalance};
pub use population::Population;
pub use report::TrainingReport;
pub use sampling::{sampler_for, VertexSampler};
