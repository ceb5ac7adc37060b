//! # mlhn-learners
//!
//! Base multi-label learners usable under the hypernetwork.
//!
//! | Learner | Confidence for label `j` |
//! |---------|--------------------------|
//! | `LabelPriorLearner` | Training frequency of `j` (same for every instance) |
//! | `KnnLearner` | Smoothed share of the `k` nearest training records carrying `j` |

pub mod knn;
pub mod prior;

pub use knn::KnnLearner;
pub use prior::LabelPriorLearner;
