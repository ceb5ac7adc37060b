use crate::errors::MlhnResult;
use crate::models::{MultiLabelDataset, MultiLabelOutput};

/// A multi-label classifier: trained on a dataset, then queried per instance.
///
/// The hypernetwork consumes any implementor as its base learner.
pub trait IMultiLabelLearner: Send + Sync {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &str;

    /// Train on the full dataset, replacing any previous state.
    fn build(&mut self, dataset: &MultiLabelDataset) -> MlhnResult<()>;

    /// Predict the bipartition and per-label confidences for one feature row.
    fn predict(&self, features: &[f64]) -> MlhnResult<MultiLabelOutput>;
}
