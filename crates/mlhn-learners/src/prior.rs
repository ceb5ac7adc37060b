use mlhn_core::errors::{DataError, LearnerError, MlhnResult};
use mlhn_core::{IMultiLabelLearner, MultiLabelDataset, MultiLabelOutput};

const NAME: &str = "LabelPrior";

/// Predicts every label at its training frequency, ignoring features.
#[derive(Debug, Clone)]
pub struct LabelPriorLearner {
    threshold: f64,
    priors: Option<Vec<f64>>,
}

impl LabelPriorLearner {
    pub fn new() -> Self {
        Self::with_threshold(0.5)
    }

    /// Labels with prior strictly above `threshold` are predicted positive.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            priors: None,
        }
    }

    pub fn priors(&self) -> Option<&[f64]> {
        self.priors.as_deref()
    }
}

impl Default for LabelPriorLearner {
    fn default() -> Self {
        Self::new()
    }
}

impl IMultiLabelLearner for LabelPriorLearner {
    fn name(&self) -> &str {
        NAME
    }

    fn build(&mut self, dataset: &MultiLabelDataset) -> MlhnResult<()> {
        if dataset.is_empty() {
            return Err(DataError::EmptyDataset.into());
        }
        let n = dataset.len() as f64;
        self.priors = Some(
            dataset
                .positive_counts()
                .into_iter()
                .map(|c| c as f64 / n)
                .collect(),
        );
        Ok(())
    }

    fn predict(&self, _features: &[f64]) -> MlhnResult<MultiLabelOutput> {
        let priors = self.priors.as_ref().ok_or_else(|| LearnerError::NotTrained {
            learner: NAME.to_string(),
        })?;
        Ok(MultiLabelOutput::from_confidences(priors.clone(), self.threshold))
    }
}
