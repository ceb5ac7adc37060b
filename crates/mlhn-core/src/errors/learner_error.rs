/// Failures of the base learner or of the hypernetwork learner itself.
#[derive(Debug, thiserror::Error)]
pub enum LearnerError {
    #[error("learner {learner} failed to build: {reason}")]
    BuildFailed { learner: String, reason: String },

    #[error("learner {learner} failed to predict: {reason}")]
    PredictFailed { learner: String, reason: String },

    #[error("learner {learner} has not been trained")]
    NotTrained { learner: String },

    #[error("no base learner configured for unprocessed data")]
    MissingBaseLearner,
}
