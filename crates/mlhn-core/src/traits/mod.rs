mod learner;

pub use learner::IMultiLabelLearner;
