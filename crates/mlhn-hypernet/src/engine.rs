//! HyperNetworkLearner: implements IMultiLabelLearner on top of any base learner.

use chrono::Utc;
use mlhn_core::errors::{DataError, LearnerError, MlhnResult};
use mlhn_core::tracing_setup::events;
use mlhn_core::{
    HyperNetConfig, IMultiLabelLearner, MultiLabelDataset, MultiLabelOutput, ProcessedRecord,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info_span;

use crate::fitness::LabelImbalance;
use crate::pipeline;
use crate::population::Population;
use crate::report::TrainingReport;
use crate::sampling::{self, VertexSampler};
use crate::vote;

const LEARNER_NAME: &str = "MLHN";

/// State of a successfully trained hypernetwork.
#[derive(Debug, Clone)]
struct TrainedModel {
    num_labels: usize,
    population: Population,
    thresholds: Vec<f64>,
    imbalance: LabelImbalance,
}

/// Multi-label hypernetwork.
///
/// Refines a base learner's per-label confidences with votes from a
/// population of hyperedges capturing label correlations, blending the two
/// with `alpha`.
pub struct HyperNetworkLearner {
    config: HyperNetConfig,
    base_learner: Option<Box<dyn IMultiLabelLearner>>,
    sampler: Box<dyn VertexSampler>,
    model: Option<TrainedModel>,
}

impl HyperNetworkLearner {
    /// Create a learner without a base learner.
    ///
    /// Enough for processed data; unprocessed data needs
    /// [`set_base_learner`](Self::set_base_learner) before `build`.
    pub fn new(config: HyperNetConfig) -> MlhnResult<Self> {
        config.validate()?;
        let sampler = sampling::sampler_for(config.correlation_type);
        Ok(Self {
            config,
            base_learner: None,
            sampler,
            model: None,
        })
    }

    /// Create a learner refining `base_learner`.
    pub fn with_base_learner(
        config: HyperNetConfig,
        base_learner: Box<dyn IMultiLabelLearner>,
    ) -> MlhnResult<Self> {
        let mut learner = Self::new(config)?;
        learner.base_learner = Some(base_learner);
        Ok(learner)
    }

    pub fn set_base_learner(&mut self, base_learner: Box<dyn IMultiLabelLearner>) {
        self.base_learner = Some(base_learner);
        self.model = None;
    }

    pub fn config(&self) -> &HyperNetConfig {
        &self.config
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn population(&self) -> Option<&Population> {
        self.model.as_ref().map(|m| &m.population)
    }

    pub fn label_thresholds(&self) -> Option<&[f64]> {
        self.model.as_ref().map(|m| m.thresholds.as_slice())
    }

    pub fn label_imbalance(&self) -> Option<&LabelImbalance> {
        self.model.as_ref().map(|m| &m.imbalance)
    }

    /// Train on a dataset.
    ///
    /// With `is_processed_data` each feature row is read as
    /// `[predicted ; confidence]` (an optional trailing truth block is
    /// ignored) and ground truth comes from the label columns. Otherwise the
    /// base learner is trained and then run over the training set.
    ///
    /// Any failure leaves the learner untrained.
    pub fn build(&mut self, dataset: &MultiLabelDataset) -> MlhnResult<TrainingReport> {
        self.model = None;
        let num_labels = dataset.num_labels();
        self.config.validate_for_labels(num_labels)?;

        let records = if self.config.is_processed_data {
            dataset
                .rows()
                .enumerate()
                .map(|(i, (x, y))| {
                    ProcessedRecord::from_flat(x, num_labels, i)?.with_truth(y.to_vec())
                })
                .collect::<MlhnResult<Vec<_>>>()?
        } else {
            self.process_training_set(dataset)?
        };

        self.build_from_processed(&records)
    }

    /// Train directly on processed records. Each must carry ground truth.
    pub fn build_from_processed(
        &mut self,
        records: &[ProcessedRecord],
    ) -> MlhnResult<TrainingReport> {
        self.model = None;
        let started_at = Utc::now();

        let num_labels = records
            .first()
            .ok_or(DataError::EmptyDataset)?
            .num_labels();
        self.config.validate_for_labels(num_labels)?;
        for (row, record) in records.iter().enumerate() {
            if record.num_labels() != num_labels {
                return Err(DataError::LabelCountMismatch {
                    expected: num_labels,
                    actual: record.num_labels(),
                }
                .into());
            }
            if record.truth().is_none() {
                return Err(DataError::MissingGroundTruth { row }.into());
            }
        }

        let span = info_span!("mlhn.build", records = records.len(), num_labels = num_labels);
        let _guard = span.enter();
        events::training_started(
            records.len(),
            num_labels,
            &self.config.correlation_type.to_string(),
        );

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let output = pipeline::run_pipeline(
            records,
            num_labels,
            &self.config,
            self.sampler.as_ref(),
            &mut rng,
        )?;

        let report = TrainingReport {
            records: records.len(),
            num_labels,
            correlation_type: self.sampler.correlation_type(),
            population_size: output.population.len(),
            mean_fitness: output.refinement.mean_fitness,
            replaced: output.refinement.replaced,
            accepted: output.refinement.accepted,
            degenerate_scored: output.refinement.degenerate_scored,
            matched_pairs: output.matched_pairs,
            epoch_hamming_error: output.weight_training.hamming_error,
            final_hamming_error: output.final_hamming_error,
            thresholds: output.thresholds.clone(),
            fingerprint: output.population.fingerprint(),
            started_at,
            completed_at: Utc::now(),
        };
        events::training_completed(
            report.population_size,
            report.final_mean_fitness(),
            report.final_hamming_error,
        );

        self.model = Some(TrainedModel {
            num_labels,
            population: output.population,
            thresholds: output.thresholds,
            imbalance: output.imbalance,
        });
        Ok(report)
    }

    /// Predict one instance.
    ///
    /// Processed mode reads `features` as `[predicted ; confidence]` (any
    /// truth block is discarded); otherwise the base learner supplies them.
    pub fn predict(&self, features: &[f64]) -> MlhnResult<MultiLabelOutput> {
        let model = self.trained()?;
        let record = if self.config.is_processed_data {
            ProcessedRecord::from_flat(features, model.num_labels, 0)?.without_truth()
        } else {
            let base = self.base_learner()?;
            let output = base.predict(features)?;
            ProcessedRecord::from_output(&output, None)?
        };
        self.predict_processed(&record)
    }

    /// Predict from a processed record. Ground truth, if present, is not read.
    pub fn predict_processed(&self, record: &ProcessedRecord) -> MlhnResult<MultiLabelOutput> {
        let model = self.trained()?;
        if record.num_labels() != model.num_labels {
            return Err(DataError::LabelCountMismatch {
                expected: model.num_labels,
                actual: record.num_labels(),
            }
            .into());
        }

        let matched = model
            .population
            .iter()
            .filter(|e| e.is_match(record, self.config.match_threshold));
        let confidences = vote::blended_confidences(record, matched, self.config.alpha);
        let bipartition = confidences
            .iter()
            .zip(&model.thresholds)
            .map(|(&c, &t)| c > t)
            .collect();
        MultiLabelOutput::new(bipartition, confidences)
    }

    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> MlhnResult<Vec<MultiLabelOutput>> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    /// Train the base learner, then turn every training row into a processed record.
    fn process_training_set(
        &mut self,
        dataset: &MultiLabelDataset,
    ) -> MlhnResult<Vec<ProcessedRecord>> {
        let num_labels = dataset.num_labels();
        let base = self
            .base_learner
            .as_mut()
            .ok_or(LearnerError::MissingBaseLearner)?;
        base.build(dataset)?;

        dataset
            .rows()
            .map(|(x, y)| -> MlhnResult<ProcessedRecord> {
                let output = base.predict(x)?;
                if output.num_labels() != num_labels {
                    return Err(DataError::LabelCountMismatch {
                        expected: num_labels,
                        actual: output.num_labels(),
                    }
                    .into());
                }
                ProcessedRecord::from_output(&output, Some(y.to_vec()))
            })
            .collect()
    }

    fn trained(&self) -> MlhnResult<&TrainedModel> {
        self.model.as_ref().ok_or_else(|| {
            LearnerError::NotTrained {
                learner: LEARNER_NAME.to_string(),
            }
            .into()
        })
    }

    fn base_learner(&self) -> MlhnResult<&dyn IMultiLabelLearner> {
        self.base_learner
            .as_deref()
            .ok_or_else(|| LearnerError::MissingBaseLearner.into())
    }
}

impl IMultiLabelLearner for HyperNetworkLearner {
    fn name(&self) -> &str {
        LEARNER_NAME
    }

    fn build(&mut self, dataset: &MultiLabelDataset) -> MlhnResult<()> {
        HyperNetworkLearner::build(self, dataset).map(|_| ())
    }

    fn predict(&self, features: &[f64]) -> MlhnResult<MultiLabelOutput> {
        HyperNetworkLearner::predict(self, features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlhn_core::CorrelationType;

    fn processed_dataset() -> MultiLabelDataset {
        let features = vec![
            vec![1.0, 0.0, 0.9, 0.2],
            vec![1.0, 1.0, 0.8, 0.7],
            vec![0.0, 1.0, 0.3, 0.6],
            vec![0.0, 0.0, 0.1, 0.2],
        ];
        let labels = vec![
            vec![true, false],
            vec![true, true],
            vec![false, true],
            vec![false, false],
        ];
        MultiLabelDataset::new(features, labels).unwrap()
    }

    fn config() -> HyperNetConfig {
        HyperNetConfig {
            edges_per_record: 2,
            order: 1,
            replacement_iterations: 2,
            gradient_iterations: 2,
            correlation_type: CorrelationType::Global,
            is_processed_data: true,
            parallel: false,
            ..Default::default()
        }
    }

    #[test]
    fn predict_before_build_is_an_error() {
        let learner = HyperNetworkLearner::new(config()).unwrap();
        assert!(learner.predict(&[1.0, 0.0, 0.9, 0.2]).is_err());
    }

    #[test]
    fn unprocessed_build_without_base_learner_fails() {
        let mut learner = HyperNetworkLearner::new(HyperNetConfig {
            is_processed_data: false,
            ..config()
        })
        .unwrap();
        assert!(learner.build(&processed_dataset()).is_err());
        assert!(!learner.is_trained());
    }

    #[test]
    fn processed_build_and_predict() {
        let mut learner = HyperNetworkLearner::new(config()).unwrap();
        let report = learner.build(&processed_dataset()).unwrap();
        assert_eq!(report.population_size, 8);
        assert_eq!(learner.population().unwrap().len(), 8);
        assert_eq!(learner.label_thresholds().unwrap(), &[0.5, 0.5]);
        // Each label is on in two of four records.
        assert_eq!(learner.label_imbalance().unwrap().ratios(), &[1.0, 1.0]);
        assert!(report.duration_ms() >= 0);
        assert!(report.completed_at >= report.started_at);

        let out = learner.predict(&[1.0, 0.0, 0.9, 0.2]).unwrap();
        assert_eq!(out.num_labels(), 2);
        assert!(out.confidences.iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn order_above_label_count_fails_at_build() {
        let mut learner = HyperNetworkLearner::new(HyperNetConfig {
            order: 3,
            ..config()
        })
        .unwrap();
        assert!(learner.build(&processed_dataset()).is_err());
    }
}
