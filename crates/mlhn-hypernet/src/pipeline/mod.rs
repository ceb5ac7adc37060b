//! Training pipeline: initialization → refinement → match index →
//! weight training → threshold selection.

pub mod phase1_initialization;
pub mod phase2_refinement;
pub mod phase3_match_index;
pub mod phase4_weight_training;
pub mod phase5_thresholds;

use mlhn_core::errors::MlhnResult;
use mlhn_core::{HyperNetConfig, ProcessedRecord};
use rand::RngCore;

use crate::fitness::LabelImbalance;
use crate::population::Population;
use crate::sampling::VertexSampler;

pub use phase2_refinement::{RefinementSettings, RefinementTrace};
pub use phase3_match_index::MatchIndex;
pub use phase4_weight_training::{RecordPrediction, WeightTrainingSettings, WeightTrainingTrace};

/// Everything a successful pipeline run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub population: Population,
    pub imbalance: LabelImbalance,
    pub thresholds: Vec<f64>,
    pub refinement: RefinementTrace,
    pub weight_training: WeightTrainingTrace,
    pub matched_pairs: usize,
    /// Training Hamming error under the selected thresholds.
    pub final_hamming_error: f64,
}

/// Run all five phases over validated, ground-truth-carrying records.
pub fn run_pipeline(
    records: &[ProcessedRecord],
    num_labels: usize,
    config: &HyperNetConfig,
    sampler: &dyn VertexSampler,
    rng: &mut dyn RngCore,
) -> MlhnResult<PipelineOutput> {
    let imbalance = LabelImbalance::from_records(records, num_labels);

    let mut population = phase1_initialization::initialize(
        records,
        config.edges_per_record,
        config.order,
        sampler,
        rng,
    )?;

    let refinement = phase2_refinement::refine(
        &mut population,
        records,
        &imbalance,
        sampler,
        &RefinementSettings {
            iterations: config.replacement_iterations,
            initial_replace_rate: config.initial_replace_rate,
            order: config.order,
            match_threshold: config.match_threshold,
            policy: config.replacement_policy,
            parallel: config.parallel,
        },
        rng,
    )?;

    let index = MatchIndex::build(&population, records, config.match_threshold, config.parallel);

    let initial = phase5_thresholds::initial_thresholds(&config.threshold_strategy, num_labels);
    let (weight_training, predictions) = phase4_weight_training::train(
        &mut population,
        records,
        &index,
        &initial,
        &WeightTrainingSettings {
            iterations: config.gradient_iterations,
            learn_rate: config.learn_rate,
            alpha: config.alpha,
            parallel: config.parallel,
        },
    )?;

    let thresholds = phase5_thresholds::select_thresholds(
        &config.threshold_strategy,
        records,
        &predictions,
        num_labels,
    );
    let relabelled: Vec<RecordPrediction> = predictions
        .into_iter()
        .map(|p| RecordPrediction {
            labels: p
                .confidences
                .iter()
                .zip(&thresholds)
                .map(|(&c, &t)| c > t)
                .collect(),
            confidences: p.confidences,
        })
        .collect();
    let final_hamming_error = phase4_weight_training::hamming_error(records, &relabelled);

    Ok(PipelineOutput {
        population,
        imbalance,
        thresholds,
        refinement,
        weight_training,
        matched_pairs: index.total_matches(),
        final_hamming_error,
    })
}
