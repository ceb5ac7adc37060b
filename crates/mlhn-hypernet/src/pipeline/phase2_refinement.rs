//! Phase 2: evolutionary replacement of low-fitness edges.
//!
//! Each round sorts the population by fitness, resamples the worst
//! `round(len × rate)` edges from their own source records and rescores only
//! those. The rate decays by 0.9 per round. Under the elitist policy a
//! resampled edge is kept only if it scores at least as well as the edge it
//! would replace.

use mlhn_core::config::defaults::REPLACE_RATE_DECAY;
use mlhn_core::errors::MlhnResult;
use mlhn_core::tracing_setup::events;
use mlhn_core::{ProcessedRecord, ReplacementPolicy};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::info_span;

use super::phase1_initialization::sample_edge;
use crate::fitness::{self, LabelImbalance};
use crate::population::Population;
use crate::sampling::VertexSampler;

#[derive(Debug, Clone, Copy)]
pub struct RefinementSettings {
    pub iterations: usize,
    pub initial_replace_rate: f64,
    pub order: usize,
    pub match_threshold: f64,
    pub policy: ReplacementPolicy,
    pub parallel: bool,
}

/// What happened across the refinement rounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefinementTrace {
    /// Mean fitness after the initial scoring, then after each round.
    pub mean_fitness: Vec<f64>,
    /// Edges resampled per round.
    pub replaced: Vec<usize>,
    /// Resampled edges that entered the population per round.
    pub accepted: Vec<usize>,
    /// Scorings that matched no training record.
    pub degenerate_scored: usize,
}

/// Score the whole population, then run the replacement rounds.
pub fn refine(
    population: &mut Population,
    records: &[ProcessedRecord],
    imbalance: &LabelImbalance,
    sampler: &dyn VertexSampler,
    settings: &RefinementSettings,
    rng: &mut dyn RngCore,
) -> MlhnResult<RefinementTrace> {
    let span = info_span!(
        "mlhn.refine",
        population = population.len(),
        iterations = settings.iterations
    );
    let _guard = span.enter();

    let mut trace = RefinementTrace::default();

    let reports = fitness::score_all(
        population.edges(),
        records,
        settings.match_threshold,
        imbalance,
        settings.parallel,
    );
    for (i, report) in reports.iter().enumerate() {
        if report.is_degenerate() {
            trace.degenerate_scored += 1;
        }
        report.apply(population.edge_mut(i));
    }
    trace.mean_fitness.push(population.mean_fitness());

    let len = population.len();
    let mut rate = settings.initial_replace_rate;
    for iteration in 0..settings.iterations {
        population.sort_by_fitness_desc();

        let sub_num = ((len as f64 * rate).round() as usize).min(len);
        let start = len - sub_num;

        let mut candidates = Vec::with_capacity(sub_num);
        for i in start..len {
            let source = population.edges()[i].source_index();
            candidates.push(sample_edge(records, source, settings.order, sampler, rng)?);
        }
        let reports = fitness::score_all(
            &candidates,
            records,
            settings.match_threshold,
            imbalance,
            settings.parallel,
        );

        let mut accepted = 0usize;
        for (offset, (mut candidate, report)) in candidates.into_iter().zip(&reports).enumerate() {
            if report.is_degenerate() {
                trace.degenerate_scored += 1;
            }
            let slot = start + offset;
            let keep = match settings.policy {
                ReplacementPolicy::Generational => true,
                ReplacementPolicy::Elitist => report.fitness >= population.edges()[slot].fitness(),
            };
            if keep {
                report.apply(&mut candidate);
                population.replace(slot, candidate);
                accepted += 1;
            }
        }

        rate *= REPLACE_RATE_DECAY;
        let mean = population.mean_fitness();
        events::refinement_iteration(iteration, sub_num, accepted, mean);
        trace.mean_fitness.push(mean);
        trace.replaced.push(sub_num);
        trace.accepted.push(accepted);
    }

    if trace.degenerate_scored > 0 {
        events::degenerate_edges(trace.degenerate_scored, len);
    }
    Ok(trace)
}
