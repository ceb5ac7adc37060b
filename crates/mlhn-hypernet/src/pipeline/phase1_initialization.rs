//! Phase 1: `edges_per_record` sampled edges per training record.

use mlhn_core::errors::MlhnResult;
use mlhn_core::ProcessedRecord;
use rand::RngCore;

use crate::edge::HyperEdge;
use crate::population::Population;
use crate::sampling::VertexSampler;

/// Build the initial population, record by record, in record order.
pub fn initialize(
    records: &[ProcessedRecord],
    edges_per_record: usize,
    order: usize,
    sampler: &dyn VertexSampler,
    rng: &mut dyn RngCore,
) -> MlhnResult<Population> {
    let mut edges = Vec::with_capacity(records.len() * edges_per_record);
    for source_index in 0..records.len() {
        for _ in 0..edges_per_record {
            edges.push(sample_edge(records, source_index, order, sampler, rng)?);
        }
    }
    Ok(Population::new(edges))
}

/// Draw a fresh edge from the record at `source_index`.
pub fn sample_edge(
    records: &[ProcessedRecord],
    source_index: usize,
    order: usize,
    sampler: &dyn VertexSampler,
    rng: &mut dyn RngCore,
) -> MlhnResult<HyperEdge> {
    let record = &records[source_index];
    let layout = sampler.sample_vertices(record, order, rng);
    HyperEdge::from_record(record, source_index, &layout)
}
