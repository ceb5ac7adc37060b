//! Vertex sampling policies, one per correlation type.
//!
//! Selected once when the learner is constructed; the initializer and the
//! refiner only ever talk to the trait.

use mlhn_core::{CorrelationType, ProcessedRecord};
use rand::seq::index;
use rand::{Rng, RngCore};

use crate::edge::ValueType;

pub trait VertexSampler: Send + Sync {
    fn correlation_type(&self) -> CorrelationType;

    /// Draw `order` distinct vertex positions for an edge built from `record`.
    ///
    /// `order` must stay below the record's label count.
    fn sample_vertices(
        &self,
        record: &ProcessedRecord,
        order: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<(usize, ValueType)>;
}

/// Predicted-bipartition block, exact match.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalSampler;

/// Predicted-confidence block, tolerance match.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSampler;

/// Per vertex, a fair coin picks the global or local block.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalLocalSampler;

impl VertexSampler for GlobalSampler {
    fn correlation_type(&self) -> CorrelationType {
        CorrelationType::Global
    }

    fn sample_vertices(
        &self,
        record: &ProcessedRecord,
        order: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<(usize, ValueType)> {
        index::sample(rng, record.num_labels(), order)
            .into_iter()
            .map(|v| (v, ValueType::Exact))
            .collect()
    }
}

impl VertexSampler for LocalSampler {
    fn correlation_type(&self) -> CorrelationType {
        CorrelationType::Local
    }

    fn sample_vertices(
        &self,
        record: &ProcessedRecord,
        order: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<(usize, ValueType)> {
        let l = record.num_labels();
        index::sample(rng, l, order)
            .into_iter()
            .map(|v| (v + l, ValueType::Threshold))
            .collect()
    }
}

impl VertexSampler for GlobalLocalSampler {
    fn correlation_type(&self) -> CorrelationType {
        CorrelationType::GlobalLocal
    }

    fn sample_vertices(
        &self,
        record: &ProcessedRecord,
        order: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<(usize, ValueType)> {
        let l = record.num_labels();
        let picks: Vec<usize> = index::sample(rng, l, order).into_vec();
        picks
            .into_iter()
            .map(|v| {
                if rng.gen_bool(0.5) {
                    (v + l, ValueType::Threshold)
                } else {
                    (v, ValueType::Exact)
                }
            })
            .collect()
    }
}

/// The sampler implementing `correlation`.
pub fn sampler_for(correlation: CorrelationType) -> Box<dyn VertexSampler> {
    match correlation {
        CorrelationType::Global => Box::new(GlobalSampler),
        CorrelationType::Local => Box::new(LocalSampler),
        CorrelationType::GlobalLocal => Box::new(GlobalLocalSampler),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(l: usize) -> ProcessedRecord {
        ProcessedRecord::new(&vec![true; l], &vec![0.5; l], Some(vec![false; l])).unwrap()
    }

    #[test]
    fn global_draws_distinct_exact_vertices_from_first_block() {
        let mut rng = StdRng::seed_from_u64(3);
        let r = record(6);
        for _ in 0..50 {
            let spec = GlobalSampler.sample_vertices(&r, 4, &mut rng);
            assert_eq!(spec.len(), 4);
            assert!(spec.iter().all(|&(v, t)| v < 6 && t == ValueType::Exact));
            let mut vs: Vec<_> = spec.iter().map(|s| s.0).collect();
            vs.sort_unstable();
            vs.dedup();
            assert_eq!(vs.len(), 4);
        }
    }

    #[test]
    fn local_draws_threshold_vertices_from_second_block() {
        let mut rng = StdRng::seed_from_u64(3);
        let r = record(5);
        let spec = LocalSampler.sample_vertices(&r, 5, &mut rng);
        assert!(spec
            .iter()
            .all(|&(v, t)| (5..10).contains(&v) && t == ValueType::Threshold));
    }

    #[test]
    fn global_local_types_follow_block() {
        let mut rng = StdRng::seed_from_u64(11);
        let r = record(8);
        let mut saw_local = false;
        let mut saw_global = false;
        for _ in 0..40 {
            for (v, t) in sampler_for(CorrelationType::GlobalLocal).sample_vertices(&r, 3, &mut rng) {
                if v >= 8 {
                    assert_eq!(t, ValueType::Threshold);
                    saw_local = true;
                } else {
                    assert_eq!(t, ValueType::Exact);
                    saw_global = true;
                }
            }
        }
        assert!(saw_local && saw_global);
    }
}
