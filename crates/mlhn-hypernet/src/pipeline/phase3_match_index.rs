//! Phase 3: per training record, the population indices whose
//! edges match it.
//!
//! Built once after refinement. Weight training changes weights but never the
//! matching predicates, so the index stays valid until the population changes.

use mlhn_core::ProcessedRecord;
use rayon::prelude::*;

use crate::population::Population;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchIndex {
    matches: Vec<Vec<usize>>,
}

impl MatchIndex {
    pub fn build(
        population: &Population,
        records: &[ProcessedRecord],
        match_threshold: f64,
        parallel: bool,
    ) -> Self {
        let matching = |record: &ProcessedRecord| -> Vec<usize> {
            population
                .iter()
                .enumerate()
                .filter(|(_, edge)| edge.is_match(record, match_threshold))
                .map(|(i, _)| i)
                .collect()
        };
        let matches = if parallel {
            records.par_iter().map(matching).collect()
        } else {
            records.iter().map(matching).collect()
        };
        Self { matches }
    }

    /// Population indices matching record `record`.
    pub fn matches(&self, record: usize) -> &[usize] {
        &self.matches[record]
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Total (record, edge) match pairs.
    pub fn total_matches(&self) -> usize {
        self.matches.iter().map(Vec::len).sum()
    }
}
