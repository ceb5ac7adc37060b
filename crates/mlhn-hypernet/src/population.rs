//! The ordered hyperedge population.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::edge::HyperEdge;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    edges: Vec<HyperEdge>,
}

impl Population {
    pub fn new(edges: Vec<HyperEdge>) -> Self {
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[HyperEdge] {
        &self.edges
    }

    pub fn get(&self, index: usize) -> Option<&HyperEdge> {
        self.edges.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HyperEdge> {
        self.edges.iter()
    }

    pub(crate) fn edge_mut(&mut self, index: usize) -> &mut HyperEdge {
        &mut self.edges[index]
    }

    /// Swap in a new edge at `index`; the population length never changes.
    pub(crate) fn replace(&mut self, index: usize, edge: HyperEdge) {
        self.edges[index] = edge;
    }

    /// Stable sort, highest fitness first.
    pub fn sort_by_fitness_desc(&mut self) {
        self.edges.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Mean fitness over evaluated edges; 0.0 if none are evaluated.
    pub fn mean_fitness(&self) -> f64 {
        let (sum, n) = self
            .edges
            .iter()
            .filter(|e| e.is_evaluated())
            .fold((0.0, 0usize), |(s, n), e| (s + e.fitness(), n + 1));
        if n == 0 {
            0.0
        } else {
            sum / n as f64
        }
    }

    /// blake3 digest of every edge's vertices, stored values, votes and weights.
    ///
    /// Two populations with the same fingerprint predict identically.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.edges.len() as u64).to_le_bytes());
        for edge in &self.edges {
            hasher.update(&(edge.source_index() as u64).to_le_bytes());
            for &v in edge.vertices() {
                hasher.update(&(v as u64).to_le_bytes());
            }
            for &v in edge.stored_values() {
                hasher.update(&v.to_bits().to_le_bytes());
            }
            for &vote in edge.label() {
                hasher.update(&[vote as u8]);
            }
            for &w in edge.weight() {
                hasher.update(&w.to_bits().to_le_bytes());
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a HyperEdge;
    type IntoIter = std::slice::Iter<'a, HyperEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::ValueType;

    fn scored(fitness: f64, source: usize) -> HyperEdge {
        let mut e =
            HyperEdge::new(vec![0], vec![ValueType::Exact], vec![1.0], source, vec![true]).unwrap();
        e.assign_score(&[fitness], fitness);
        e
    }

    #[test]
    fn sorts_descending_and_keeps_ties_stable() {
        let mut p = Population::new(vec![scored(0.2, 0), scored(0.9, 1), scored(0.2, 2)]);
        p.sort_by_fitness_desc();
        let order: Vec<_> = p.iter().map(|e| e.source_index()).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn mean_ignores_unevaluated_edges() {
        let fresh = HyperEdge::new(vec![0], vec![ValueType::Exact], vec![1.0], 3, vec![true]).unwrap();
        let p = Population::new(vec![scored(0.4, 0), scored(0.8, 1), fresh]);
        assert!((p.mean_fitness() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn fingerprint_tracks_weights() {
        let a = Population::new(vec![scored(0.5, 0)]);
        let mut b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.edge_mut(0).update_weight(0.1, 0).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
