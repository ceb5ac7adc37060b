//! HyperEdge: a conjunctive pattern over processed-record positions.
//!
//! Built from one training record, it stores that record's values at `order`
//! vertex positions and votes for the record's ground-truth labels with one
//! trainable weight per label. Vertices and votes never change after
//! construction; only weights and fitness do.

use std::collections::HashSet;

use mlhn_core::errors::{DataError, EdgeError, MlhnResult};
use mlhn_core::{LabelVector, ProcessedRecord};
use serde::{Deserialize, Serialize};

/// Fitness of an edge that has not been scored yet.
pub const UNEVALUATED_FITNESS: f64 = f64::NEG_INFINITY;

/// How a vertex compares its stored value against a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Discrete indicator; values must be equal.
    Exact,
    /// Continuous value; values must lie within the match threshold.
    Threshold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyperEdge {
    vertices: Vec<usize>,
    value_types: Vec<ValueType>,
    stored_values: Vec<f64>,
    source_index: usize,
    label: LabelVector,
    weight: Vec<f64>,
    fitness: f64,
}

impl HyperEdge {
    /// Build an edge from explicit parts. Weights start at 1.0.
    ///
    /// Vertex positions must be distinct and lie in `[0, 2 × label.len())`.
    pub fn new(
        vertices: Vec<usize>,
        value_types: Vec<ValueType>,
        stored_values: Vec<f64>,
        source_index: usize,
        label: LabelVector,
    ) -> MlhnResult<Self> {
        let order = vertices.len();
        if value_types.len() != order {
            return Err(EdgeError::LengthMismatch {
                field: "value_types",
                expected: order,
                actual: value_types.len(),
            }
            .into());
        }
        if stored_values.len() != order {
            return Err(EdgeError::LengthMismatch {
                field: "stored_values",
                expected: order,
                actual: stored_values.len(),
            }
            .into());
        }

        let limit = 2 * label.len();
        let mut seen = HashSet::with_capacity(order);
        for &vertex in &vertices {
            if vertex >= limit {
                return Err(EdgeError::VertexOutOfRange { vertex, limit }.into());
            }
            if !seen.insert(vertex) {
                return Err(EdgeError::DuplicateVertex { vertex }.into());
            }
        }

        let weight = vec![1.0; label.len()];
        Ok(Self {
            vertices,
            value_types,
            stored_values,
            source_index,
            label,
            weight,
            fitness: UNEVALUATED_FITNESS,
        })
    }

    /// Capture `record`'s values at the given vertices; vote for its ground truth.
    pub fn from_record(
        record: &ProcessedRecord,
        source_index: usize,
        layout: &[(usize, ValueType)],
    ) -> MlhnResult<Self> {
        let label = record
            .truth()
            .ok_or(DataError::MissingGroundTruth { row: source_index })?
            .to_vec();
        let limit = 2 * record.num_labels();

        let mut vertices = Vec::with_capacity(layout.len());
        let mut value_types = Vec::with_capacity(layout.len());
        let mut stored_values = Vec::with_capacity(layout.len());
        for &(vertex, value_type) in layout {
            let value = record
                .value(vertex)
                .ok_or(EdgeError::VertexOutOfRange { vertex, limit })?;
            vertices.push(vertex);
            value_types.push(value_type);
            stored_values.push(value);
        }

        Self::new(vertices, value_types, stored_values, source_index, label)
    }

    /// True iff every vertex satisfies its type-specific predicate.
    ///
    /// An edge without vertices matches nothing.
    pub fn is_match(&self, record: &ProcessedRecord, match_threshold: f64) -> bool {
        if self.vertices.is_empty() || self.stored_values.is_empty() {
            return false;
        }
        self.vertices
            .iter()
            .zip(&self.value_types)
            .zip(&self.stored_values)
            .all(|((&vertex, value_type), &stored)| match record.value(vertex) {
                None => false,
                Some(value) => match value_type {
                    ValueType::Exact => stored == value,
                    ValueType::Threshold => (stored - value).abs() <= match_threshold,
                },
            })
    }

    /// Per label, whether `record`'s ground truth agrees with this edge's vote.
    ///
    /// `None` for records without ground truth.
    pub fn classify(&self, record: &ProcessedRecord) -> Option<LabelVector> {
        let truth = record.truth()?;
        Some(
            self.label
                .iter()
                .zip(truth)
                .map(|(&vote, &actual)| vote == actual)
                .collect(),
        )
    }

    /// Add `delta` to one label's weight. Unclamped.
    pub fn update_weight(&mut self, delta: f64, label_index: usize) -> MlhnResult<()> {
        let num_labels = self.weight.len();
        let w = self
            .weight
            .get_mut(label_index)
            .ok_or(EdgeError::LabelIndexOutOfRange {
                index: label_index,
                num_labels,
            })?;
        *w += delta;
        Ok(())
    }

    /// Overwrite weights and fitness with the result of scoring.
    pub(crate) fn assign_score(&mut self, weights: &[f64], fitness: f64) {
        self.weight.copy_from_slice(weights);
        self.fitness = fitness;
    }

    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn value_types(&self) -> &[ValueType] {
        &self.value_types
    }

    pub fn stored_values(&self) -> &[f64] {
        &self.stored_values
    }

    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn label(&self) -> &[bool] {
        &self.label
    }

    pub fn weight(&self) -> &[f64] {
        &self.weight
    }

    pub fn num_labels(&self) -> usize {
        self.label.len()
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness != UNEVALUATED_FITNESS
    }
}
