use std::fmt;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{ConfigError, MlhnResult};

/// Which processed-record blocks a hyperedge may draw its vertices from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrelationType {
    /// Global: predicted bipartition block, exact match.
    #[serde(rename = "GC")]
    Global,
    /// Local: predicted confidence block, tolerance match.
    #[serde(rename = "LC")]
    Local,
    /// Global + local: each vertex picks its block by a fair coin.
    #[serde(rename = "GLC")]
    GlobalLocal,
}

impl fmt::Display for CorrelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Global => "GC",
            Self::Local => "LC",
            Self::GlobalLocal => "GLC",
        };
        f.write_str(tag)
    }
}

/// How resampled hyperedges enter the population during refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementPolicy {
    /// The resampled edge always replaces the low-fitness edge.
    Generational,
    /// The resampled edge replaces the low-fitness edge only if it scores
    /// at least as well, so mean fitness never drops between iterations.
    Elitist,
}

/// How per-label decision thresholds are chosen after weight training.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdStrategy {
    /// Every label uses the same constant threshold.
    Fixed { value: f64 },
    /// Each label picks the cut point minimising training misclassifications.
    Tuned,
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self::Fixed {
            value: defaults::DEFAULT_LABEL_THRESHOLD,
        }
    }
}

/// Hypernetwork construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperNetConfig {
    /// Hyperedges generated per training record.
    pub edges_per_record: usize,
    /// Evolutionary replacement rounds.
    pub replacement_iterations: usize,
    /// Weight training epochs.
    pub gradient_iterations: usize,
    /// Fraction of the population replaced in the first round.
    pub initial_replace_rate: f64,
    /// Step size for weight updates.
    pub learn_rate: f64,
    /// Tolerance for threshold-typed vertices.
    pub match_threshold: f64,
    /// Vertices per hyperedge.
    pub order: usize,
    /// Blend weight toward the base learner's confidence.
    pub alpha: f64,
    pub correlation_type: CorrelationType,
    /// Training data is already in processed-record form.
    pub is_processed_data: bool,
    pub replacement_policy: ReplacementPolicy,
    pub threshold_strategy: ThresholdStrategy,
    /// Seed for vertex sampling.
    pub seed: u64,
    /// Score edges and build the match index on the rayon pool.
    pub parallel: bool,
}

impl Default for HyperNetConfig {
    fn default() -> Self {
        Self {
            edges_per_record: defaults::DEFAULT_EDGES_PER_RECORD,
            replacement_iterations: defaults::DEFAULT_REPLACEMENT_ITERATIONS,
            gradient_iterations: defaults::DEFAULT_GRADIENT_ITERATIONS,
            initial_replace_rate: defaults::DEFAULT_INITIAL_REPLACE_RATE,
            learn_rate: defaults::DEFAULT_LEARN_RATE,
            match_threshold: defaults::DEFAULT_MATCH_THRESHOLD,
            order: defaults::DEFAULT_ORDER,
            alpha: defaults::DEFAULT_ALPHA,
            correlation_type: CorrelationType::GlobalLocal,
            is_processed_data: false,
            replacement_policy: ReplacementPolicy::Elitist,
            threshold_strategy: ThresholdStrategy::default(),
            seed: defaults::DEFAULT_SEED,
            parallel: defaults::DEFAULT_PARALLEL,
        }
    }
}

impl HyperNetConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(source: &str) -> MlhnResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every range that does not depend on the label count.
    pub fn validate(&self) -> MlhnResult<()> {
        if self.edges_per_record == 0 {
            return Err(ConfigError::invalid("edges_per_record", "must be at least 1").into());
        }
        if self.order == 0 {
            return Err(ConfigError::invalid("order", "must be at least 1").into());
        }
        if !(0.0..=1.0).contains(&self.initial_replace_rate) {
            return Err(ConfigError::invalid(
                "initial_replace_rate",
                format!("{} is outside [0, 1]", self.initial_replace_rate),
            )
            .into());
        }
        if !(self.learn_rate > 0.0 && self.learn_rate.is_finite()) {
            return Err(ConfigError::invalid(
                "learn_rate",
                format!("{} must be positive and finite", self.learn_rate),
            )
            .into());
        }
        if !(self.match_threshold >= 0.0 && self.match_threshold.is_finite()) {
            return Err(ConfigError::invalid(
                "match_threshold",
                format!("{} must be non-negative and finite", self.match_threshold),
            )
            .into());
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(
                ConfigError::invalid("alpha", format!("{} is outside [0, 1]", self.alpha)).into(),
            );
        }
        if let ThresholdStrategy::Fixed { value } = self.threshold_strategy {
            if !value.is_finite() {
                return Err(ConfigError::invalid(
                    "threshold_strategy.value",
                    format!("{value} is not finite"),
                )
                .into());
            }
        }
        Ok(())
    }

    /// Check `order` against the vertices a hyperedge can draw from.
    ///
    /// Each correlation type samples `order` distinct positions out of one
    /// label-sized block; `order` must stay strictly below `num_labels`.
    pub fn validate_for_labels(&self, num_labels: usize) -> MlhnResult<()> {
        self.validate()?;
        if self.order >= num_labels {
            return Err(ConfigError::OrderExceedsVertices {
                order: self.order,
                available: num_labels,
            }
            .into());
        }
        Ok(())
    }
}
