//! Vote aggregation shared by weight training and prediction.

use mlhn_core::ProcessedRecord;

use crate::edge::HyperEdge;

/// Summed weights of matched edges voting for and against one label.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LabelVote {
    pub positive: f64,
    pub negative: f64,
}

impl LabelVote {
    /// Share of the vote that is positive; 0 when nobody voted.
    pub fn positive_share(&self) -> f64 {
        let total = self.positive + self.negative;
        if total == 0.0 {
            0.0
        } else {
            self.positive / total
        }
    }
}

/// Sum per-label votes over `edges`.
pub fn tally<'a>(edges: impl IntoIterator<Item = &'a HyperEdge>, num_labels: usize) -> Vec<LabelVote> {
    let mut votes = vec![LabelVote::default(); num_labels];
    for edge in edges {
        for ((vote, &label), &weight) in votes.iter_mut().zip(edge.label()).zip(edge.weight()) {
            if label {
                vote.positive += weight;
            } else {
                vote.negative += weight;
            }
        }
    }
    votes
}

/// `alpha · base + (1 − alpha) · positive_share`.
pub fn blend(base_confidence: f64, vote: &LabelVote, alpha: f64) -> f64 {
    alpha * base_confidence + (1.0 - alpha) * vote.positive_share()
}

/// Blended confidences for `record` given the edges that match it.
pub fn blended_confidences<'a>(
    record: &ProcessedRecord,
    matched: impl IntoIterator<Item = &'a HyperEdge>,
    alpha: f64,
) -> Vec<f64> {
    let votes = tally(matched, record.num_labels());
    record
        .confidences()
        .iter()
        .zip(&votes)
        .map(|(&base, vote)| blend(base, vote, alpha))
        .collect()
}
