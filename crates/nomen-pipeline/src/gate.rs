//! Acceptance gate for positive seeding.

use nomen_core::{mean, SeedingThresholds};
use serde::Serialize;
use tracing::debug;

/// Why a document was (not) accepted as positive evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    Accepted,
    NoSurvivors,
    LowProbability,
    LowPaperRelevance,
    TooFewSurvivors,
}

impl GateDecision {
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

/// Thresholds are inclusive: a value equal to its threshold passes.
#[derive(Debug, Clone, Default)]
pub struct SeedingGate {
    thresholds: SeedingThresholds,
}

impl SeedingGate {
    pub fn new(thresholds: SeedingThresholds) -> Self {
        Self { thresholds }
    }

    /// Decide on a document from its surviving excerpt probabilities, its
    /// paper relevance and the number of excerpts originally windowed.
    pub fn evaluate(
        &self,
        probabilities: &[f64],
        paper_relevance: f64,
        windowed: usize,
    ) -> GateDecision {
        let Some(mean_probability) = mean(probabilities) else {
            return GateDecision::NoSurvivors;
        };
        let surviving = probabilities.len();

        let decision = if mean_probability < self.thresholds.min_probability {
            GateDecision::LowProbability
        } else if paper_relevance < self.thresholds.min_paper_relevance {
            GateDecision::LowPaperRelevance
        } else if (surviving as f64) < self.thresholds.min_survival_ratio * windowed as f64 {
            GateDecision::TooFewSurvivors
        } else {
            GateDecision::Accepted
        };

        debug!(
            "Gate: mean_probability={:.3}, paper_relevance={:.3}, surviving={}/{} -> {:?}",
            mean_probability, paper_relevance, surviving, windowed, decision
        );
        decision
    }
}
