//! Relevance, probability and label/confidence capabilities.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::InferError;

/// Document-level "is this paper astronomically on-topic" score in `[0, 1]`.
pub trait RelevanceScorer: Send + Sync {
    fn score_paper_relevance(
        &self,
        text: &str,
        venue: Option<&str>,
        collections: &HashSet<String>,
        main_venues: &[String],
        existing_concept_count: usize,
    ) -> f64;
}

/// Local LLM estimate that an excerpt mentions the intended feature, in `[0, 1]`.
///
/// Returns 0 when the service is unreachable or the abstract is absent.
pub trait ProbabilityScorer: Send + Sync {
    fn score_excerpt_probability(
        &self,
        title: &str,
        abstract_text: Option<&str>,
        excerpt: &str,
    ) -> f64;
}

/// Raw classifier output: class value plus confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassPrediction {
    pub value: i64,
    pub confidence: f64,
}

/// Trained label/confidence classifier over the three fused scores.
pub trait LabelClassifier: Send + Sync {
    fn classify(
        &self,
        knowledge_graph_score: f64,
        paper_relevance_score: f64,
        probability_score: f64,
    ) -> Result<ClassPrediction, InferError>;
}

/// Probability scorer used when no local LLM is reachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProbabilityScorer;

impl ProbabilityScorer for NoopProbabilityScorer {
    fn score_excerpt_probability(
        &self,
        _title: &str,
        _abstract: Option<&str>,
        _excerpt: &str,
    ) -> f64 {
        0.0
    }
}

/// Classifier used when no trained model is loaded. Always fails, which the
/// pipeline turns into the undetermined sentinel.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLabelClassifier;

impl LabelClassifier for NoopLabelClassifier {
    fn classify(
        &self,
        _kg: f64,
        _relevance: f64,
        _probability: f64,
    ) -> Result<ClassPrediction, InferError> {
        Err(InferError::NotLoaded("label classifier".into()))
    }
}

/// Metadata heuristic: astronomy collections, main planetary venues, and
/// concepts already attached to the document.
#[derive(Debug, Clone)]
pub struct CollectionRelevanceScorer {
    pub astronomy_collections: Vec<String>,
}

impl Default for CollectionRelevanceScorer {
    fn default() -> Self {
        Self {
            astronomy_collections: vec!["astronomy".into(), "planetary".into()],
        }
    }
}

impl RelevanceScorer for CollectionRelevanceScorer {
    fn score_paper_relevance(
        &self,
        _text: &str,
        venue: Option<&str>,
        collections: &HashSet<String>,
        main_venues: &[String],
        existing_concept_count: usize,
    ) -> f64 {
        let mut score = 0.0;
        if collections.iter().any(|c| {
            self.astronomy_collections
                .iter()
                .any(|a| a.eq_ignore_ascii_case(c))
        }) {
            score += 0.4;
        }
        if let Some(venue) = venue {
            if main_venues.iter().any(|v| venue.eq_ignore_ascii_case(v)) {
                score += 0.4;
            }
        }
        score += 0.2 * (existing_concept_count.min(5) as f64 / 5.0);
        f64::min(score, 1.0)
    }
}
