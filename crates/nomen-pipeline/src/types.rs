//! Pipeline output types: persistence records and job reports.

use chrono::{DateTime, Utc};
use nomen_core::{DisambiguationContext, KeywordSet, Polarity, ScoreBundle};
use serde::Serialize;
use uuid::Uuid;

/// Which workflow produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    Seeding,
    Classification,
}

/// One processed document of one job.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub workflow: Workflow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polarity: Option<Polarity>,
    pub feature_name: String,
    pub feature_type: String,
    pub target: String,
    pub bibcode: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(
        ctx: &DisambiguationContext,
        workflow: Workflow,
        polarity: Option<Polarity>,
        bibcode: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            workflow,
            polarity,
            feature_name: ctx.feature_name.clone(),
            feature_type: ctx.feature_type.clone(),
            target: ctx.target.clone(),
            bibcode: bibcode.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Scores in the form persisted and handed to legacy consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireScores {
    pub knowledge_graph_score: f64,
    pub paper_relevance_score: f64,
    pub probability_score: f64,
    pub label: String,
    pub confidence_score: f64,
}

/// One excerpt (or, for negative seeding, one document) of a history record.
#[derive(Debug, Clone, Serialize)]
pub struct DetailRecord {
    pub history_id: Uuid,
    pub bibcode: String,
    pub excerpt: String,
    pub keywords: KeywordSet,
    pub special_keywords: KeywordSet,
    pub scores: ScoreBundle,
}

impl DetailRecord {
    /// Typed scores flattened to the `-1` / `0` / `""` sentinel convention.
    pub fn wire_scores(&self) -> WireScores {
        let (label, confidence_score) = self
            .scores
            .prediction
            .as_ref()
            .map(|p| p.to_wire())
            .unwrap_or((String::new(), -1.0));
        WireScores {
            knowledge_graph_score: self
                .scores
                .knowledge_graph
                .map(|e| e.to_wire())
                .unwrap_or(-1.0),
            paper_relevance_score: self.scores.paper_relevance.unwrap_or(0.0),
            probability_score: self.scores.probability.unwrap_or(0.0),
            label,
            confidence_score,
        }
    }
}

/// Records emitted for one accepted document.
#[derive(Debug, Clone, Serialize)]
pub struct RecordBatch {
    pub history: HistoryRecord,
    pub details: Vec<DetailRecord>,
}

/// Per-stage counts of one job run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReport {
    pub documents_fetched: usize,
    pub documents_without_text: usize,
    pub documents_off_target: usize,
    pub documents_without_excerpts: usize,
    pub documents_without_keywords: usize,
    pub documents_rejected_by_gate: usize,
    pub documents_accepted: usize,
    pub window_candidates: usize,
    pub windows_excluded: usize,
    pub windows_duplicate: usize,
    pub excerpts_windowed: usize,
    pub excerpts_entity_rejected: usize,
    pub excerpts_validation_rejected: usize,
    pub excerpts_without_keywords: usize,
    pub excerpts_surviving: usize,
}

/// Everything a job run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobOutput {
    pub batches: Vec<RecordBatch>,
    pub report: JobReport,
}
