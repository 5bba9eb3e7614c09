//! Document source capability.

use chrono::{DateTime, Utc};
use nomen_core::{DisambiguationContext, Document};
use serde::Serialize;
use tracing::debug;

use crate::error::InferError;

/// What a job asks the search backend for. The backend owns its query language.
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    pub feature_name: String,
    pub feature_type: String,
    pub target: String,
    pub cutoff: DateTime<Utc>,
}

impl SearchQuery {
    pub fn for_context(ctx: &DisambiguationContext) -> Self {
        Self {
            feature_name: ctx.feature_name.clone(),
            feature_type: ctx.feature_type.clone(),
            target: ctx.target.clone(),
            cutoff: ctx.cutoff,
        }
    }
}

/// Full-text search backend.
pub trait DocumentSource: Send + Sync {
    fn fetch_documents(&self, query: &SearchQuery) -> Result<Vec<Document>, InferError>;
}

/// Source over an in-memory document list (JSON fixtures, tests).
///
/// Returns documents whose text mentions the feature name and that were not
/// published after the cutoff. Undated documents are always returned.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: Vec<Document>,
}

impl InMemorySource {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

impl DocumentSource for InMemorySource {
    fn fetch_documents(&self, query: &SearchQuery) -> Result<Vec<Document>, InferError> {
        let cutoff = query.cutoff.date_naive();
        let documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|d| d.published.map_or(true, |p| p <= cutoff))
            .filter(|d| {
                d.full_text().contains(&query.feature_name)
                    || d.title.contains(&query.feature_name)
            })
            .cloned()
            .collect();
        debug!(
            "In-memory source: {} of {} documents match {}",
            documents.len(),
            self.documents.len(),
            query.feature_name
        );
        Ok(documents)
    }
}
