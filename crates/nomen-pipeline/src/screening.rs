//! The excerpt chain shared by positive seeding and classification:
//! target relevance, windowing, entity check, name validation, keywords and
//! probability.

use std::collections::BTreeSet;

use nomen_core::{
    round_significant, DisambiguationContext, Document, EngineConfig, KeywordSet, Result,
};
use nomen_extract::{ExcerptExtractor, ExcerptWindow, NameValidation, RelevanceFilters};
use tracing::debug;

use crate::collaborators::Collaborators;
use crate::types::JobReport;

/// One excerpt that passed every filter.
#[derive(Debug, Clone)]
pub struct ScreenedExcerpt {
    pub window: ExcerptWindow,
    pub keywords: KeywordSet,
    pub special_keywords: KeywordSet,
    pub probability: f64,
}

/// A document with at least one surviving excerpt.
#[derive(Debug, Clone)]
pub struct ScreenedDocument {
    /// Excerpts selected by the extractor, before any filter.
    pub windowed: usize,
    pub excerpts: Vec<ScreenedExcerpt>,
}

impl ScreenedDocument {
    pub fn probabilities(&self) -> Vec<f64> {
        self.excerpts.iter().map(|e| e.probability).collect()
    }

    /// Distinct controlled-vocabulary concepts found across the excerpts.
    pub fn concept_count(&self) -> usize {
        self.excerpts
            .iter()
            .flat_map(|e| e.special_keywords.iter())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Compiled per-job extractor, filters and validators.
pub struct Screening {
    extractor: ExcerptExtractor,
    filters: RelevanceFilters,
    validation: NameValidation,
    significant_digits: u32,
}

impl Screening {
    pub fn new(
        ctx: &DisambiguationContext,
        config: &EngineConfig,
        collaborators: &Collaborators,
    ) -> Result<Self> {
        Ok(Self {
            extractor: ExcerptExtractor::new(ctx, config.window_tokens)?,
            filters: RelevanceFilters::new(ctx)?,
            validation: NameValidation::with_analyzer(
                collaborators.syntax.clone(),
                config.min_context_tokens,
            ),
            significant_digits: config.significant_digits,
        })
    }

    pub fn extractor(&self) -> &ExcerptExtractor {
        &self.extractor
    }

    pub fn filters(&self) -> &RelevanceFilters {
        &self.filters
    }

    /// Run the chain over one document. `None` when the document has no text,
    /// is about another body, or no excerpt survives.
    pub fn screen(
        &self,
        ctx: &DisambiguationContext,
        doc: &Document,
        collaborators: &Collaborators,
        report: &mut JobReport,
    ) -> Option<ScreenedDocument> {
        let text = doc.full_text();
        if text.trim().is_empty() {
            report.documents_without_text += 1;
            return None;
        }
        if !self.filters.determine_celestial_body_relevance(text) {
            debug!("{}: about another body", doc.bibcode);
            report.documents_off_target += 1;
            return None;
        }

        let selection = self.extractor.select_excerpts(text);
        report.window_candidates += selection.candidates;
        report.windows_excluded += selection.excluded;
        report.windows_duplicate += selection.duplicates;
        report.excerpts_windowed += selection.windows.len();
        let windowed = selection.windows.len();

        let mut excerpts = Vec::new();
        for window in selection.windows {
            if !collaborators
                .entities
                .is_entity_acceptable(&window.text, &window.window_span)
            {
                report.excerpts_entity_rejected += 1;
                continue;
            }
            if !self
                .validation
                .validate_feature_name(&window.text, ctx, &window.window_span, true)
            {
                report.excerpts_validation_rejected += 1;
                continue;
            }
            let keywords = collaborators.keywords.extract_keywords(&window.text);
            if keywords.is_empty() {
                report.excerpts_without_keywords += 1;
                continue;
            }
            let special_keywords = collaborators.keywords.extract_special_keywords(&window.text);
            let probability = round_significant(
                collaborators.probability.score_excerpt_probability(
                    &doc.title,
                    doc.abstract_text.as_deref(),
                    &window.text,
                ),
                self.significant_digits,
            );
            excerpts.push(ScreenedExcerpt {
                window,
                keywords,
                special_keywords,
                probability,
            });
        }
        report.excerpts_surviving += excerpts.len();

        debug!(
            "{}: {} of {} excerpts survived",
            doc.bibcode,
            excerpts.len(),
            windowed
        );
        if excerpts.is_empty() {
            report.documents_without_excerpts += 1;
            return None;
        }
        Some(ScreenedDocument { windowed, excerpts })
    }

    /// Document-level paper relevance.
    pub fn paper_relevance(
        &self,
        doc: &Document,
        screened: &ScreenedDocument,
        collaborators: &Collaborators,
    ) -> f64 {
        collaborators.relevance.score_paper_relevance(
            doc.full_text(),
            doc.venue.as_deref(),
            &doc.collections,
            &collaborators.main_venues,
            screened.concept_count(),
        )
    }
}
