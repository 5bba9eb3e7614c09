//! Seeding: collect positive or negative keyword evidence for one feature.

use nomen_core::{
    DisambiguationContext, Document, EngineConfig, KeywordSet, Polarity, Result, ScoreBundle,
};
use nomen_infer::{DocumentSource, SearchQuery};
use tracing::{debug, info};

use crate::collaborators::Collaborators;
use crate::gate::SeedingGate;
use crate::screening::Screening;
use crate::types::{DetailRecord, HistoryRecord, JobOutput, JobReport, RecordBatch, Workflow};

/// One seeding run for one feature and one polarity.
pub struct SeedingJob {
    ctx: DisambiguationContext,
    polarity: Polarity,
    collaborators: Collaborators,
    screening: Screening,
    gate: SeedingGate,
    /// Terms that mark a document as being about the feature itself.
    own_terms: Vec<String>,
}

impl SeedingJob {
    pub fn new(
        ctx: DisambiguationContext,
        config: &EngineConfig,
        collaborators: Collaborators,
        polarity: Polarity,
    ) -> Result<Self> {
        ctx.validate()?;
        let screening = Screening::new(&ctx, config, &collaborators)?;
        let own_terms = vec![
            ctx.feature_name.to_lowercase(),
            ctx.target.to_lowercase(),
            ctx.feature_type.to_lowercase(),
            ctx.feature_type_plural.to_lowercase(),
        ];
        Ok(Self {
            ctx,
            polarity,
            collaborators,
            screening,
            gate: SeedingGate::new(config.seeding.clone()),
            own_terms,
        })
    }

    pub fn positive(
        ctx: DisambiguationContext,
        config: &EngineConfig,
        collaborators: Collaborators,
    ) -> Result<Self> {
        Self::new(ctx, config, collaborators, Polarity::Positive)
    }

    pub fn negative(
        ctx: DisambiguationContext,
        config: &EngineConfig,
        collaborators: Collaborators,
    ) -> Result<Self> {
        Self::new(ctx, config, collaborators, Polarity::Negative)
    }

    pub fn context(&self) -> &DisambiguationContext {
        &self.ctx
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Fetch candidates from `source` and process them.
    pub fn run(&self, source: &dyn DocumentSource) -> Result<JobOutput> {
        let documents = source.fetch_documents(&SearchQuery::for_context(&self.ctx))?;
        Ok(self.process_documents(&documents))
    }

    pub fn process_documents(&self, documents: &[Document]) -> JobOutput {
        let mut output = JobOutput::default();
        output.report.documents_fetched = documents.len();
        for doc in documents {
            if let Some(batch) = self.process_document(doc, &mut output.report) {
                output.batches.push(batch);
            }
        }
        info!(
            "Seeding ({}) for {} on {}: {} of {} documents accepted",
            self.polarity,
            self.ctx.feature_name,
            self.ctx.target,
            output.report.documents_accepted,
            output.report.documents_fetched
        );
        output
    }

    /// Records for one document, or `None` when it contributes no evidence.
    pub fn process_document(&self, doc: &Document, report: &mut JobReport) -> Option<RecordBatch> {
        let batch = match self.polarity {
            Polarity::Positive => self.positive_evidence(doc, report),
            Polarity::Negative => self.negative_evidence(doc, report),
        };
        if batch.is_some() {
            report.documents_accepted += 1;
        }
        batch
    }

    fn history(&self, doc: &Document) -> HistoryRecord {
        HistoryRecord::new(&self.ctx, Workflow::Seeding, Some(self.polarity), &doc.bibcode)
    }

    fn positive_evidence(&self, doc: &Document, report: &mut JobReport) -> Option<RecordBatch> {
        let screened = self
            .screening
            .screen(&self.ctx, doc, &self.collaborators, report)?;
        let paper_relevance = self.screening.paper_relevance(doc, &screened, &self.collaborators);

        let decision = self
            .gate
            .evaluate(&screened.probabilities(), paper_relevance, screened.windowed);
        if !decision.is_accepted() {
            debug!("{}: rejected by gate ({:?})", doc.bibcode, decision);
            report.documents_rejected_by_gate += 1;
            return None;
        }

        let history = self.history(doc);
        let details = screened
            .excerpts
            .into_iter()
            .map(|e| DetailRecord {
                history_id: history.id,
                bibcode: doc.bibcode.clone(),
                excerpt: e.window.text,
                keywords: e.keywords,
                special_keywords: e.special_keywords,
                scores: ScoreBundle {
                    paper_relevance: Some(paper_relevance),
                    probability: Some(e.probability),
                    ..Default::default()
                },
            })
            .collect();
        Some(RecordBatch { history, details })
    }

    /// Negative evidence is document-level: a paper that never mentions the
    /// target or the feature type contributes its keywords minus the job's
    /// own terms.
    fn negative_evidence(&self, doc: &Document, report: &mut JobReport) -> Option<RecordBatch> {
        let text = format!(
            "{} {} {}",
            doc.title,
            doc.abstract_text.as_deref().unwrap_or(""),
            doc.body.as_deref().unwrap_or("")
        );
        if text.trim().is_empty() {
            report.documents_without_text += 1;
            return None;
        }
        if !self.screening.filters().is_context_non_planetary(&text) {
            debug!("{}: mentions the target context", doc.bibcode);
            report.documents_off_target += 1;
            return None;
        }

        let keywords = self
            .collaborators
            .keywords
            .extract_keywords_from_document(doc, &self.own_terms, false);
        if keywords.is_empty() {
            report.documents_without_keywords += 1;
            return None;
        }

        let excerpt = self
            .screening
            .extractor()
            .select_excerpts(doc.full_text())
            .windows
            .into_iter()
            .next()
            .map(|w| w.text)
            .unwrap_or_else(|| doc.title.clone());

        let history = self.history(doc);
        let detail = DetailRecord {
            history_id: history.id,
            bibcode: doc.bibcode.clone(),
            excerpt,
            keywords,
            special_keywords: KeywordSet::special(Vec::<String>::new()),
            scores: ScoreBundle::default(),
        };
        Some(RecordBatch {
            history,
            details: vec![detail],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use nomen_infer::ProbabilityScorer;

    struct ConstProbability(f64);

    impl ProbabilityScorer for ConstProbability {
        fn score_excerpt_probability(&self, _t: &str, _a: Option<&str>, _e: &str) -> f64 {
            self.0
        }
    }

    fn ctx() -> DisambiguationContext {
        DisambiguationContext::new("Rayleigh", "crater", "craters", "Mars")
    }

    fn collaborators(probability: f64) -> Collaborators {
        Collaborators::fallback().with_probability(Arc::new(ConstProbability(probability)))
    }

    fn planetary_doc() -> Document {
        Document::new("2019Icar..321..100A")
            .with_title("Ejecta of a martian crater")
            .with_abstract("Crater morphology on Mars.")
            .with_body(
                "High resolution images of the impact basin show that the ejecta blanket \
                 around Rayleigh crater on Mars extends far beyond the rim of the basin \
                 and overlaps older deposits.",
            )
            .with_collections(["astronomy"])
            .with_venue("Icarus")
    }

    #[test]
    fn test_positive_seeding_accepts_on_target_document() {
        let job = SeedingJob::positive(ctx(), &EngineConfig::default(), collaborators(0.9))
            .unwrap();
        let mut report = JobReport::default();
        let batch = job.process_document(&planetary_doc(), &mut report).unwrap();

        assert_eq!(batch.history.polarity, Some(Polarity::Positive));
        assert_eq!(batch.details.len(), 1);
        let detail = &batch.details[0];
        assert!(detail.excerpt.contains("Rayleigh crater"));
        assert!(!detail.keywords.is_empty());
        assert_eq!(detail.scores.probability, Some(0.9));
        assert!(detail.scores.paper_relevance.unwrap() >= 0.8);
        assert_eq!(detail.scores.knowledge_graph, None);
        assert_eq!(report.documents_accepted, 1);
    }

    #[test]
    fn test_positive_seeding_gate_rejects_low_probability() {
        let job = SeedingJob::positive(ctx(), &EngineConfig::default(), collaborators(0.1))
            .unwrap();
        let mut report = JobReport::default();
        assert!(job.process_document(&planetary_doc(), &mut report).is_none());
        assert_eq!(report.documents_rejected_by_gate, 1);
        assert_eq!(report.documents_accepted, 0);
    }

    #[test]
    fn test_negative_seeding_takes_document_keywords() {
        let job = SeedingJob::negative(ctx(), &EngineConfig::default(), collaborators(0.0))
            .unwrap();
        let doc = Document::new("2001ApOpt..40.1234B")
            .with_title("Rayleigh scattering in optical fibres")
            .with_body(
                "Rayleigh scattering limits attenuation in silica fibres at short wavelengths.",
            );
        let mut report = JobReport::default();
        let batch = job.process_document(&doc, &mut report).unwrap();

        assert_eq!(batch.history.polarity, Some(Polarity::Negative));
        let detail = &batch.details[0];
        assert!(detail.keywords.contains("scattering"));
        assert!(!detail.keywords.contains("rayleigh"));
        assert!(detail.special_keywords.is_empty());
    }

    #[test]
    fn test_negative_seeding_counts_documents_without_keywords() {
        let job = SeedingJob::negative(ctx(), &EngineConfig::default(), collaborators(0.0))
            .unwrap();
        // only the feature name and stop words remain
        let doc = Document::new("x").with_body("Rayleigh and the");
        let mut report = JobReport::default();
        assert!(job.process_document(&doc, &mut report).is_none());
        assert_eq!(report.documents_without_keywords, 1);
        assert_eq!(report.excerpts_without_keywords, 0);
        assert_eq!(report.documents_accepted, 0);
    }

    #[test]
    fn test_negative_seeding_skips_target_mentions() {
        let job = SeedingJob::negative(ctx(), &EngineConfig::default(), collaborators(0.0))
            .unwrap();
        let doc = Document::new("x").with_body("Rayleigh crater on Mars is old.");
        let mut report = JobReport::default();
        assert!(job.process_document(&doc, &mut report).is_none());
        assert_eq!(report.documents_off_target, 1);
    }

    #[test]
    fn test_invalid_context_is_rejected() {
        let bad = DisambiguationContext::new("", "crater", "craters", "Mars");
        let job = SeedingJob::positive(bad, &EngineConfig::default(), Collaborators::fallback());
        assert!(job.is_err());
    }
}
