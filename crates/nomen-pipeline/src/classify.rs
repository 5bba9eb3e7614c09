//! Classification: score new mentions against collected evidence.

use nomen_core::{DisambiguationContext, Document, EngineConfig, Evidence, KeywordSet, Result};
use nomen_graph::RelevanceGraph;
use nomen_infer::{DocumentSource, SearchQuery};
use tracing::{debug, info};

use crate::collaborators::Collaborators;
use crate::fusion::{fuse_document, relevance_ratio, DocumentFusion};
use crate::screening::Screening;
use crate::types::{DetailRecord, HistoryRecord, JobOutput, JobReport, RecordBatch, Workflow};

/// Positive and negative relevance graphs of one feature.
#[derive(Debug)]
pub struct EvidenceGraphs {
    pub positive: RelevanceGraph,
    pub negative: RelevanceGraph,
    significant_digits: u32,
}

impl EvidenceGraphs {
    pub fn new(
        positive: RelevanceGraph,
        negative: RelevanceGraph,
        significant_digits: u32,
    ) -> Self {
        Self {
            positive,
            negative,
            significant_digits,
        }
    }

    /// Build both graphs from stored seeding details.
    pub fn from_records(
        feature_name: &str,
        positive: &[DetailRecord],
        negative: &[DetailRecord],
        significant_digits: u32,
    ) -> Self {
        let build = |records: &[DetailRecord]| {
            let regular: Vec<KeywordSet> = records.iter().map(|r| r.keywords.clone()).collect();
            let special: Vec<KeywordSet> =
                records.iter().map(|r| r.special_keywords.clone()).collect();
            RelevanceGraph::build(feature_name, &regular, &special, significant_digits)
        };
        Self::new(build(positive), build(negative), significant_digits)
    }

    /// Knowledge-graph ratio of one excerpt's keywords.
    pub fn score(&self, keywords: &KeywordSet, special_keywords: &KeywordSet) -> Evidence {
        let merged = KeywordSet::regular(keywords.iter().chain(special_keywords.iter()));
        relevance_ratio(
            self.positive.score(&merged),
            self.negative.score(&merged),
            self.significant_digits,
        )
    }
}

/// One classification run for one feature.
pub struct ClassificationJob {
    ctx: DisambiguationContext,
    collaborators: Collaborators,
    screening: Screening,
    graphs: EvidenceGraphs,
    significant_digits: u32,
}

impl ClassificationJob {
    pub fn new(
        ctx: DisambiguationContext,
        config: &EngineConfig,
        collaborators: Collaborators,
        graphs: EvidenceGraphs,
    ) -> Result<Self> {
        ctx.validate()?;
        let screening = Screening::new(&ctx, config, &collaborators)?;
        info!(
            "Classification for {} on {}: positive graph built={}, negative graph built={}",
            ctx.feature_name,
            ctx.target,
            graphs.positive.is_built(),
            graphs.negative.is_built()
        );
        Ok(Self {
            ctx,
            collaborators,
            screening,
            graphs,
            significant_digits: config.significant_digits,
        })
    }

    pub fn context(&self) -> &DisambiguationContext {
        &self.ctx
    }

    pub fn graphs(&self) -> &EvidenceGraphs {
        &self.graphs
    }

    /// Fetch candidates from `source` and classify them.
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
            "Classification for {}: {} of {} documents labeled",
            self.ctx.feature_name, output.report.documents_accepted, output.report.documents_fetched
        );
        output
    }

    /// Score every surviving excerpt, fuse per document, and write the
    /// document's fused scores onto each of its records.
    pub fn process_document(&self, doc: &Document, report: &mut JobReport) -> Option<RecordBatch> {
        let screened = self
            .screening
            .screen(&self.ctx, doc, &self.collaborators, report)?;
        let paper_relevance = self.screening.paper_relevance(doc, &screened, &self.collaborators);

        let ratios: Vec<Evidence> = screened
            .excerpts
            .iter()
            .map(|e| self.graphs.score(&e.keywords, &e.special_keywords))
            .collect();
        let fusion = DocumentFusion::from_excerpts(
            &ratios,
            &screened.probabilities(),
            paper_relevance,
            self.significant_digits,
        );
        let prediction = fuse_document(
            &fusion,
            self.collaborators.classifier.as_ref(),
            &self.ctx.labels,
            self.significant_digits,
        );
        debug!("{}: {:?} -> {:?}", doc.bibcode, fusion, prediction);

        let history = HistoryRecord::new(&self.ctx, Workflow::Classification, None, &doc.bibcode);
        let scores = fusion.bundle(prediction);
        let details = screened
            .excerpts
            .into_iter()
            .map(|e| DetailRecord {
                history_id: history.id,
                bibcode: doc.bibcode.clone(),
                excerpt: e.window.text,
                keywords: e.keywords,
                special_keywords: e.special_keywords,
                scores: scores.clone(),
            })
            .collect();
        report.documents_accepted += 1;
        Some(RecordBatch { history, details })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use nomen_infer::{
        ClassPrediction, InferError, KeywordExtractor, LabelClassifier, ProbabilityScorer,
    };

    /// Tags each excerpt by the one theme word it contains.
    struct ThemeKeywords;

    impl KeywordExtractor for ThemeKeywords {
        fn extract_keywords(&self, excerpt: &str) -> KeywordSet {
            if excerpt.contains("impact") {
                KeywordSet::regular(["impact"])
            } else if excerpt.contains("optical") {
                KeywordSet::regular(["optics"])
            } else {
                KeywordSet::default()
            }
        }

        fn extract_keywords_from_document(
            &self,
            _document: &Document,
            _vocabulary: &[String],
            _positive: bool,
        ) -> KeywordSet {
            KeywordSet::default()
        }

        fn extract_special_keywords(&self, _excerpt: &str) -> KeywordSet {
            KeywordSet::special(Vec::<String>::new())
        }
    }

    struct ThemeProbability;

    impl ProbabilityScorer for ThemeProbability {
        fn score_excerpt_probability(
            &self,
            _title: &str,
            _abstract: Option<&str>,
            excerpt: &str,
        ) -> f64 {
            if excerpt.contains("impact") {
                0.9
            } else {
                0.2
            }
        }
    }

    /// Always planetary, with the mean of its knowledge-graph and probability inputs as confidence.
    struct MeanClassifier;

    impl LabelClassifier for MeanClassifier {
        fn classify(
            &self,
            kg: f64,
            _relevance: f64,
            probability: f64,
        ) -> std::result::Result<ClassPrediction, InferError> {
            Ok(ClassPrediction {
                value: 1,
                confidence: (kg + probability) / 2.0,
            })
        }
    }

    fn ctx() -> DisambiguationContext {
        DisambiguationContext::new("Rayleigh", "crater", "craters", "Mars")
    }

    fn graphs(positive: &[&[&str]], negative: &[&[&str]]) -> EvidenceGraphs {
        let sets = |s: &[&[&str]]| -> Vec<KeywordSet> {
            s.iter().map(|k| KeywordSet::regular(k.iter())).collect()
        };
        EvidenceGraphs::new(
            RelevanceGraph::build("Rayleigh", &sets(positive), &[], 3),
            RelevanceGraph::build("Rayleigh", &sets(negative), &[], 3),
            3,
        )
    }

    #[test]
    fn test_ratio_favours_positive_evidence() {
        let g = graphs(&[&["crater", "ejecta"], &["crater"]], &[&["scattering"]]);
        let kw = KeywordSet::regular(["crater"]);
        let special = KeywordSet::special(Vec::<String>::new());
        // positive path weight 2, negative 0
        assert_eq!(g.score(&kw, &special), Evidence::Score(1.0));

        let kw = KeywordSet::regular(["scattering"]);
        assert_eq!(g.score(&kw, &special), Evidence::Score(0.0));
    }

    #[test]
    fn test_unbuilt_graphs_give_no_evidence() {
        let g = EvidenceGraphs::new(RelevanceGraph::unbuilt(3), RelevanceGraph::unbuilt(3), 3);
        let kw = KeywordSet::regular(["crater"]);
        assert_eq!(
            g.score(&kw, &KeywordSet::special(Vec::<String>::new())),
            Evidence::NoEvidence
        );
    }

    #[test]
    fn test_special_keywords_join_the_query() {
        let g = graphs(&[&["crater"]], &[&["optics"]]);
        let kw = KeywordSet::regular(["optics"]);
        let special = KeywordSet::special(["crater"]);
        // crater scores 1 positive, optics scores 1 negative
        assert_eq!(g.score(&kw, &special), Evidence::Score(0.5));
    }

    #[test]
    fn test_document_means_are_written_onto_every_excerpt() {
        let config = EngineConfig {
            window_tokens: 8,
            ..Default::default()
        };
        let collaborators = Collaborators::fallback()
            .with_keywords(Arc::new(ThemeKeywords))
            .with_probability(Arc::new(ThemeProbability))
            .with_classifier(Arc::new(MeanClassifier));
        let job = ClassificationJob::new(
            ctx(),
            &config,
            collaborators,
            graphs(&[&["impact"]], &[&["optics"]]),
        )
        .unwrap();

        // first excerpt scores ratio 1.0 / probability 0.9, second 0.0 / 0.2
        let doc = Document::new("2023Icar..400..100E").with_body(
            "Fresh ejecta from the impact around Rayleigh crater on Mars cover the plains. \
             Many years later the optical team near Rayleigh crater on Mars measured dust \
             in the sky.",
        );
        let mut report = JobReport::default();
        let batch = job.process_document(&doc, &mut report).unwrap();

        assert_eq!(batch.details.len(), 2);
        assert!(batch.details[0].keywords.contains("impact"));
        assert!(batch.details[1].keywords.contains("optics"));
        for detail in &batch.details {
            let wire = detail.wire_scores();
            assert_eq!(wire.knowledge_graph_score, 0.5);
            assert_eq!(wire.probability_score, 0.55);
            assert_eq!(wire.label, "planetary");
            assert_eq!(wire.confidence_score, 0.525);
        }
    }

    #[test]
    fn test_document_without_surviving_excerpts_yields_no_records() {
        let job = ClassificationJob::new(
            ctx(),
            &EngineConfig::default(),
            Collaborators::fallback(),
            graphs(&[&["crater"]], &[&["scattering"]]),
        )
        .unwrap();

        // the only occurrence is an author citation
        let doc = Document::new("1901PhilMag...1..100R").with_body(
            "Early measurements as shown by Rayleigh et al. (1900) agree with the theory.",
        );
        let mut report = JobReport::default();
        assert!(job.process_document(&doc, &mut report).is_none());
        assert_eq!(report.excerpts_windowed, 1);
        assert_eq!(report.excerpts_entity_rejected, 1);
        assert_eq!(report.documents_without_excerpts, 1);
        assert_eq!(report.documents_accepted, 0);
    }
}
