//! The injected capabilities a job runs against.

use std::sync::Arc;

use nomen_infer::{
    CapitalizationAnalyzer, CitationHeuristicRecognizer, CollectionRelevanceScorer,
    EntityRecognizer, KeywordExtractor, LabelClassifier, LexicalKeywordExtractor,
    NoopLabelClassifier, NoopProbabilityScorer, ProbabilityScorer, RelevanceScorer,
    SyntaxAnalyzer,
};

/// Shared handles to every external model a job consults.
#[derive(Clone)]
pub struct Collaborators {
    pub keywords: Arc<dyn KeywordExtractor>,
    pub entities: Arc<dyn EntityRecognizer>,
    pub syntax: Arc<dyn SyntaxAnalyzer>,
    pub relevance: Arc<dyn RelevanceScorer>,
    pub probability: Arc<dyn ProbabilityScorer>,
    pub classifier: Arc<dyn LabelClassifier>,
    /// Venues counted as main planetary journals by the relevance scorer.
    pub main_venues: Vec<String>,
}

impl Collaborators {
    /// Heuristic stand-ins for every model. Probabilities come out as 0 and
    /// the classifier always fails, so jobs run but nothing is accepted or labeled.
    pub fn fallback() -> Self {
        Self {
            keywords: Arc::new(LexicalKeywordExtractor::default()),
            entities: Arc::new(CitationHeuristicRecognizer),
            syntax: Arc::new(CapitalizationAnalyzer),
            relevance: Arc::new(CollectionRelevanceScorer::default()),
            probability: Arc::new(NoopProbabilityScorer),
            classifier: Arc::new(NoopLabelClassifier),
            main_venues: vec!["Icarus".into(), "JGRE".into(), "P&SS".into(), "PSJ".into()],
        }
    }

    pub fn with_keywords(mut self, keywords: Arc<dyn KeywordExtractor>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_entities(mut self, entities: Arc<dyn EntityRecognizer>) -> Self {
        self.entities = entities;
        self
    }

    pub fn with_syntax(mut self, syntax: Arc<dyn SyntaxAnalyzer>) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_relevance(mut self, relevance: Arc<dyn RelevanceScorer>) -> Self {
        self.relevance = relevance;
        self
    }

    pub fn with_probability(mut self, probability: Arc<dyn ProbabilityScorer>) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn LabelClassifier>) -> Self {
        self.classifier = classifier;
        self
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::fallback()
    }
}
